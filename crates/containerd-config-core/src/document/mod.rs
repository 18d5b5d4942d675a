//! Document tree editor.
//!
//! Parses TOML text into an ordered tree, mutates it through [`KeyPath`]s and
//! renders it back to text.  The editor knows nothing about containerd; the
//! fixed key layout lives in [`crate::plan`].
//!
//! | Operation  | Method                          |
//! |------------|---------------------------------|
//! | Load       | [`DocumentTree::load`]          |
//! | SetPath    | [`DocumentTree::set_path`]      |
//! | HasPath    | [`DocumentTree::has_path`]      |
//! | GetPath    | [`DocumentTree::get_path`]      |
//! | DeletePath | [`DocumentTree::delete_path`]   |
//! | Serialize  | [`DocumentTree::to_toml_string`]|

pub mod path;
pub mod tree;
pub mod value;

pub use path::KeyPath;
pub use tree::{DocumentError, DocumentTree};
pub use value::LeafValue;
