//! # containerd-config-core
//!
//! Path-addressed editing of TOML configuration documents, plus the fixed
//! edit plans used to toggle containerd's GPU runtime and registry settings.
//!
//! This crate performs no file I/O; callers hand it text and get text back.
//!
//! - **`document`** – [`DocumentTree`]: load, set/has/get/delete by
//!   [`KeyPath`], serialize.
//! - **`plan`** – [`EditPlan`]: an ordered list of set / require / delete
//!   steps, and the containerd plans built from it.
//!
//! ```rust
//! use containerd_config_core::{plan::containerd, DocumentTree};
//!
//! let mut tree = DocumentTree::load("version = 2\n").unwrap();
//! containerd::enable_nvidia_runtime().apply(&mut tree).unwrap();
//! assert!(tree.has_path(&containerd::runtime("nvidia")));
//! ```

pub mod document;
pub mod plan;

pub use document::{DocumentError, DocumentTree, KeyPath, LeafValue};
pub use plan::containerd::RegistrySettings;
pub use plan::{EditPlan, EditStep, PlanError};
