//! Storage infrastructure: config document persistence.
//!
//! - `toml_file` – the production [`DocumentStore`](crate::application::DocumentStore)
//!   reading and atomically rewriting files on disk.
//! - `memory`    – an in-memory store for unit tests.

pub mod memory;
pub mod toml_file;

pub use memory::MemoryStore;
pub use toml_file::TomlFileStore;
