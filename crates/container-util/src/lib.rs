//! container-util library crate.
//!
//! Edits containerd's `config.toml` in place to enable or disable the
//! `nvidia` GPU runtime and to add or remove a registry's credentials.
//!
//! # Architecture
//!
//! ```text
//! main.rs (clap CLI, log setup)
//!   └─ application/      operations: validate → load → apply plan → persist
//!        └─ store        DocumentStore trait
//!   └─ infrastructure/
//!        ├─ storage/     TomlFileStore (atomic rewrite), MemoryStore (tests)
//!        └─ logging      LogSettings → tracing-subscriber
//! containerd-config-core  DocumentTree + EditPlans (no I/O)
//! ```

pub mod application;
pub mod infrastructure;
