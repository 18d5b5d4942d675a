//! The storage seam between operations and the file system.
//!
//! Operations only see [`DocumentStore`]; the production implementation
//! lives in `infrastructure::storage` and an in-memory one backs unit tests.

use std::path::{Path, PathBuf};

use containerd_config_core::{DocumentError, DocumentTree};
use thiserror::Error;

/// Errors raised while loading or persisting a config document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file disappeared between the existence check and the read.
    #[error("config file {path} does not exist")]
    NotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a valid TOML document.
    #[error("failed to load config file {path} as a TOML tree: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// The edited tree could not be rendered; the file was not touched.
    #[error("failed to convert config for {path} to TOML: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads and persists whole config documents by path.
pub trait DocumentStore {
    /// Returns `true` if a document exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Reads and parses the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`], [`StoreError::Read`] or
    /// [`StoreError::Parse`].
    fn load(&self, path: &Path) -> Result<DocumentTree, StoreError>;

    /// Serializes `tree` and replaces the document at `path` with it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] before anything is written, or
    /// [`StoreError::Write`] if the replacement fails.
    fn persist(&self, path: &Path, tree: &DocumentTree) -> Result<(), StoreError>;
}
