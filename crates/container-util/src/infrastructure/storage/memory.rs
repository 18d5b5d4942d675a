//! In-memory document store for unit testing.
//!
//! Allows tests to run operations without touching the file system and to
//! observe how many times a document was written back.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use containerd_config_core::DocumentTree;

use crate::application::{DocumentStore, StoreError};

/// A [`DocumentStore`] holding documents as TOML text keyed by path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<PathBuf, String>>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a single document.
    pub fn with_document(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let store = Self::new();
        store.insert(path, text);
        store
    }

    /// Adds or replaces a document without counting it as a write.
    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.documents
            .lock()
            .expect("lock poisoned")
            .insert(path.into(), text.into());
    }

    /// Returns the stored text of the document at `path`.
    pub fn text(&self, path: impl AsRef<Path>) -> Option<String> {
        self.documents
            .lock()
            .expect("lock poisoned")
            .get(path.as_ref())
            .cloned()
    }

    /// Parses the stored document at `path`.
    ///
    /// Returns `None` if the document is absent or not valid TOML.
    pub fn tree(&self, path: impl AsRef<Path>) -> Option<DocumentTree> {
        self.text(path)
            .and_then(|text| DocumentTree::load(&text).ok())
    }

    /// Returns the number of successful [`DocumentStore::persist`] calls.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().expect("lock poisoned")
    }
}

impl DocumentStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.documents
            .lock()
            .expect("lock poisoned")
            .contains_key(path)
    }

    fn load(&self, path: &Path) -> Result<DocumentTree, StoreError> {
        let text = self.text(path).ok_or_else(|| StoreError::NotFound {
            path: path.to_path_buf(),
        })?;
        DocumentTree::load(&text).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn persist(&self, path: &Path, tree: &DocumentTree) -> Result<(), StoreError> {
        let text = tree.to_toml_string().map_err(|source| StoreError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        self.insert(path, text);
        *self.writes.lock().expect("lock poisoned") += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_absent_document_is_not_found() {
        let store = MemoryStore::new();
        let result = store.load(Path::new("/nope.toml"));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_persist_counts_writes_and_replaces_text() {
        // Arrange
        let store = MemoryStore::with_document("/c.toml", "a = 1\n");
        let tree = DocumentTree::load("b = 2\n").unwrap();

        // Act
        store.persist(Path::new("/c.toml"), &tree).unwrap();

        // Assert
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.tree("/c.toml"), Some(tree));
    }

    #[test]
    fn test_insert_is_not_counted_as_write() {
        let store = MemoryStore::new();
        store.insert("/c.toml", "");
        assert!(store.exists(Path::new("/c.toml")));
        assert_eq!(store.write_count(), 0);
    }
}
