//! In-memory TOML document with path-addressed mutation.
//!
//! The tree is a root [`Table`] whose nested tables keep insertion order
//! (the workspace enables `toml/preserve_order`).  A fresh tree is built from
//! file content for every operation and dropped after it is serialized back;
//! nothing is cached between calls.
//!
//! Comments and blank lines in the source text are not retained, so
//! [`DocumentTree::to_toml_string`] reproduces the data, not the layout.

use thiserror::Error;
use toml::{Table, Value};
use tracing::debug;

use super::path::KeyPath;
use super::value::LeafValue;

/// Errors produced by the document tree editor.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The content is not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The content violates the TOML grammar.
    #[error("failed to parse document: {0}")]
    Parse(#[from] toml::de::Error),

    /// The tree could not be rendered back to TOML text.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A mutation was addressed at the root table itself.
    #[error("cannot {0} the document root")]
    EmptyPath(&'static str),
}

/// An ordered tree of TOML tables, arrays and scalars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTree {
    root: Table,
}

impl DocumentTree {
    /// Parses TOML text into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] if `text` is not valid TOML
    /// (unterminated strings, duplicate keys, redefined tables, ...).
    pub fn load(text: &str) -> Result<Self, DocumentError> {
        let root: Table = toml::from_str(text)?;
        Ok(Self { root })
    }

    /// Parses raw file bytes into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidUtf8`] for non UTF-8 input and
    /// [`DocumentError::Parse`] for grammar violations.
    pub fn load_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        Self::load(std::str::from_utf8(bytes)?)
    }

    /// Renders the tree as TOML text, keeping per-table insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Serialize`] if a value cannot be represented.
    pub fn to_toml_string(&self) -> Result<String, DocumentError> {
        Ok(toml::to_string(&self.root)?)
    }

    pub fn root(&self) -> &Table {
        &self.root
    }

    /// Assigns `value` to the leaf at `path`.
    ///
    /// Missing intermediate tables are created.  An intermediate that exists
    /// but is not a table is replaced by an empty table, and an existing leaf
    /// is overwritten whatever its previous type.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::EmptyPath`] if `path` has no segments.
    pub fn set_path(
        &mut self,
        path: &KeyPath,
        value: impl Into<LeafValue>,
    ) -> Result<(), DocumentError> {
        let (parents, key) = path.split_last().ok_or(DocumentError::EmptyPath("set"))?;
        let leaf: LeafValue = value.into();

        insert_at(&mut self.root, parents, key, Value::from(leaf));
        Ok(())
    }

    /// Returns `true` iff every segment of `path` resolves to an existing
    /// child.  The empty path names the root and always exists.
    pub fn has_path(&self, path: &KeyPath) -> bool {
        path.is_empty() || self.get_path(path).is_some()
    }

    /// Looks up the node at `path`.  Returns `None` for the empty path and
    /// for any path with a missing segment.
    pub fn get_path(&self, path: &KeyPath) -> Option<&Value> {
        let (parents, leaf) = path.split_last()?;
        self.table_at(parents)?.get(leaf)
    }

    /// Removes the subtree at `path` from its parent table and returns it.
    ///
    /// An absent path leaves the tree untouched and yields `Ok(None)`;
    /// callers that care about existence check [`has_path`](Self::has_path)
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::EmptyPath`] if `path` has no segments.
    pub fn delete_path(&mut self, path: &KeyPath) -> Result<Option<Value>, DocumentError> {
        let (parents, leaf) = path.split_last().ok_or(DocumentError::EmptyPath("delete"))?;
        Ok(self.table_at_mut(parents).and_then(|table| table.remove(leaf)))
    }

    fn table_at(&self, segments: &[String]) -> Option<&Table> {
        segments
            .iter()
            .try_fold(&self.root, |table, segment| table.get(segment)?.as_table())
    }

    fn table_at_mut(&mut self, segments: &[String]) -> Option<&mut Table> {
        segments.iter().try_fold(&mut self.root, |table, segment| {
            table.get_mut(segment)?.as_table_mut()
        })
    }
}

/// Inserts `value` under `key` in the table reached through `parents`.
///
/// Missing tables along the way are created; a non-table node in the way is
/// replaced by a fresh table.
fn insert_at(table: &mut Table, parents: &[String], key: &str, value: Value) {
    let Some((first, rest)) = parents.split_first() else {
        table.insert(key.to_string(), value);
        return;
    };
    match table.get_mut(first.as_str()) {
        Some(Value::Table(child)) => insert_at(child, rest, key, value),
        _ => {
            let mut child = Table::new();
            insert_at(&mut child, rest, key, value);
            if let Some(old) = table.insert(first.clone(), Value::Table(child)) {
                debug!(
                    key = first.as_str(),
                    kind = old.type_str(),
                    "replaced non-table intermediate with a table"
                );
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
