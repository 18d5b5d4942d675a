//! Declarative edit plans.
//!
//! An [`EditPlan`] is an ordered list of [`EditStep`]s applied to a
//! [`DocumentTree`].  Operations are described as data so the exact set of
//! `(path, value)` pairs can be listed and asserted in tests without touching
//! the file system.
//!
//! Steps run strictly in order.  A failing [`EditStep::RequirePresent`] stops
//! the plan, but steps that already ran stay applied to the tree: the caller
//! decides whether a partially edited tree is ever persisted.

pub mod containerd;

use thiserror::Error;
use tracing::debug;

use crate::document::{DocumentError, DocumentTree, KeyPath, LeafValue};

/// Errors raised while applying an [`EditPlan`].
#[derive(Debug, Error)]
pub enum PlanError {
    /// A `RequirePresent` step found no node at its path.
    #[error("path {path} not found in the document")]
    MissingPath { path: KeyPath },

    /// The tree editor rejected a step.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// One mutation or precondition within a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum EditStep {
    /// Assign a leaf value, creating intermediate tables.
    Set { path: KeyPath, value: LeafValue },
    /// Fail the plan unless the path exists.
    RequirePresent { path: KeyPath },
    /// Remove the subtree rooted at the path.
    Delete { path: KeyPath },
}

impl EditStep {
    pub fn path(&self) -> &KeyPath {
        match self {
            Self::Set { path, .. } | Self::RequirePresent { path } | Self::Delete { path } => path,
        }
    }
}

/// An ordered list of edit steps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditPlan {
    steps: Vec<EditStep>,
}

impl EditPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `Set` step.
    pub fn set(mut self, path: KeyPath, value: impl Into<LeafValue>) -> Self {
        self.steps.push(EditStep::Set {
            path,
            value: value.into(),
        });
        self
    }

    /// Appends a `RequirePresent` step.
    pub fn require(mut self, path: KeyPath) -> Self {
        self.steps.push(EditStep::RequirePresent { path });
        self
    }

    /// Appends a `Delete` step.
    pub fn delete(mut self, path: KeyPath) -> Self {
        self.steps.push(EditStep::Delete { path });
        self
    }

    pub fn steps(&self) -> &[EditStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates over the `(path, value)` pairs of all `Set` steps.
    pub fn assignments(&self) -> impl Iterator<Item = (&KeyPath, &LeafValue)> {
        self.steps.iter().filter_map(|step| match step {
            EditStep::Set { path, value } => Some((path, value)),
            _ => None,
        })
    }

    /// Applies every step to `tree` in order and returns the number applied.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::MissingPath`] when a `RequirePresent` step fails;
    /// earlier steps remain applied.  Returns [`PlanError::Document`] if the
    /// editor rejects a step (empty path).
    pub fn apply(&self, tree: &mut DocumentTree) -> Result<usize, PlanError> {
        for step in &self.steps {
            match step {
                EditStep::Set { path, value } => {
                    debug!(%path, "set");
                    tree.set_path(path, value.clone())?;
                }
                EditStep::RequirePresent { path } => {
                    if !tree.has_path(path) {
                        return Err(PlanError::MissingPath { path: path.clone() });
                    }
                }
                EditStep::Delete { path } => {
                    let removed = tree.delete_path(path)?;
                    debug!(%path, removed = removed.is_some(), "delete");
                }
            }
        }
        Ok(self.steps.len())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
