//! Application layer: the four config operations.
//!
//! Every operation is one synchronous unit:
//!
//! ```text
//! validate arguments → check file exists → load → apply EditPlan → persist
//! ```
//!
//! The document is only written back when the whole plan succeeds, so a
//! failed operation leaves the file as it was.
//!
//! - **`nvidia`**   – enable / disable the GPU runtime handler.
//! - **`registry`** – add / delete a registry's auth and TLS settings.
//! - **`store`**    – the [`DocumentStore`] trait the operations load and
//!   persist through.

pub mod nvidia;
pub mod registry;
pub mod store;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use containerd_config_core::{DocumentError, EditPlan, KeyPath, PlanError};
use thiserror::Error;
use tracing::debug;

pub use registry::RegistryRequest;
pub use store::{DocumentStore, StoreError};

/// Errors returned by the config operations.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The target config file does not exist.
    #[error("specified config file {path} does not exist")]
    FileNotFound { path: PathBuf },

    /// A required argument is missing or inconsistent.
    #[error("{0}, check program usage and rerun")]
    Validation(String),

    /// A subtree the operation must remove is absent.
    #[error("specified path {path} not found in the config file")]
    NotFound { path: KeyPath },

    /// The edit plan was rejected by the document editor.
    #[error("failed to edit config document: {0}")]
    Document(#[source] DocumentError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<PlanError> for OperationError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::MissingPath { path } => Self::NotFound { path },
            PlanError::Document(source) => Self::Document(source),
        }
    }
}

/// The supported operation selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AddNvidia,
    AddRegistry,
    DeleteNvidia,
    DeleteRegistry,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::AddNvidia,
        Operation::AddRegistry,
        Operation::DeleteNvidia,
        Operation::DeleteRegistry,
    ];

    /// The selector string accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddNvidia => "add_nvidia",
            Self::AddRegistry => "add_registry",
            Self::DeleteNvidia => "delete_nvidia",
            Self::DeleteRegistry => "delete_registry",
        }
    }

    /// Comma-separated list of every selector, for usage output.
    pub fn supported_values() -> String {
        Self::ALL.map(Operation::as_str).join(", ")
    }

    /// What the operation does, phrased for log lines.
    pub fn description(self) -> &'static str {
        match self {
            Self::AddNvidia => "add nvidia settings",
            Self::AddRegistry => "add registry details",
            Self::DeleteNvidia => "delete nvidia settings",
            Self::DeleteRegistry => "delete registry settings",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an operation selector that is not one of [`Operation::ALL`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("specified op value: {{{0}}} is not supported")]
pub struct UnsupportedOperation(pub String);

impl FromStr for Operation {
    type Err = UnsupportedOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnsupportedOperation(s.to_string()))
    }
}

/// Everything needed to run one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub operation: Operation,
    pub config_file: PathBuf,
    /// Registry arguments; ignored by the nvidia operations.
    pub registry: RegistryRequest,
}

/// Summary of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    pub operation: Operation,
    pub config_file: PathBuf,
    pub steps_applied: usize,
}

/// Runs the operation described by `request` against `store`.
///
/// # Errors
///
/// Returns the [`OperationError`] of the selected operation.
pub fn execute(
    store: &impl DocumentStore,
    request: &OperationRequest,
) -> Result<OperationReport, OperationError> {
    let path = request.config_file.as_path();
    match request.operation {
        Operation::AddNvidia => nvidia::add_nvidia(store, path),
        Operation::DeleteNvidia => nvidia::delete_nvidia(store, path),
        Operation::AddRegistry => registry::add_registry(store, path, &request.registry),
        Operation::DeleteRegistry => {
            registry::delete_registry(store, path, &request.registry.registry_url)
        }
    }
}

/// Loads the document at `path`, applies `plan` and persists the result.
///
/// Nothing is written unless every step of `plan` succeeds.
pub(crate) fn edit_document(
    store: &impl DocumentStore,
    path: &Path,
    operation: Operation,
    plan: &EditPlan,
) -> Result<OperationReport, OperationError> {
    if !store.exists(path) {
        return Err(OperationError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut tree = store.load(path)?;
    let steps_applied = plan.apply(&mut tree)?;
    debug!(%operation, steps_applied, "edit plan applied");
    store.persist(path, &tree)?;

    Ok(OperationReport {
        operation,
        config_file: path.to_path_buf(),
        steps_applied,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
