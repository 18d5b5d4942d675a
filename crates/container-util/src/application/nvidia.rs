//! GPU runtime operations: register or remove the `nvidia` runtime handler.

use std::path::Path;

use containerd_config_core::plan::containerd;
use tracing::debug;

use super::{edit_document, DocumentStore, Operation, OperationError, OperationReport};

/// Makes `nvidia` the default runtime and writes its handler descriptor.
///
/// # Errors
///
/// [`OperationError::FileNotFound`] or a store error.
pub fn add_nvidia(
    store: &impl DocumentStore,
    config_file: &Path,
) -> Result<OperationReport, OperationError> {
    debug!(config_file = %config_file.display(), "add_nvidia");
    edit_document(
        store,
        config_file,
        Operation::AddNvidia,
        &containerd::enable_nvidia_runtime(),
    )
}

/// Restores `runc` as the default runtime and deletes the `nvidia` handler.
///
/// The baseline fields are rewritten in memory before the handler is looked
/// up; when it is missing the operation fails and the file is left as it was.
///
/// # Errors
///
/// [`OperationError::FileNotFound`], [`OperationError::NotFound`] if the
/// handler is absent, or a store error.
pub fn delete_nvidia(
    store: &impl DocumentStore,
    config_file: &Path,
) -> Result<OperationReport, OperationError> {
    debug!(config_file = %config_file.display(), "delete_nvidia");
    edit_document(
        store,
        config_file,
        Operation::DeleteNvidia,
        &containerd::disable_nvidia_runtime(),
    )
}
