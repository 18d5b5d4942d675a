//! Registry operations: add or delete one registry's auth and TLS settings.

use std::path::Path;

use containerd_config_core::plan::containerd;
use containerd_config_core::RegistrySettings;
use tracing::debug;

use super::{edit_document, DocumentStore, Operation, OperationError, OperationReport};

/// Registry arguments as received from the caller.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct RegistryRequest {
    pub username: String,
    pub password: String,
    /// Registry host, including the port if required.
    pub registry_url: String,
    /// CA certificate file used to verify the registry.
    pub client_cert: String,
    pub insecure: bool,
}

/// Hides the password so the request can be logged.
impl std::fmt::Debug for RegistryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("registry_url", &self.registry_url)
            .field("client_cert", &self.client_cert)
            .field("insecure", &self.insecure)
            .finish()
    }
}

impl RegistryRequest {
    /// Checks the arguments required to add a registry.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Validation`] if the registry URL is empty,
    /// or if the certificate is empty while `insecure` is `false`.
    pub fn validate_for_add(&self) -> Result<(), OperationError> {
        self.validate_for_delete()?;
        if !self.insecure && self.client_cert.is_empty() {
            return Err(OperationError::Validation(
                "argument client certificate file can't be empty when insecure is false".into(),
            ));
        }
        Ok(())
    }

    /// Checks the arguments required to delete a registry.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Validation`] if the registry URL is empty.
    pub fn validate_for_delete(&self) -> Result<(), OperationError> {
        if self.registry_url.is_empty() {
            return Err(OperationError::Validation(
                "argument registry url value can't be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn to_settings(&self) -> RegistrySettings {
        RegistrySettings {
            registry_url: self.registry_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            ca_file: self.client_cert.clone(),
            insecure_skip_verify: self.insecure,
        }
    }
}

/// Writes auth and TLS settings for `request.registry_url` into the config.
///
/// # Errors
///
/// [`OperationError::Validation`] before any I/O for bad arguments, then
/// [`OperationError::FileNotFound`] or a store error.
pub fn add_registry(
    store: &impl DocumentStore,
    config_file: &Path,
    request: &RegistryRequest,
) -> Result<OperationReport, OperationError> {
    debug!(config_file = %config_file.display(), ?request, "add_registry");
    request.validate_for_add()?;

    let plan = containerd::add_registry(&request.to_settings());
    edit_document(store, config_file, Operation::AddRegistry, &plan)
}

/// Removes every setting for `registry_url` from the config.
///
/// # Errors
///
/// [`OperationError::Validation`] for an empty URL,
/// [`OperationError::FileNotFound`], [`OperationError::NotFound`] if the
/// registry has no settings, or a store error.
pub fn delete_registry(
    store: &impl DocumentStore,
    config_file: &Path,
    registry_url: &str,
) -> Result<OperationReport, OperationError> {
    debug!(config_file = %config_file.display(), registry_url, "delete_registry");
    RegistryRequest {
        registry_url: registry_url.to_string(),
        ..RegistryRequest::default()
    }
    .validate_for_delete()?;

    let plan = containerd::delete_registry(registry_url);
    edit_document(store, config_file, Operation::DeleteRegistry, &plan)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
