//! container-util: entry point.
//!
//! Toggles the GPU runtime and registry settings in a containerd
//! `config.toml`.
//!
//! # Usage
//!
//! ```text
//! container-util --op add_nvidia --configfile <config filename>
//! container-util --op add_registry --username <username> --password <password> \
//!     --registryurl <registryurl> --clientcert <ca file> --insecure=<true/false> \
//!     --configfile <config filename>
//! container-util --op delete_nvidia --configfile <config filename>
//! container-util --op delete_registry --registryurl <registry url> --configfile <config filename>
//! ```
//!
//! | Variable                     | Flag           |
//! |------------------------------|----------------|
//! | `CONTAINER_UTIL_CONFIG_FILE` | `--configfile` |
//! | `CONTAINER_UTIL_LOG_LEVEL`   | `--loglevel`   |
//!
//! A failed operation is logged at `error` level and the process still exits
//! successfully, as does an unknown `--op` (which prints the usage lines).

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::{debug, error, info, Level};

use container_util::application::{self, Operation, OperationRequest, RegistryRequest};
use container_util::infrastructure::logging::{init_logging, parse_level, LogFormat, LogSettings};
use container_util::infrastructure::storage::TomlFileStore;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Edits containerd's config.toml to toggle the nvidia runtime and registry
/// credentials.
#[derive(Debug, Parser)]
#[command(
    name = "container-util",
    about = "Update GPU runtime and registry settings in a containerd config file",
    version
)]
struct Cli {
    /// Operation to apply: add_nvidia, add_registry, delete_nvidia, delete_registry.
    #[arg(long, default_value = "")]
    op: String,

    /// The containerd config file to edit in place.
    #[arg(long, env = "CONTAINER_UTIL_CONFIG_FILE")]
    configfile: Option<PathBuf>,

    /// Username for the registry server.
    #[arg(long, default_value = "")]
    username: String,

    /// Password for the registry server.
    #[arg(long, default_value = "", hide_default_value = true)]
    password: String,

    /// Registry server URL, including the port if required.
    #[arg(long, default_value = "")]
    registryurl: String,

    /// CA certificate file used to verify the registry.
    #[arg(long, default_value = "")]
    clientcert: String,

    /// Skip TLS verification of the registry.
    #[arg(
        long,
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    insecure: bool,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "info", env = "CONTAINER_UTIL_LOG_LEVEL", value_parser = parse_level)]
    loglevel: Level,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
}

impl Cli {
    fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.loglevel,
            format: self.log_format,
        }
    }

    fn registry_request(&self) -> RegistryRequest {
        RegistryRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            registry_url: self.registryurl.clone(),
            client_cert: self.clientcert.clone(),
            insecure: self.insecure,
        }
    }

    fn config_file(&self) -> PathBuf {
        self.configfile.clone().unwrap_or_default()
    }

    /// Builds the request for `operation` from the parsed flags.
    fn into_request(self, operation: Operation) -> OperationRequest {
        OperationRequest {
            operation,
            config_file: self.config_file(),
            registry: self.registry_request(),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_settings()).context("unable to set up logging")?;
    debug!("containerd config file update hit");
    debug!(
        op = %cli.op,
        config_file = %cli.config_file().display(),
        registry = ?cli.registry_request(),
        "arguments parsed"
    );

    let operation = match cli.op.parse::<Operation>() {
        Ok(operation) => operation,
        Err(unsupported) => {
            info!("{unsupported}");
            info!("supported op values are '{}'", Operation::supported_values());
            print_usage();
            return Ok(());
        }
    };

    let request = cli.into_request(operation);
    match application::execute(&TomlFileStore::new(), &request) {
        Ok(report) => info!(
            operation = %report.operation,
            config_file = %report.config_file.display(),
            steps = report.steps_applied,
            "{} completed successfully",
            operation.description()
        ),
        Err(e) => error!(%operation, "failed to {}, error: {e}", operation.description()),
    }

    Ok(())
}

fn print_usage() {
    info!("check out the program usage options like one of the below");
    info!("container-util --op add_nvidia --configfile <config filename>");
    info!(
        "container-util --op add_registry --username <username> --password <password> \
         --registryurl <registryurl> --clientcert <ca file> --insecure=<true/false> \
         --configfile <config filename>"
    );
    info!("container-util --op delete_nvidia --configfile <config filename>");
    info!(
        "container-util --op delete_registry --registryurl <registry url> \
         --configfile <config filename>"
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
