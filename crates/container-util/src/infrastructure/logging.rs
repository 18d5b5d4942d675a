//! Log output configuration.
//!
//! The binary builds a [`LogSettings`] from its flags and installs the global
//! subscriber once, before any operation runs.  `RUST_LOG`, when set, takes
//! precedence over the configured level.

use anyhow::anyhow;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line output.
    Text,
    /// One JSON object per line.
    #[default]
    Json,
}

/// How the process should log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub level: Level,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::default(),
        }
    }
}

/// Error for a log level name that is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unable to set log level: {0:?} is not a valid level")]
pub struct InvalidLogLevel(pub String);

/// Parses a case-insensitive level name.
///
/// Accepts `trace`, `debug`, `info`, `warn`/`warning` and `error`; `fatal`
/// and `panic` map to `error`.
///
/// # Errors
///
/// Returns [`InvalidLogLevel`] for any other name.
pub fn parse_level(name: &str) -> Result<Level, InvalidLogLevel> {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" | "fatal" | "panic" => Ok(Level::ERROR),
        _ => Err(InvalidLogLevel(name.to_string())),
    }
}

/// Installs the global `tracing` subscriber described by `settings`.
///
/// Events carry their source file and line.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(settings: &LogSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str().to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true);

    let installed = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_is_case_insensitive() {
        assert_eq!(parse_level("DEBUG"), Ok(Level::DEBUG));
        assert_eq!(parse_level("Info"), Ok(Level::INFO));
    }

    #[test]
    fn test_parse_level_accepts_logrus_aliases() {
        assert_eq!(parse_level("warning"), Ok(Level::WARN));
        assert_eq!(parse_level("fatal"), Ok(Level::ERROR));
        assert_eq!(parse_level("panic"), Ok(Level::ERROR));
    }

    #[test]
    fn test_parse_level_rejects_unknown_names() {
        let err = parse_level("verbose").unwrap_err();
        assert_eq!(err, InvalidLogLevel("verbose".to_string()));
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn test_default_settings_are_info_json() {
        let settings = LogSettings::default();
        assert_eq!(settings.level, Level::INFO);
        assert_eq!(settings.format, LogFormat::Json);
    }
}
