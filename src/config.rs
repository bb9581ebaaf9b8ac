//! Console configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `ANDY_CONSOLE_*` environment variables. Command-line flags are applied on
//! top by the binary.
//!
//! ```toml
//! endpoint = "http://10.0.0.5:8000"
//! poll_interval_ms = 2000
//! request_timeout_ms = 1500
//! suppress_overlap = true
//! log_file = "/var/log/andy-console.log"
//! log_filter = "andy_console=debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `ANDY_CONSOLE_ENDPOINT`.
pub const ENV_PREFIX: &str = "ANDY_CONSOLE";

/// Runtime settings for the console.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the andy-os backend.
    pub endpoint: String,
    /// Poll cadence; also the length of every value transition.
    pub poll_interval_ms: u64,
    /// Per-request timeout. Unset means the HTTP client's default.
    pub request_timeout_ms: Option<u64>,
    /// Skip poll ticks while a previous request is still running.
    pub suppress_overlap: bool,
    /// Where interactive sessions write their logs.
    pub log_file: PathBuf,
    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            poll_interval_ms: 2000,
            request_timeout_ms: None,
            suppress_overlap: false,
            log_file: PathBuf::from("andy-console.log"),
            log_filter: "info".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("failed to read configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the poller cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        if self.endpoint.trim().is_empty() {
            bail!("endpoint must not be empty");
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8000");
        assert_eq!(config.poll_interval(), Duration::from_millis(2000));
        assert!(config.request_timeout().is_none());
        assert!(!config.suppress_overlap);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let file = toml_file(
            r#"
            endpoint = "http://10.0.0.5:8000"
            poll_interval_ms = 1000
            request_timeout_ms = 750
            suppress_overlap = true
            "#,
        );

        let config = ConsoleConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.5:8000");
        assert_eq!(config.poll_interval(), Duration::from_millis(1000));
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(750)));
        assert!(config.suppress_overlap);
        // Unset keys keep their defaults
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let file = toml_file("poll_interval_ms = 0\n");
        let err = ConsoleConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("poll_interval_ms"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ConsoleConfig::load(Some(Path::new("/nonexistent/andy-console.toml")));
        assert!(result.is_err());
    }
}
