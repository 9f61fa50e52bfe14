//! CLI configuration module.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     INVOICE__OUTPUT_DIR=/srv/invoices                                  │
//! │     INVOICE__LOG_FILTER=debug                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or ./invoice.toml when present                    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     output_dir = "invoices", log_filter = "info"                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "invoice";

pub const DEFAULT_OUTPUT_DIR: &str = "invoices";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory rendered invoices are saved to.
    pub output_dir: PathBuf,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Settings {
    /// Loads settings from defaults, the config file, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let builder = Config::builder()
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?;

        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix("INVOICE").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(SettingsError::InvalidValue("output_dir".to_string()));
        }
        if self.log_filter.trim().is_empty() {
            return Err(SettingsError::InvalidValue("log_filter".to_string()));
        }
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
