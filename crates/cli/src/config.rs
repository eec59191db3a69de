//! Configuration loading from powerguard.toml.

use reports::ReportConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Where and under which namespace events are stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Report thresholds (`[durations]`, `[locations]`).
    #[serde(flatten)]
    pub reports: ReportConfig,
}

/// Storage location configuration.
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `events.db`. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Key namespace; events live under `"<namespace>:events"`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            namespace: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    storage::DEFAULT_NAMESPACE.to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.reports.validate()?;
        if config.storage.namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error(transparent)]
    Reports(#[from] reports::Error),

    #[error("storage.namespace must not be empty")]
    EmptyNamespace,
}
