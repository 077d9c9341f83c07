//! Store configuration
//!
//! Loaded from a JSON file:
//!
//! ```json
//! {
//!   "data_dir": "./staffboard-data",
//!   "backend": "file",
//!   "seed_on_startup": true,
//!   "seed_anchor_date": "2024-01-07",
//!   "log_level": "info"
//! }
//! ```
//!
//! Only `data_dir` is required.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "STAFFBOARD_CONFIG_READ",
            ConfigError::Parse(_) => "STAFFBOARD_CONFIG_PARSE",
            ConfigError::Invalid(_) => "STAFFBOARD_CONFIG_INVALID",
        }
    }
}

/// Where tables are persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per table under `data_dir`
    #[default]
    File,
    /// Process memory; nothing survives exit
    Memory,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Data directory (required)
    pub data_dir: String,

    #[serde(default)]
    pub backend: BackendKind,

    /// Run the seed bootstrapper when the client opens (default: true)
    #[serde(default = "default_seed_on_startup")]
    pub seed_on_startup: bool,

    /// Last day of the seeded KPI history (default: today, UTC)
    #[serde(default)]
    pub seed_anchor_date: Option<NaiveDate>,

    /// trace | info | warn | error (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_seed_on_startup() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl StoreConfig {
    /// Config with defaults for everything but the data directory
    pub fn new(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            backend: BackendKind::File,
            seed_on_startup: default_seed_on_startup(),
            seed_anchor_date: None,
            log_level: default_log_level(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: StoreConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }
        self.log_severity()?;
        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn log_severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(ConfigError::Invalid)
    }

    /// Anchor date for the seeded history
    pub fn anchor_date(&self) -> NaiveDate {
        self.seed_anchor_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}
