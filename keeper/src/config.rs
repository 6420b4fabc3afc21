//! Keeper configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::KeeperError;

/// Configuration for a keeper process.
///
/// Can be loaded from a TOML file via [`KeeperConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeeperConfig {
    /// Path to the chain state (genesis) JSON file.
    #[serde(default = "default_genesis_path")]
    pub genesis_path: PathBuf,

    /// Where to write the exported state after applying commands, if anywhere.
    #[serde(default)]
    pub export_path: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Stop at the first rejected command instead of continuing the batch.
    #[serde(default)]
    pub stop_on_error: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_genesis_path() -> PathBuf {
    PathBuf::from("./genesis.json")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl KeeperConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, KeeperError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| KeeperError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, KeeperError> {
        toml::from_str(s).map_err(|e| KeeperError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, KeeperError> {
        toml::to_string_pretty(self).map_err(|e| KeeperError::Config(e.to_string()))
    }
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            genesis_path: default_genesis_path(),
            export_path: None,
            log_format: default_log_format(),
            log_level: default_log_level(),
            stop_on_error: false,
        }
    }
}
