//! Application configuration for che-gather

use crate::error::{GatherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration stored in ~/.che-gather/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Delay between two reads of a workspace phase, e.g. "3s"
    #[serde(default = "default_poll_interval")]
    pub start_poll_interval: String,

    /// Number of phase reads before giving up on a debug start
    #[serde(default = "default_poll_attempts")]
    pub start_poll_attempts: u32,

    /// Namespace holding the cluster-wide operator catalog entries
    #[serde(default = "default_catalog_namespace")]
    pub catalog_namespace: String,

    /// Whether to use colors
    #[serde(default = "default_true")]
    pub colors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_poll_interval: default_poll_interval(),
            start_poll_attempts: default_poll_attempts(),
            catalog_namespace: default_catalog_namespace(),
            colors: true,
        }
    }
}

impl AppConfig {
    /// Parsed poll interval
    pub fn poll_interval(&self) -> Result<Duration> {
        humantime::parse_duration(&self.start_poll_interval).map_err(|e| {
            GatherError::Config(format!(
                "Invalid start_poll_interval '{}': {e}",
                self.start_poll_interval
            ))
        })
    }
}

fn default_true() -> bool {
    true
}

fn default_poll_interval() -> String {
    "3s".to_string()
}

fn default_poll_attempts() -> u32 {
    60
}

fn default_catalog_namespace() -> String {
    "openshift-operators".to_string()
}

/// Get the che-gather config directory (~/.che-gather)
pub fn config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".che-gather"))
        .ok_or_else(|| GatherError::Config("Could not determine home directory".to_string()))
}

/// Load application config from ~/.che-gather/config.toml
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_dir()?.join("config.toml"))
}

/// Load application config from an explicit path, defaulting when absent
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| GatherError::Config(e.to_string()))
    } else {
        Ok(AppConfig::default())
    }
}
