//! Tracker configuration loaded from `~/.fieldops/config.toml`.
//!
//! The file is optional; missing fields fall back to their defaults.

use crate::store::{load_templates_fixture, StoreError, StoreOptions};
use crate::utils::fieldops_home;
use crate::workflow::WorkflowSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

fn default_data_dir() -> PathBuf {
    fieldops_home().join("data")
}

fn default_supervisor() -> String {
    "2".to_string()
}

fn default_work_order_format() -> String {
    "orden-trabajo".to_string()
}

fn default_snapshot_retries() -> u32 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// User id receiving new-ticket notifications
    #[serde(default = "default_supervisor")]
    pub supervisor_recipient: String,
    /// `createdBy` and `supervisorId` of orders converted from tickets
    #[serde(default = "default_supervisor")]
    pub acting_supervisor: String,
    #[serde(default = "default_work_order_format")]
    pub default_work_order_format: String,
    #[serde(default = "default_snapshot_retries")]
    pub snapshot_retries: u32,
    /// JSON file replacing the built-in template seed set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_fixture: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            supervisor_recipient: default_supervisor(),
            acting_supervisor: default_supervisor(),
            default_work_order_format: default_work_order_format(),
            snapshot_retries: default_snapshot_retries(),
            templates_fixture: None,
        }
    }
}

impl StoreConfig {
    /// Store options for this configuration, reading the templates fixture
    /// when one is configured.
    pub async fn to_store_options(&self) -> Result<StoreOptions, StoreError> {
        let mut options = StoreOptions::new(&self.data_dir)?;
        options.snapshot_retries = self.snapshot_retries;
        if let Some(fixture) = &self.templates_fixture {
            options.seed_templates = load_templates_fixture(fixture).await?;
        }
        Ok(options)
    }

    #[must_use]
    pub fn workflow_settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            supervisor_recipient: self.supervisor_recipient.clone(),
            acting_supervisor: self.acting_supervisor.clone(),
            default_work_order_format: self.default_work_order_format.clone(),
        }
    }
}

/// Canonical config location.
#[must_use]
pub fn config_path() -> PathBuf {
    fieldops_home().join("config.toml")
}

/// Load the configuration from `path`, or from [`config_path`] when `None`.
///
/// An absent file yields the defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_store_config(path: Option<&Path>) -> Result<StoreConfig, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(StoreConfig::default());
    }
    let content = std::fs::read_to_string(&path)?;
    let config: StoreConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
