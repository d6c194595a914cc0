//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use penndining_api::feed::{BACKUP_FEED_URL, DEFAULT_TIMEOUT, PRIMARY_FEED_URL};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Venue feed settings.
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Venue feed configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedConfig {
    /// Primary feed endpoint.
    #[serde(default = "default_primary_url")]
    pub primary_url: String,
    /// Backup feed endpoint, used when the primary fails.
    #[serde(default = "default_backup_url")]
    pub backup_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_primary_url() -> String {
    String::from(PRIMARY_FEED_URL)
}

fn default_backup_url() -> String {
    String::from(BACKUP_FEED_URL)
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            primary_url: default_primary_url(),
            backup_url: default_backup_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FeedConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
