//! Application configuration
//!
//! A `Config` is assembled in three layers, later layers winning:
//!
//! 1. built-in defaults
//! 2. the TOML config file (`--config`, else `COMPANY_CONFIG`, else
//!    `<config_dir>/company/config.toml`)
//! 3. `COMPANY_DATA_DIR`, `COMPANY_LOG_FILE`, `COMPANY_NOTIFICATION_SECS`

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default lifetime of a notification in seconds
pub const DEFAULT_NOTIFICATION_SECS: u64 = 3;

/// Keys accepted by [`Config::set`]
pub const KEYS: &[&str] = &["data_dir", "log_file", "notification_secs"];

const ENV_CONFIG: &str = "COMPANY_CONFIG";
const ENV_DATA_DIR: &str = "COMPANY_DATA_DIR";
const ENV_LOG_FILE: &str = "COMPANY_LOG_FILE";
const ENV_NOTIFICATION_SECS: &str = "COMPANY_NOTIFICATION_SECS";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `company.db` and the default debug log
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log file used by the TUI when COMPANY_LOG is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Seconds before a notification is dismissed automatically
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_file: None,
            notification_secs: DEFAULT_NOTIFICATION_SECS,
        }
    }
}

impl Config {
    /// Load the configuration and create its data directory
    ///
    /// `path` is an explicit config file from the command line. A missing
    /// file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = Self::file_path(path);
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Parse a config file body; absent keys take their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write the configuration to `path`, or the default config file
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = Self::file_path(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(path)
    }

    /// Config file in effect: the explicit path, else `COMPANY_CONFIG`,
    /// else the platform config directory
    pub fn file_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var(ENV_CONFIG) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("company")
            .join("config.toml")
    }

    /// Set one key from its textual value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "log_file" => self.log_file = optional_path(value),
            "notification_secs" => {
                self.notification_secs = value.trim().parse().with_context(|| {
                    format!(
                        "Invalid value for notification_secs: '{}'. Use a whole number of seconds.",
                        value
                    )
                })?;
            }
            _ => bail!(
                "Unknown configuration key: '{}'\nValid keys: {}",
                key,
                KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Overlay environment variables read through `lookup`
    ///
    /// An unparsable `COMPANY_NOTIFICATION_SECS` is ignored.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup(ENV_LOG_FILE) {
            self.log_file = optional_path(&file);
        }
        if let Some(secs) = lookup(ENV_NOTIFICATION_SECS).and_then(|s| s.trim().parse().ok()) {
            self.notification_secs = secs;
        }
    }

    /// Create the data directory if it is missing
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("company.db")
    }

    /// TUI log file, `debug.log` in the data directory unless set
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}

/// Empty and "none" both mean unset
fn optional_path(value: &str) -> Option<PathBuf> {
    match value.trim() {
        "" | "none" => None,
        path => Some(PathBuf::from(path)),
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("company")
}

fn default_notification_secs() -> u64 {
    DEFAULT_NOTIFICATION_SECS
}
