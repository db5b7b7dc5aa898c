//! Configuration management for newsdaily.
//!
//! Configuration is read from `~/.config/newsdaily/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use crate::domain::Frequency;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub defaults: DeliveryDefaults,
}

/// Where the subscription service lives and how to talk to it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL that endpoint paths such as `/api/stats` are joined onto
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// User agent string to send
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or(concat!("newsdaily/", env!("CARGO_PKG_VERSION")))
    }
}

/// Delivery settings a fresh preferences form starts from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeliveryDefaults {
    pub preferred_time: String,
    pub timezone: String,
    pub frequency: Frequency,
    pub max_articles: u32,
}

impl Default for DeliveryDefaults {
    fn default() -> Self {
        Self {
            preferred_time: "10:00".to_string(),
            timezone: "Asia/Kolkata".to_string(),
            frequency: Frequency::Daily,
            max_articles: 5,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/newsdaily/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsdaily").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# newsdaily configuration

[api]
# Base URL of the subscription service
base_url = "http://localhost:5000"

# Request timeout in seconds. A request that takes longer fails with a
# transport error instead of hanging.
timeout_secs = 10

# user_agent = "newsdaily/0.1.0"

[defaults]
# Starting values for a new preferences form
preferred_time = "10:00"
timezone = "Asia/Kolkata"

# daily, weekly or monthly
frequency = "daily"

# 3, 5, 10 or 15
max_articles = 5
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
