//! Configuration management for travelform.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mirror::DEFAULT_STORAGE_KEY;
use crate::notice::MAX_TTL;
use crate::payload::DEFAULT_SHEET;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "travelform";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "travelform.db";

/// Spreadsheet script that receives the customer form.
pub const DEFAULT_ENDPOINT_URL: &str = "https://script.google.com/macros/s/AKfycbzLrbL8YkJ2GuJ0jKIr12OhWohydZy3obz22IKtOP4GFM8OnIgq41oVmPUlfEy1aMeSGA/exec";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TRAVELFORM_`)
/// 2. TOML config file at `~/.config/travelform/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint configuration.
    pub endpoint: EndpointConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Notice configuration.
    pub notice: NoticeConfig,
}

/// Where submissions go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Endpoint URL.
    pub url: String,
    /// Sheet name sent with every submission.
    pub sheet: String,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/travelform/travelform.db`
    pub database_path: Option<PathBuf>,
    /// Key the record list is stored under.
    pub key: String,
}

/// Transient message configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// Seconds a success or failure message stays visible.
    pub ttl_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT_URL.to_string(),
            sheet: DEFAULT_SHEET.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self { ttl_secs: 3 }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = Self::resolve_config_path(config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("TRAVELFORM_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration file read for an optional `--config` override.
    #[must_use]
    pub fn resolve_config_path(config_path: Option<PathBuf>) -> PathBuf {
        config_path.unwrap_or_else(Self::default_config_path)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;

        if self.endpoint.sheet.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "endpoint.sheet must not be empty".to_string(),
            });
        }

        if self.storage.key.is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage.key must not be empty".to_string(),
            });
        }

        if self.notice.ttl_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "notice.ttl_secs must be greater than 0".to_string(),
            });
        }

        if self.notice.ttl_secs > MAX_TTL.as_secs() {
            return Err(Error::ConfigValidation {
                message: format!(
                    "notice.ttl_secs must be at most {}, got {}",
                    MAX_TTL.as_secs(),
                    self.notice.ttl_secs
                ),
            });
        }

        Ok(())
    }

    /// Parse the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or is not http(s).
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint.url).map_err(|e| Error::ConfigValidation {
            message: format!("invalid endpoint.url '{}': {e}", self.endpoint.url),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::ConfigValidation {
                message: format!("endpoint.url must use http or https, got '{other}'"),
            }),
        }
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the notice time-to-live as a Duration.
    #[must_use]
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice.ttl_secs)
    }
}
