//! Configuration management
//!
//! Server URL, request timeout, and endpoint layout stored in config.toml.
//! Priority for the URL: CLI argument > KEYCLOUD_URL environment variable > config.toml

use super::Result;
use crate::error::StorageError;
use dirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const URL_ENV: &str = "KEYCLOUD_URL";

/// HTTP method used by the remove endpoint
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RemoveMethod {
    #[default]
    Post,
    Delete,
}

impl RemoveMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoveMethod::Post => "POST",
            RemoveMethod::Delete => "DELETE",
        }
    }
}

/// Paths of the remote credential service endpoints
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub list: String,
    pub add: String,
    pub remove: String,
    pub remove_method: RemoveMethod,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            list: "/getPasswords".to_string(),
            add: "/addPassword".to_string(),
            remove: "/deletePassword".to_string(),
            remove_method: RemoveMethod::Post,
        }
    }
}

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// keycloud server URL
    pub url: Option<String>,
    /// Per-request timeout
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("Failed to parse config file: {}", e),
            })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;

        let app_config_dir = home_dir.join(".config").join("keycloud");
        let config_file = app_config_dir.join("config.toml");

        Ok(config_file)
    }

    /// KEYCLOUD_URL when set, otherwise the configured URL
    pub fn get_url(&self) -> Option<String> {
        std::env::var(URL_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.url.clone())
    }

    pub fn set_url(&mut self, url: String) {
        self.url = Some(url);
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}
