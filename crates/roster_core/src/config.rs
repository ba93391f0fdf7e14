//! Runtime configuration.
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! configuration.
//!
//! ```rust,ignore
//! let config = RosterConfig::from_env()?.unwrap_or_default();
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};
use thiserror::Error;

use crate::catalog::PROBABLE_STATUS_ID;
use crate::save::manager::DEFAULT_SAVE_FILE;

pub const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG_PATH";

pub const DEFAULT_CATALOG_URL: &str = "https://api.cartola.globo.com/atletas/mercado";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Marketplace endpoint returning the athlete listing
    pub catalog_url: String,

    /// Athletes with any other status are dropped from the catalog
    pub probable_status_id: u32,

    pub save_dir: PathBuf,

    pub save_file: String,

    pub request_timeout_secs: u64,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            probable_status_id: PROBABLE_STATUS_ID,
            save_dir: PathBuf::from("saves"),
            save_file: DEFAULT_SAVE_FILE.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl RosterConfig {
    /// Load from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&content)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RosterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by `ROSTER_CONFIG_PATH`. `None` when the variable
    /// is unset or blank.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(None);
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }

        log::debug!("Loading config from {}='{}'", CONFIG_PATH_ENV, path);
        Self::load(path).map(Some)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.catalog_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "catalog_url must be an http(s) URL, got '{}'",
                self.catalog_url
            )));
        }

        if self.save_file.trim().is_empty() {
            return Err(ConfigError::Invalid("save_file must not be empty".to_string()));
        }

        if Path::new(&self.save_file).components().count() != 1 {
            return Err(ConfigError::Invalid(format!(
                "save_file must be a bare file name, got '{}'",
                self.save_file
            )));
        }

        if !(1..=120).contains(&self.request_timeout_secs) {
            return Err(ConfigError::Invalid(format!(
                "request_timeout_secs must be 1-120, got {}",
                self.request_timeout_secs
            )));
        }

        Ok(())
    }

    pub fn save_path(&self) -> PathBuf {
        self.save_dir.join(&self.save_file)
    }
}
