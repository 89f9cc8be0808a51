use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::api::DEFAULT_API_URL;
use crate::error::ConfigError;

const APP_DIR: &str = "repo-explorer";

/// What to do when a looked-up repository is already in the list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Append another entry.
    #[default]
    Allow,
    /// Keep the existing entry and drop the new one.
    Ignore,
    /// Replace the existing entry in place.
    Refresh,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExplorerConfig {
    pub api_url: String,
    pub duplicates: DuplicatePolicy,
    /// Storage file; `<config_dir>/repo-explorer/storage.json` when unset.
    pub storage_path: Option<PathBuf>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        ExplorerConfig {
            api_url: DEFAULT_API_URL.to_string(),
            duplicates: DuplicatePolicy::default(),
            storage_path: None,
        }
    }
}

impl ExplorerConfig {
    /// Loads the config at the default location, or defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(app_dir()?.join("config.json"))
    }

    pub fn storage_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => Ok(app_dir()?.join("storage.json")),
        }
    }
}

fn app_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(ConfigError::NoConfigDir)
}
