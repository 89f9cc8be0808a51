use thiserror::Error;

use crate::types::DecodeError;

/// Failures talking to the remote API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("repository not found: {0}")]
    NotFound(String),
    #[error("GitHub API error: HTTP {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failures reading or writing the local storage file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("can't determine a config directory")]
    NoConfigDir,
    #[error("can't read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Errors surfaced by a dashboard action.
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("repository identifier is empty")]
    Validation,
    #[error("lookup of {identifier} failed: {source}")]
    Lookup {
        identifier: String,
        #[source]
        source: ApiError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}
