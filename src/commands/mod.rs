pub mod add;
pub mod list;
pub mod misc;
pub mod show;

pub use add::add_repo;
pub use list::list_repos;
pub use misc::{complete_suggestions, generate_completions};
pub use show::{open_route, show_repo};

use crate::api::HttpApi;
use crate::config::{DuplicatePolicy, ExplorerConfig};
use crate::error::{ApiError, ConfigError};
use crate::store::{LocalStorage, LocalStorageStore};

/// Everything a command needs, resolved from config and CLI overrides.
pub struct Session {
    pub store: LocalStorageStore,
    pub api: HttpApi,
    pub duplicates: DuplicatePolicy,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("can't create HTTP client: {0}")]
    Api(#[from] ApiError),
}

impl Session {
    pub fn open(config: &ExplorerConfig) -> Result<Self, SessionError> {
        let storage = LocalStorage::new(config.storage_path()?);
        tracing::debug!(
            storage = %storage.path().display(),
            api_url = %config.api_url,
            duplicates = ?config.duplicates,
            "session"
        );
        Ok(Session {
            store: LocalStorageStore::new(storage),
            api: HttpApi::new(&config.api_url)?,
            duplicates: config.duplicates,
        })
    }
}
