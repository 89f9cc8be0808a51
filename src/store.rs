//! Persistence of the known-repository list.
//!
//! The list lives in one slot of a small string-to-string key-value file,
//! the same shape a browser's local storage has. Everything else in the
//! crate talks to it through [`RepositoryStore`] so tests can swap in
//! [`MemoryStore`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::types::RepositoryRecord;

/// Key of the slot holding the serialized list.
pub const REPOSITORIES_KEY: &str = "@GithubExplorer:repositories";

pub trait RepositoryStore {
    /// An absent or unparsable slot loads as an empty list.
    fn load(&self) -> Result<Vec<RepositoryRecord>, StoreError>;

    /// Overwrites the slot with the whole list.
    fn save(&self, repositories: &[RepositoryRecord]) -> Result<(), StoreError>;
}

fn decode_list(raw: Option<&str>) -> Vec<RepositoryRecord> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(list) => list,
        Err(e) => {
            warn!(error = %e, "stored repository list is unreadable, starting empty");
            Vec::new()
        }
    }
}

/// File-backed key-value storage.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "storage file is corrupt, ignoring it");
                Ok(BTreeMap::new())
            }
        }
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&map)?;
        // rename is atomic on the same filesystem
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), key, "storage written");
        Ok(())
    }
}

/// [`RepositoryStore`] over one slot of a [`LocalStorage`] file.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: LocalStorage,
    key: String,
}

impl LocalStorageStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self::with_key(storage, REPOSITORIES_KEY)
    }

    pub fn with_key(storage: LocalStorage, key: &str) -> Self {
        LocalStorageStore {
            storage,
            key: key.to_string(),
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }
}

impl RepositoryStore for LocalStorageStore {
    fn load(&self) -> Result<Vec<RepositoryRecord>, StoreError> {
        let raw = self.storage.get_item(&self.key)?;
        Ok(decode_list(raw.as_deref()))
    }

    fn save(&self, repositories: &[RepositoryRecord]) -> Result<(), StoreError> {
        let value = serde_json::to_string(repositories)?;
        self.storage.set_item(&self.key, value)
    }
}

/// In-memory slot holding the serialized list, for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with an arbitrary raw value.
    pub fn with_raw(raw: &str) -> Self {
        MemoryStore {
            slot: Mutex::new(Some(raw.to_string())),
        }
    }

    pub fn with_repositories(repositories: &[RepositoryRecord]) -> Result<Self, StoreError> {
        let store = Self::new();
        store.save(repositories)?;
        Ok(store)
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl RepositoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<RepositoryRecord>, StoreError> {
        Ok(decode_list(self.raw().as_deref()))
    }

    fn save(&self, repositories: &[RepositoryRecord]) -> Result<(), StoreError> {
        let value = serde_json::to_string(repositories)?;
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(value);
        Ok(())
    }
}
