//! Client-Side Storage
//!
//! The widget reads one blob of session data at mount time. Storage is a
//! small key/value trait so a surface can back it with whatever it has: an
//! in-memory map for tests and embedding, or a directory of JSON files for
//! the terminal surface.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from reading session storage
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key cannot be mapped to a storage location
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Failed to read the stored value
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was attempted
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },
}

/// Read-only key/value session storage
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Fetch the raw value stored under `key`, if any
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
}

/// In-memory storage
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value
    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    /// Builder form of [`MemoryStorage::set_item`]
    #[must_use]
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_item(key, value);
        self
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }
}

/// Directory-backed storage: `<dir>/<key>.json`
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Storage rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default location: `$XDG_DATA_HOME/claim-saathi/session`
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("claim-saathi").join("session"))
    }

    /// Root directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl SessionStorage for JsonFileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }
}
