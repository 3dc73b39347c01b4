//! Key-value storage backends for persisted preferences.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode stored values: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal string key-value store, the shape of browser local storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local storage. Can be created disabled, in which case every write fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    disabled: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes, as with a privacy mode that blocks local storage.
    pub fn disabled() -> Self {
        Self {
            items: HashMap::new(),
            disabled: true,
        }
    }

    /// Pre-populated storage.
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: items
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            disabled: false,
        }
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable);
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage persisted as a flat JSON object on disk.
///
/// A missing file starts empty. An unreadable or corrupt file also starts
/// empty (with a warning) and is overwritten on the next write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl JsonFileStorage {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring corrupt preferences file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Could not read preferences file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self { path, items }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut next = self.items.clone();
        next.insert(key.to_string(), value.to_string());

        let encoded = serde_json::to_string_pretty(&next)?;
        fs::write(&self.path, encoded).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        self.items = next;
        Ok(())
    }
}
