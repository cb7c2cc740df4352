//! Key-value storage backends for persisted completion flags.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize storage contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value store scoped to one user/installation
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Values kept in a single JSON object on disk.
///
/// The file is read on every access and rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every future write
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let contents = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, contents).map_err(io_err)
    }
}

/// Non-persistent store, for tests and `--ephemeral` sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("storage.json"));
        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn test_file_store_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");
        let mut store = FileStore::new(&path);

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_corrupt_file_is_error_on_get() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("a").unwrap_err(),
            StorageError::Corrupt { .. }
        ));
    }

    #[test]
    fn test_file_store_set_replaces_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let mut store = FileStore::new(&path);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_file_store_write_failure_is_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail
        let path = temp_dir.path().join("storage.json");
        fs::create_dir_all(&path).unwrap();

        let mut store = FileStore::new(&path);
        assert!(store.set("a", "1").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
