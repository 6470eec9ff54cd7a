//! Local key/value backends
//!
//! `FileStore` keeps every entry in one JSON object on disk and rewrites the
//! file on each change. `MemoryStore` is the same contract without a file.
//! All operations complete immediately.

use super::{KeyValueStore, StorageError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name used inside a store directory
pub const STORE_FILE: &str = "store.json";

/// JSON-file backed store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or start) the store file at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::from(e)),
        };
        debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    /// Open `store.json` inside a directory
    pub fn in_dir(dir: &Path) -> Result<Self, StorageError> {
        Self::open(dir.join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.persist()
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_set_and_get() {
        let (_dir, mut store) = setup_test_dir();
        assert_eq!(store.get("current_save").unwrap(), None);

        store.set("current_save", "{\"a\":1}").unwrap();
        assert_eq!(store.get("current_save").unwrap().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_persists_across_open() {
        let (dir, mut store) = setup_test_dir();
        store.set("k", "v").unwrap();

        let reopened = FileStore::in_dir(dir.path()).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_delete() {
        let (dir, mut store) = setup_test_dir();
        store.set("k", "v").unwrap();
        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        // Deleting again should be OK
        store.delete("k").unwrap();
        assert_eq!(FileStore::in_dir(dir.path()).unwrap().get("k").unwrap(), None);
    }

    #[test]
    fn test_flush() {
        let (dir, mut store) = setup_test_dir();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.flush().unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(FileStore::in_dir(dir.path()).unwrap().get("b").unwrap(), None);
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::open(dir.path().join("deep/nested/store.json")).unwrap();
        store.set("k", "v").unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(STORE_FILE), "not json").unwrap();
        assert!(matches!(FileStore::in_dir(dir.path()), Err(StorageError::Serde(_))));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.len(), 1);
        store.delete("missing").unwrap();
        store.flush().unwrap();
        assert!(store.is_empty());
    }
}
