//! Save Persistence
//!
//! A small key/value abstraction with a file-backed and an in-memory store,
//! plus an HTTP client for the remote save endpoint. `SaveService` ties them
//! together for the game loop:
//! - the local write happens synchronously on an explicit save request
//! - the remote POST runs on a background thread and is polled each frame
//!
//! Failures are reported to the caller and logged; nothing here retries.

pub mod local;
#[cfg(not(target_arch = "wasm32"))]
pub mod remote;
pub mod async_ops;

use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};
use crate::game::layout::read_layout_file;
use crate::save::{Save, SaveError, CURRENT_SAVE_KEY};
use async_ops::PendingUpload;

pub use local::{FileStore, MemoryStore};
#[cfg(not(target_arch = "wasm32"))]
pub use remote::RemoteSave;

/// Storage error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Key or file not found
    #[error("not found: {0}")]
    NotFound(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
    /// Transport failure talking to the remote endpoint
    #[error("network error: {0}")]
    Network(String),
    /// Remote endpoint answered with something other than 200
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            _ => StorageError::Io(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serde(e.to_string())
    }
}

impl From<SaveError> for StorageError {
    fn from(e: SaveError) -> Self {
        StorageError::Serde(e.to_string())
    }
}

/// Minimal key/value store
pub trait KeyValueStore {
    /// Value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a missing key is not an error
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
    /// Drop every entry
    fn flush(&mut self) -> Result<(), StorageError>;
}

/// Local + remote save pipeline used by the frame loop
pub struct SaveService<S: KeyValueStore> {
    store: S,
    #[cfg(not(target_arch = "wasm32"))]
    remote: Option<RemoteSave>,
    pending: Option<PendingUpload>,
}

impl<S: KeyValueStore> SaveService<S> {
    /// Service without a remote endpoint
    pub fn local_only(store: S) -> Self {
        Self {
            store,
            #[cfg(not(target_arch = "wasm32"))]
            remote: None,
            pending: None,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_remote(store: S, remote: RemoteSave) -> Self {
        Self {
            store,
            remote: Some(remote),
            pending: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The save stored under `current_save`, if any
    pub fn load_current(&self) -> Result<Option<Save>, StorageError> {
        match self.store.get(CURRENT_SAVE_KEY)? {
            Some(json) => Ok(Some(Save::from_json(&json)?)),
            None => Ok(None),
        }
    }

    /// Save to resume from: the stored `current_save` if it is readable,
    /// else a fresh one built from `layout_file` and stored right away
    pub fn current_or_new(&mut self, name: &str, level: u32, layout_file: &Path) -> Result<Save, StorageError> {
        match self.load_current() {
            Ok(Some(save)) => {
                info!("Resuming {}", save.pretty());
                return Ok(save);
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable current save: {}", e),
        }

        let map = read_layout_file(layout_file).map_err(|e| StorageError::Io(e.to_string()))?;
        let save = Save::new(name, level, map);
        self.store.set(CURRENT_SAVE_KEY, &save.to_json()?)?;
        info!("Started new save {} from {}", save.pretty(), layout_file.display());
        Ok(save)
    }

    /// Write the save locally, then start the upload if none is in flight.
    ///
    /// Only the local write can fail here; upload results arrive via `poll`.
    pub fn save(&mut self, save: &Save) -> Result<(), StorageError> {
        self.store.set(CURRENT_SAVE_KEY, &save.to_json()?)?;
        info!("Saved {} locally", save.pretty());
        self.start_upload(save);
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn start_upload(&mut self, save: &Save) {
        let Some(remote) = &self.remote else {
            return;
        };
        if self.pending.is_some() {
            info!("Remote save still in flight, skipping upload");
            return;
        }
        self.pending = Some(async_ops::upload_async(remote.clone(), save.clone()));
    }

    #[cfg(target_arch = "wasm32")]
    fn start_upload(&mut self, _save: &Save) {}

    pub fn upload_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Check the in-flight upload; returns its outcome once it finishes
    pub fn poll(&mut self) -> Option<Result<u16, StorageError>> {
        let pending = self.pending.as_mut()?;
        if !pending.op.is_complete() {
            return None;
        }
        let pending = self.pending.take()?;
        let name = pending.name;
        let result = pending
            .op
            .take()
            .unwrap_or_else(|| Err(StorageError::Network("upload result lost".into())));
        match &result {
            Ok(status) => info!("Remote save for {} accepted ({})", name, status),
            Err(e) => warn!("Remote save for {} failed: {}", name, e),
        }
        Some(result)
    }

    /// Block until the in-flight upload finishes (used at shutdown)
    pub fn wait(&mut self) -> Option<Result<u16, StorageError>> {
        while self.pending.is_some() {
            if let Some(result) = self.poll() {
                return Some(result);
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Save {
        Save {
            name: "Player 1".into(),
            score: 3,
            level: 0,
            map: vec!["XPX".into(), "XXX".into()],
            created_at: "2024-05-01".into(),
        }
    }

    #[test]
    fn test_save_writes_current_save_key() {
        let mut service = SaveService::local_only(MemoryStore::new());
        assert_eq!(service.load_current().unwrap(), None);

        service.save(&sample()).unwrap();
        let raw = service.store().get(CURRENT_SAVE_KEY).unwrap().unwrap();
        assert_eq!(Save::from_json(&raw).unwrap(), sample());
        assert_eq!(service.load_current().unwrap(), Some(sample()));
        assert!(!service.upload_pending());
        assert!(service.poll().is_none());
    }

    #[test]
    fn test_corrupt_save_is_serde_error() {
        let mut store = MemoryStore::new();
        store.set(CURRENT_SAVE_KEY, "{not json").unwrap();
        let service = SaveService::local_only(store);
        assert!(matches!(service.load_current(), Err(StorageError::Serde(_))));
    }

    #[test]
    fn test_current_or_new_creates_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let layout = dir.path().join("level.txt");
        std::fs::write(&layout, "X X\nXPX\nXXX\n").unwrap();

        let mut service = SaveService::local_only(MemoryStore::new());
        let save = service.current_or_new("Ana", 0, &layout).unwrap();
        assert_eq!(save.map, vec!["X X", "XPX", "XXX"]);
        assert_eq!(save.score, 0);
        assert_eq!(service.load_current().unwrap(), Some(save));
    }

    #[test]
    fn test_current_or_new_prefers_stored_save() {
        let mut service = SaveService::local_only(MemoryStore::new());
        service.save(&sample()).unwrap();
        let save = service.current_or_new("Ana", 0, Path::new("does/not/exist.txt")).unwrap();
        assert_eq!(save, sample());
    }

    #[test]
    fn test_current_or_new_missing_file() {
        let mut service = SaveService::local_only(MemoryStore::new());
        let result = service.current_or_new("Ana", 0, Path::new("does/not/exist.txt"));
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_unreachable_remote_does_not_fail_save() {
        use std::time::Duration;

        // Nothing listens on the discard port
        let remote = RemoteSave::new("http://127.0.0.1:9/save", Duration::from_millis(200));
        let mut service = SaveService::with_remote(MemoryStore::new(), remote);
        service.save(&sample()).unwrap();
        assert!(service.upload_pending());

        // A second request while in flight only writes locally
        let mut second = sample();
        second.score = 4;
        service.save(&second).unwrap();
        assert_eq!(service.load_current().unwrap().map(|s| s.score), Some(4));

        let result = service.wait().expect("upload finished");
        assert!(matches!(result, Err(StorageError::Network(_))));
        assert!(!service.upload_pending());
    }
}
