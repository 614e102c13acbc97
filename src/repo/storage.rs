use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode value for storage: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode stored value: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Byte-oriented key-value slot storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if the slot is empty
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    /// Replace the value stored under `key`
    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}

/// Process-local store, lost on restart
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let slots = self
            .slots
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(slots.get(key).cloned())
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        slots.insert(key.to_string(), value);
        Ok(())
    }
}

static TEMP_SUFFIX: AtomicU64 = AtomicU64::new(0);

/// Store keeping one `<key>.json` file per slot inside a directory.
/// Writes go to a sibling temp file renamed over the slot, so readers
/// only ever see a complete value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        let suffix = TEMP_SUFFIX.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!("{}.json.tmp-{}-{}", key, std::process::id(), suffix))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match tokio::fs::read(self.slot_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let temp = self.temp_path(key);
        tokio::fs::write(&temp, value).await?;
        if let Err(e) = tokio::fs::rename(&temp, self.slot_path(key)).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }
}
