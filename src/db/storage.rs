use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{AppError, AppResult};

use super::{FileStorage, MemoryStorage};

/// Schema version written into every persisted record
pub const RECORD_VERSION: u32 = 1;

/// Named records kept in local storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Preferences,
    MovieDetails,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Preferences => write!(f, "preferences"),
            StorageKey::MovieDetails => write!(f, "movie_details"),
        }
    }
}

/// Raw record persistence
///
/// Backends move opaque strings; versioning and decoding live in [`Storage`].
pub trait StorageBackend: Send + Sync {
    /// Returns the stored contents, or `None` when the record was never written
    fn read(&self, key: &StorageKey) -> AppResult<Option<String>>;

    /// Replaces the record's contents
    fn write(&self, key: &StorageKey, contents: &str) -> AppResult<()>;
}

#[derive(Serialize)]
struct RecordOut<'a, T> {
    version: u32,
    saved_at: DateTime<Utc>,
    data: &'a T,
}

#[derive(Deserialize)]
struct RecordIn {
    version: u32,
    data: serde_json::Value,
}

/// Typed, versioned access to persisted records
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn StorageBackend>,
}

impl Storage {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Storage writing one JSON file per record under `dir`
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStorage::new(dir)))
    }

    /// Storage that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Loads a record
    ///
    /// Malformed contents and records written under another schema version are
    /// reported as absent so callers start from an empty state.
    pub fn load<T: DeserializeOwned>(&self, key: &StorageKey) -> AppResult<Option<T>> {
        let Some(raw) = self.backend.read(key)? else {
            tracing::debug!(record = %key, "Record not found");
            return Ok(None);
        };

        let record: RecordIn = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(record = %key, error = %e, "Discarding unreadable record");
                return Ok(None);
            }
        };

        if record.version != RECORD_VERSION {
            tracing::warn!(
                record = %key,
                found = record.version,
                expected = RECORD_VERSION,
                "Discarding record with incompatible version"
            );
            return Ok(None);
        }

        match serde_json::from_value(record.data) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                tracing::warn!(record = %key, error = %e, "Discarding record with invalid data");
                Ok(None)
            }
        }
    }

    /// Writes a record, replacing any previous contents
    pub fn save<T: Serialize>(&self, key: &StorageKey, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(&RecordOut {
            version: RECORD_VERSION,
            saved_at: Utc::now(),
            data: value,
        })?;

        self.backend.write(key, &json)?;
        tracing::debug!(record = %key, bytes = json.len(), "Record saved");
        Ok(())
    }
}

/// Serialized writer for a single record
///
/// The value is captured while the write lock is held, so when writes race the
/// one that lands last always carries the newest state. Callers hold no lock of
/// their own during the write.
#[derive(Clone)]
pub struct RecordWriter {
    storage: Storage,
    key: StorageKey,
    write_lock: Arc<Mutex<()>>,
}

impl RecordWriter {
    pub fn new(storage: Storage, key: StorageKey) -> Self {
        Self {
            storage,
            key,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Saves the value returned by `snapshot` on the calling thread
    pub fn write_with<T, F>(&self, snapshot: F) -> AppResult<()>
    where
        T: Serialize,
        F: FnOnce() -> T,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let value = snapshot();
        self.storage.save(&self.key, &value)
    }

    /// Same as [`RecordWriter::write_with`], run on the blocking thread pool
    pub async fn write_with_async<T, F>(&self, snapshot: F) -> AppResult<()>
    where
        T: Serialize,
        F: FnOnce() -> T + Send + 'static,
    {
        let writer = self.clone();
        tokio::task::spawn_blocking(move || writer.write_with(snapshot))
            .await
            .map_err(|e| AppError::Storage(format!("{} write task failed: {}", self.key, e)))?
    }
}
