use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::AppResult;

use super::{StorageBackend, StorageKey};

/// Process-local record storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &StorageKey) -> AppResult<Option<String>> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &StorageKey, contents: &str) -> AppResult<()> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.insert(*key, contents.to_string());
        Ok(())
    }
}
