//! In-memory secure store implementation.
//!
//! Holds entries in a mutex-guarded map. Useful for tests and for
//! processes that want cache semantics without durable persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use super::SecureStore;
use crate::error::{Result, StoreError};

/// In-memory secure store backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))
    }
}

impl SecureStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.locked()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.locked()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.locked()?.remove(key);
        Ok(())
    }
}
