use crate::error::StorageError;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

/// Client-persisted string storage (`localStorage` in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Default)]
struct MemoryInner {
    entries: BTreeMap<String, String>,
    failing_writes: BTreeSet<String>,
    failing_removes: BTreeSet<String>,
}

/// In-memory store; clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `set` of `key` fail.
    pub fn fail_writes_to(&self, key: &str) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failing_writes.insert(key.into());
        }
    }

    /// Makes every later `remove` of `key` fail.
    pub fn fail_removes_of(&self, key: &str) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failing_removes.insert(key.into());
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn with<R>(
        &self,
        f: impl FnOnce(&mut MemoryInner) -> Result<R, StorageError>,
    ) -> Result<R, StorageError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        f(&mut inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with(|inner| Ok(inner.entries.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with(|inner| {
            if inner.failing_writes.contains(key) {
                return Err(StorageError::Write {
                    key: key.into(),
                    message: "quota exceeded".into(),
                });
            }
            inner.entries.insert(key.into(), value.into());
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with(|inner| {
            if inner.failing_removes.contains(key) {
                return Err(StorageError::Write {
                    key: key.into(),
                    message: "storage locked".into(),
                });
            }
            inner.entries.remove(key);
            Ok(())
        })
    }
}
