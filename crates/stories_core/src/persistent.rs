use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::StoreError;

/// Durable string key/value storage.
///
/// Reads that fail are reported as absent; writes may fail and callers treat
/// that as best-effort.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store. The app uses it when the state file cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.into(), value.into());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Whether the seeded value has been written over yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Holding the value read at creation; the next `set` is not persisted.
    Hydrating,
    Hydrated,
}

/// A write the caller should hand to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub key: String,
    pub value: String,
}

/// A string cell seeded from storage with write-through on change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistentValue {
    key: String,
    value: String,
    phase: Hydration,
}

impl PersistentValue {
    /// Reads `key` from `store`, falling back to `initial` when the stored
    /// value is absent or empty.
    pub fn create(
        key: impl Into<String>,
        initial: impl Into<String>,
        store: &dyn KeyValueStore,
    ) -> Self {
        let key = key.into();
        let value = store
            .get(&key)
            .filter(|stored| !stored.is_empty())
            .unwrap_or_else(|| initial.into());
        Self {
            key,
            value,
            phase: Hydration::Hydrating,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn phase(&self) -> Hydration {
        self.phase
    }

    /// Updates the value and returns the write to schedule, except for the
    /// first call after creation.
    pub fn set(&mut self, value: impl Into<String>) -> Option<PendingWrite> {
        self.value = value.into();
        match self.phase {
            Hydration::Hydrating => {
                self.phase = Hydration::Hydrated;
                None
            }
            Hydration::Hydrated => Some(PendingWrite {
                key: self.key.clone(),
                value: self.value.clone(),
            }),
        }
    }
}
