//! Key/value persistence for the onboarding flag.
//!
//! The session only ever stores one value (`isOnboarded = "true"`), but the
//! interface is a plain key/value store so hosts can back it with whatever
//! they already have. [`crate::db::Database`] is the on-device implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use crate::db::DbError;

/// Key under which onboarding completion is persisted.
pub const ONBOARDED_KEY: &str = "isOnboarded";

/// Value written to [`ONBOARDED_KEY`] on completion.
pub const ONBOARDED_VALUE: &str = "true";

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the onboarding flag.
    pub fn onboarded() -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(ONBOARDED_KEY.to_string(), ONBOARDED_VALUE.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(ONBOARDED_KEY).unwrap(), None);

        store.set(ONBOARDED_KEY, ONBOARDED_VALUE).unwrap();
        assert_eq!(store.get(ONBOARDED_KEY).unwrap(), Some("true".into()));
    }

    #[test]
    fn test_onboarded_store() {
        let store = MemoryStore::onboarded();
        assert_eq!(store.get(ONBOARDED_KEY).unwrap(), Some("true".into()));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".into()));
    }
}
