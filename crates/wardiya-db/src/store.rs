//! String key-value storage abstraction.
//!
//! The week-change tracker only needs get / set / clear of one string value.
//! [`DbPool`] is the persistent implementation; [`MemoryStore`] is a
//! process-local one used by tests and ephemeral sessions.

use crate::pool::{DbError, DbPool, DbResult};
use crate::queries::kv;
use std::collections::HashMap;
use std::sync::Mutex;

/// Minimal string key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> DbResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> DbResult<()>;
    fn clear(&self, key: &str) -> DbResult<()>;
}

impl KeyValueStore for DbPool {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        kv::get_value(self, key)
    }

    fn set(&self, key: &str, value: &str) -> DbResult<()> {
        kv::set_value(self, key, value)
    }

    fn clear(&self, key: &str) -> DbResult<()> {
        kv::delete_value(self, key).map(|_| ())
    }
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. to simulate state left by an earlier session.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        let values = self.values.lock().map_err(|_| DbError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let mut values = self.values.lock().map_err(|_| DbError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> DbResult<()> {
        let mut values = self.values.lock().map_err(|_| DbError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("week").unwrap(), None);
        store.set("week", "12").unwrap();
        assert_eq!(store.get("week").unwrap().as_deref(), Some("12"));
        store.clear("week").unwrap();
        assert_eq!(store.get("week").unwrap(), None);
        // clearing an absent key is not an error
        store.clear("week").unwrap();
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_sqlite_store() {
        let pool = init_memory_pool().unwrap();
        exercise(&pool);
    }

    #[test]
    fn test_seeded_memory_store() {
        let store = MemoryStore::with_value("k", "v");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("wardiya-db-test-{}", std::process::id()));
        let path = dir.join("state.db");
        {
            let pool = crate::init_pool(&path).unwrap();
            pool.set("last", "7").unwrap();
        }
        let pool = crate::init_pool(&path).unwrap();
        assert_eq!(pool.get("last").unwrap().as_deref(), Some("7"));
        drop(pool);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
