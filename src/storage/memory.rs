//! In-process key-value store.
//!
//! Holds values in a map for the lifetime of the process. An optional byte
//! quota makes writes fail once the store is full, which is how a browser's
//! local storage behaves when its allowance is used up.

use crate::domain::error::{BookshelfError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;

/// Map-backed key-value store with an optional capacity limit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Vec<u8>>,
    quota: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once keys plus values exceed `bytes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::storage::{KeyValueStore, MemoryStore};
    ///
    /// let mut store = MemoryStore::with_quota(8);
    /// assert!(store.set("k", b"tiny").is_ok());
    /// assert!(store.set("k", b"far too large").is_err());
    /// ```
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Bytes currently used by keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.values.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if let Some(quota) = self.quota {
            let replaced = self.values.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                tracing::debug!(needed, quota, "memory store quota exceeded");
                return Err(BookshelfError::Storage(format!(
                    "quota exceeded: {needed} of {quota} bytes"
                )));
            }
        }

        self.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_counts_replaced_values_once() {
        let mut store = MemoryStore::with_quota(10);

        store.set("key", b"1234567").unwrap();
        store.set("key", b"7654321").unwrap();
        assert_eq!(store.used_bytes(), 10);

        assert!(store.set("k2", b"x").is_err());
        store.remove("key").unwrap();
        store.set("k2", b"x").unwrap();
    }

    #[test]
    fn unlimited_store_accepts_anything() {
        let mut store = MemoryStore::new();
        store.set("big", &vec![0_u8; 1 << 20]).unwrap();
        assert_eq!(store.get("big").unwrap().map(|v| v.len()), Some(1 << 20));
    }
}
