//! In-process key-value backend.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;

/// `HashMap`-backed storage with an optional total byte quota.
///
/// The quota counts key and value bytes across all entries, which is how
/// browser storage limits behave.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKvStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend rejecting writes that would exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Total key and value bytes currently stored.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |previous| key.len() + previous.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryKvStore;
    use crate::storage::{KeyValueStore, StorageError};

    #[test]
    fn set_get_remove() {
        let mut store = InMemoryKvStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
    }

    #[test]
    fn quota_counts_replacement_not_double() {
        let mut store = InMemoryKvStore::with_quota(6);
        store.set("k", "12345").unwrap();
        // Replacing the same key frees the old value first.
        store.set("k", "54321").unwrap();

        let err = store.set("k", "123456").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded { needed: 7, quota: 6, .. }
        ));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("54321"));
    }
}
