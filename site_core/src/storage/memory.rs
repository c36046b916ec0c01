use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::KeyValueStorage;
use crate::error::Result;

/// In-process storage. Used as the session scope and as the fake in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_overwrite() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set("shared", "yes").unwrap();
        assert_eq!(other.get("shared").unwrap().as_deref(), Some("yes"));
    }
}
