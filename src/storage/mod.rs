use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::ClientResult;

pub mod file;

pub use file::FileStore;

/// Durable key-value storage port.
///
/// The session layer only ever needs string get/set, so the port stays that
/// narrow; it stands in for the browser's local storage and lets tests inject
/// an in-memory implementation.
pub trait Storage: Send + Sync {
    /// Returns the stored value for `key`, or `None` if absent
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
}

/// In-memory storage, used in tests and as the degraded fallback when no
/// durable location is available
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("session", "abc").unwrap();
        assert_eq!(store.get("session").unwrap(), Some("abc".to_string()));

        store.set("session", "def").unwrap();
        assert_eq!(store.get("session").unwrap(), Some("def".to_string()));
    }
}
