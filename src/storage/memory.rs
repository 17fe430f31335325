//! In-memory key-value backend.
//!
//! Clones share the same map, so a test (or a host embedding the core) can keep
//! one handle to inspect exactly what the item store persisted.

use crate::domain::error::{ListkeeperError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Shared in-process key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates a store pre-populated with one slot.
    #[must_use]
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self {
            slots: Arc::new(Mutex::new(slots)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|e| ListkeeperError::Storage(format!("memory store poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        tracing::trace!(key = %key, bytes = value.len(), "memory slot written");
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_each_others_writes() {
        let mut writer = MemoryStore::default();
        let reader = writer.clone();

        writer.set("items", r#"[{"id":1,"name":"milk"}]"#).expect("set");

        assert_eq!(
            reader.get("items").expect("get").as_deref(),
            Some(r#"[{"id":1,"name":"milk"}]"#)
        );
    }

    #[test]
    fn missing_slot_reads_as_none() {
        let store = MemoryStore::default();
        assert!(store.get("items").expect("get").is_none());
    }
}
