//! The authoritative ordered item sequence and its persisted mirror.
//!
//! [`ItemStore`] owns the in-memory `Vec<Item>` and rewrites the whole sequence
//! into one key-value slot after every committed mutation. There is no
//! batching and no debounce: when a mutating call returns, storage matches
//! memory.
//!
//! Nothing here returns an error. Unreadable storage loads as an empty list,
//! unknown ids are no-ops, and a mutation whose write fails is logged and
//! undone in memory, so the caller sees the same `None`/`false` as a no-op.

use crate::domain::item::is_valid_name;
use crate::domain::{Item, ItemId};
use crate::storage::backend::KeyValueStore;
use crate::storage::ids::IdGenerator;
use std::collections::HashSet;

/// Ordered list of items mirrored into a key-value slot.
///
/// # Examples
///
/// ```
/// use listkeeper::storage::{IdGenerator, ItemStore, MemoryStore};
///
/// let mut store = ItemStore::with_id_generator(
///     Box::new(MemoryStore::default()),
///     "items",
///     IdGenerator::with_clock(|| 0),
/// );
/// assert_eq!(store.add("milk"), Some(0));
/// assert_eq!(store.add("eggs"), Some(1));
/// assert!(store.reorder(0, 1));
/// let names: Vec<_> = store.items().iter().map(|i| i.name.as_str()).collect();
/// assert_eq!(names, ["eggs", "milk"]);
/// ```
pub struct ItemStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    items: Vec<Item>,
    ids: IdGenerator,
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("key", &self.key)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl ItemStore {
    /// Opens the slot `key` in `backend` and loads whatever it holds.
    pub fn open(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self::with_id_generator(backend, key, IdGenerator::default())
    }

    /// Like [`ItemStore::open`], with an explicit id source.
    pub fn with_id_generator(
        backend: Box<dyn KeyValueStore>,
        key: impl Into<String>,
        mut ids: IdGenerator,
    ) -> Self {
        let key = key.into();
        let items = read_slot(backend.as_ref(), &key);
        for item in &items {
            ids.observe(item.id);
        }

        tracing::debug!(key = %key, item_count = items.len(), "item store opened");

        Self {
            backend,
            key,
            items,
            ids,
        }
    }

    /// Reads the sequence straight from storage, bypassing the in-memory copy.
    ///
    /// Returns an empty list if the slot is missing, empty, or does not parse.
    #[must_use]
    pub fn load(&self) -> Vec<Item> {
        read_slot(self.backend.as_ref(), &self.key)
    }

    /// Current sequence in display order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of the item with `id`, if present.
    #[must_use]
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Appends a new item and returns its index (`len - 1`).
    ///
    /// Blank names are rejected with `None` and nothing is written. A failed
    /// write also returns `None` and leaves the sequence as it was.
    pub fn add(&mut self, name: &str) -> Option<usize> {
        if !is_valid_name(name) {
            tracing::debug!("rejected blank item name");
            return None;
        }

        let id = self.ids.next_id();
        self.items.push(Item::new(id, name));
        if !self.persist() {
            self.items.pop();
            return None;
        }

        let index = self.items.len() - 1;
        tracing::debug!(item_id = %id, index = index, "item added");
        Some(index)
    }

    /// Renames the item with `id` in place and returns its index.
    ///
    /// Unknown ids, and writes that fail, return `None` and leave storage
    /// untouched.
    pub fn update(&mut self, id: ItemId, name: &str) -> Option<usize> {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(item_id = %id, "update of unknown item ignored");
            return None;
        };

        let previous = self.items[index].name.clone();
        self.items[index].rename(name);
        if !self.persist() {
            self.items[index].name = previous;
            return None;
        }

        tracing::debug!(item_id = %id, index = index, "item renamed");
        Some(index)
    }

    /// Removes the item with `id`.
    ///
    /// Returns `false` if it was not present or the write failed.
    pub fn delete(&mut self, id: ItemId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(item_id = %id, "delete of unknown item ignored");
            return false;
        };

        let item = self.items.remove(index);
        if !self.persist() {
            self.items.insert(index, item);
            return false;
        }

        tracing::debug!(item_id = %id, index = index, "item deleted");
        true
    }

    /// Moves the item at `from` so it ends up at `to`.
    ///
    /// `from` indexes the sequence before removal, `to` the sequence after
    /// removal (splice semantics), so both must be `< len`. Out-of-range
    /// indices are refused and logged; the gesture layer is expected to never
    /// produce them.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.items.len();
        if from >= len || to >= len {
            tracing::warn!(from = from, to = to, len = len, "reorder out of range ignored");
            return false;
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);
        if !self.persist() {
            let item = self.items.remove(to);
            self.items.insert(from, item);
            return false;
        }

        tracing::debug!(from = from, to = to, "item reordered");
        true
    }

    /// Writes the whole sequence. On `false` the caller rolls back.
    fn persist(&mut self) -> bool {
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize items");
                return false;
            }
        };

        match self.backend.set(&self.key, &json) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "failed to persist items, rolling back"
                );
                false
            }
        }
    }
}

/// Decodes the slot, degrading every failure to an empty list.
///
/// Duplicate ids keep their first occurrence.
fn read_slot(backend: &dyn KeyValueStore, key: &str) -> Vec<Item> {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "failed to read item slot");
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    let parsed: Vec<Item> = match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "item slot is malformed, loading empty list");
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(parsed.len());
    parsed
        .into_iter()
        .filter(|item| seen.insert(item.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const KEY: &str = "items";

    fn store_with(backend: MemoryStore) -> ItemStore {
        ItemStore::with_id_generator(Box::new(backend), KEY, IdGenerator::with_clock(|| 0))
    }

    fn names(store: &ItemStore) -> Vec<&str> {
        store.items().iter().map(|i| i.name.as_str()).collect()
    }

    /// Accepts `remaining` writes, then refuses every one after.
    struct LimitedWrites {
        inner: MemoryStore,
        remaining: usize,
    }

    impl KeyValueStore for LimitedWrites {
        fn get(&self, key: &str) -> crate::domain::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> crate::domain::Result<()> {
            if self.remaining == 0 {
                return Err(crate::domain::ListkeeperError::Storage("disk full".to_string()));
            }
            self.remaining -= 1;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> crate::domain::Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_writes_roll_back_every_mutation() {
        let backend = MemoryStore::default();
        let limited = LimitedWrites {
            inner: backend.clone(),
            remaining: 2,
        };
        let mut store =
            ItemStore::with_id_generator(Box::new(limited), KEY, IdGenerator::with_clock(|| 0));
        store.add("milk");
        store.add("eggs");
        let persisted = backend.get(KEY).expect("get");
        let (milk, eggs) = (store.items()[0].id, store.items()[1].id);

        assert_eq!(store.add("bread"), None);
        assert_eq!(store.update(milk, "oat milk"), None);
        assert!(!store.delete(eggs));
        assert!(!store.reorder(0, 1));

        assert_eq!(names(&store), ["milk", "eggs"]);
        assert_eq!(store.load().as_slice(), store.items());
        assert_eq!(backend.get(KEY).expect("get"), persisted);
    }

    #[test]
    fn missing_empty_and_malformed_slots_load_empty() {
        assert!(store_with(MemoryStore::default()).is_empty());
        assert!(store_with(MemoryStore::with_slot(KEY, "")).is_empty());
        assert!(store_with(MemoryStore::with_slot(KEY, "null")).is_empty());
        assert!(store_with(MemoryStore::with_slot(KEY, "{\"id\":1}")).is_empty());
        assert!(store_with(MemoryStore::with_slot(KEY, "[{\"id\":\"x\"}]")).is_empty());
    }

    #[test]
    fn add_rejects_blank_names() {
        let backend = MemoryStore::default();
        let mut store = store_with(backend.clone());

        assert_eq!(store.add(""), None);
        assert_eq!(store.add("   "), None);
        assert!(store.is_empty());
        assert!(backend.get(KEY).expect("get").is_none());
    }

    #[test]
    fn add_persists_whole_sequence() {
        let backend = MemoryStore::default();
        let mut store = store_with(backend.clone());

        store.add("milk");
        store.add("eggs");

        assert_eq!(
            backend.get(KEY).expect("get").as_deref(),
            Some(r#"[{"id":1,"name":"milk"},{"id":2,"name":"eggs"}]"#)
        );
    }

    #[test]
    fn update_keeps_position_and_id() {
        let mut store = store_with(MemoryStore::default());
        store.add("milk");
        store.add("eggs");
        let id = store.items()[1].id;

        assert_eq!(store.update(id, "bread"), Some(1));
        assert_eq!(names(&store), ["milk", "bread"]);
        assert_eq!(store.items()[1].id, id);
    }

    #[test]
    fn unknown_ids_leave_storage_byte_identical() {
        let backend = MemoryStore::default();
        let mut store = store_with(backend.clone());
        store.add("milk");
        let before = backend.get(KEY).expect("get");

        assert_eq!(store.update(ItemId(999), "nope"), None);
        assert!(!store.delete(ItemId(999)));

        assert_eq!(backend.get(KEY).expect("get"), before);
    }

    #[test]
    fn reorder_uses_splice_semantics() {
        let mut store = store_with(MemoryStore::default());
        for name in ["A", "B", "C", "D"] {
            store.add(name);
        }

        assert!(store.reorder(0, 2));
        assert_eq!(names(&store), ["B", "C", "A", "D"]);

        assert!(store.reorder(3, 0));
        assert_eq!(names(&store), ["D", "B", "C", "A"]);
    }

    #[test]
    fn reorder_out_of_range_is_refused() {
        let backend = MemoryStore::default();
        let mut store = store_with(backend.clone());
        store.add("A");
        store.add("B");
        let before = backend.get(KEY).expect("get");

        assert!(!store.reorder(2, 0));
        assert!(!store.reorder(0, 2));
        assert_eq!(names(&store), ["A", "B"]);
        assert_eq!(backend.get(KEY).expect("get"), before);
    }

    #[test]
    fn loaded_ids_seed_the_generator() {
        let backend = MemoryStore::with_slot(KEY, r#"[{"id":41,"name":"old"}]"#);
        let mut store = store_with(backend);

        store.add("new");
        assert_eq!(store.items()[1].id, ItemId(42));
    }

    #[test]
    fn duplicate_ids_in_storage_keep_first() {
        let slot = r#"[{"id":1,"name":"a"},{"id":1,"name":"b"},{"id":2,"name":"c"}]"#;
        let backend = MemoryStore::with_slot(KEY, slot);
        let store = store_with(backend);
        assert_eq!(names(&store), ["a", "c"]);
    }
}
