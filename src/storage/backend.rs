//! Key-value storage backend abstraction.
//!
//! The list is persisted into a single named slot of a string-valued key-value
//! store, the same contract a browser's local storage offers. [`KeyValueStore`]
//! abstracts that slot so the item store can run against a JSON file on disk
//! or a purely in-memory map.

use crate::domain::error::Result;

/// A string-valued key-value store.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): all slots in one JSON file, atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): shared in-process map
///
/// # Examples
///
/// ```
/// use listkeeper::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("items", "[]")?;
/// assert_eq!(store.get("items")?.as_deref(), Some("[]"));
/// # Ok::<(), listkeeper::ListkeeperError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be completed.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes the slot. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<()>;
}
