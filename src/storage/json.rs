//! JSON file-based key-value backend.
//!
//! All slots live in one human-readable JSON document. Every `set` rewrites the
//! whole file with an atomic write (write-to-temp + rename), so a crash never
//! leaves a half-written list behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1), the document is loaded into memory once
//! - **Write**: O(n), serializes and writes every slot
//! - **Best for**: a handful of slots holding lists of tens to hundreds of items

use crate::domain::error::{ListkeeperError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotFile {
    version: u32,

    #[serde(default)]
    slots: BTreeMap<String, String>,
}

impl Default for SlotFile {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            slots: BTreeMap::new(),
        }
    }
}

/// Key-value store persisted to a single JSON file.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "slots": {
///     "items": "[{\"id\":1,\"name\":\"milk\"}]"
///   }
/// }
/// ```
///
/// Slot values are stored verbatim as strings, so a slot holds exactly what a
/// browser's local storage would.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: SlotFile,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file starts an empty store. A file that exists but does not
    /// parse is treated the same way (logged, not propagated); it is replaced
    /// on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use listkeeper::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::new(PathBuf::from("/tmp/listkeeper/storage.json"))?;
    /// # Ok::<(), listkeeper::ListkeeperError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON slot store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(
                    path = ?file_path,
                    error = %e,
                    "slot file unreadable, starting empty"
                );
                SlotFile::default()
            })
        } else {
            tracing::debug!("no slot file yet, starting empty");
            SlotFile::default()
        };

        tracing::debug!(slot_count = data.slots.len(), "slot store opened");

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<SlotFile> {
        let contents = std::fs::read_to_string(path)?;
        let data: SlotFile = serde_json::from_str(&contents)
            .map_err(|e| ListkeeperError::Storage(format!("failed to parse slot file: {e}")))?;

        if data.version != FORMAT_VERSION {
            tracing::warn!(
                found = data.version,
                expected = FORMAT_VERSION,
                "slot file version differs, reading anyway"
            );
        }
        Ok(data)
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing slot file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "slot file saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span =
            tracing::debug_span!("json_slot_set", key = %key, bytes = value.len()).entered();

        let previous = self.data.slots.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save_to_file() {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => self.data.slots.insert(key.to_string(), old),
                None => self.data.slots.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.data.slots.remove(key).is_some() {
            self.save_to_file()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("storage.json");

        let mut store = JsonFileStore::new(path.clone()).expect("open");
        store.set("items", r#"[{"id":1,"name":"milk"}]"#).expect("set");
        drop(store);

        let reopened = JsonFileStore::new(path).expect("reopen");
        assert_eq!(
            reopened.get("items").expect("get").as_deref(),
            Some(r#"[{"id":1,"name":"milk"}]"#)
        );
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ not json").expect("write");

        let store = JsonFileStore::new(path).expect("open");
        assert!(store.get("items").expect("get").is_none());
    }

    #[test]
    fn remove_deletes_slot_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");

        let mut store = JsonFileStore::new(path.clone()).expect("open");
        store.set("items", "[]").expect("set");
        store.remove("items").expect("remove");

        let reopened = JsonFileStore::new(path).expect("reopen");
        assert!(reopened.get("items").expect("get").is_none());
    }
}
