//! Listkeeper: the core of a single-list item manager.
//!
//! Users add, rename, delete and reorder named items. The list is persisted
//! to a local key-value slot after every change, and each change is echoed by
//! a short visual transition. This crate is the coordinator that keeps three
//! things consistent:
//! - the ordered item sequence and its persisted mirror
//! - drag sessions from two input modalities (mouse drag and touch drag)
//!   that must commit identical reorders
//! - a queue of visual effects keyed to rendered rows
//!
//! Rendering, forms and modal chrome belong to the presentation layer, which
//! drives the core through [`ListController`] (or [`handle_event`]) and reads
//! back [`ListController::items`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Presentation layer (not in this crate)             │  ← rows, forms, frames
//! └─────────────────────────────────────────────────────┘
//!                        │ Event / RenderSurface
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← ListController
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Storage       │   │ Gestures      │   │ Transitions   │
//! │ (storage/)    │   │ (gesture/)    │   │ (transition/) │
//! │ - ItemStore   │   │ - DragSession │   │ - Requests    │
//! │ - KV backends │   │ - Tracker     │   │ - Coordinator │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Item model, errors (domain/)                     │
//! │  - Data directory resolution (infrastructure/)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Concurrency
//!
//! Everything runs on one thread. Each mutating call completes its
//! read-modify-write-persist cycle before returning. Animations advance only
//! when the host calls [`ListController::tick`], and the one deferred
//! mutation (delete after the remove effect) runs inside that call.
//!
//! # Configuration
//!
//! ```toml
//! storage_key = "items"
//! data_dir = "~/.local/share/listkeeper"
//! trace_level = "debug"
//!
//! [transitions]
//! appear_ms = 400
//! hover_scale = 1.1
//! ```
//!
//! # Example
//!
//! ```rust
//! use listkeeper::app::ListController;
//! use listkeeper::gesture::GestureEvent;
//! use listkeeper::storage::{ItemStore, MemoryStore};
//! use listkeeper::transition::{HandleTable, RowHandle, TransitionSettings};
//!
//! let store = ItemStore::open(Box::new(MemoryStore::default()), "items");
//! let mut controller = ListController::new(store, TransitionSettings::default());
//! let mut rows: HandleTable<RowHandle> = HandleTable::default();
//!
//! controller.add_item("milk");
//! controller.add_item("eggs");
//! rows.sync(controller.items(), |_| RowHandle::default());
//!
//! controller.handle_gesture(GestureEvent::DragStart { index: 0 }, &mut rows);
//! controller.handle_gesture(GestureEvent::Drop { index: 1 }, &mut rows);
//!
//! let names: Vec<_> = controller.items().iter().map(|i| i.name.as_str()).collect();
//! assert_eq!(names, ["eggs", "milk"]);
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod gesture;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod transition;

pub use app::{handle_event, Event, ListController};
pub use domain::{Item, ItemId, ListkeeperError, Result};
pub use transition::TransitionSettings;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use storage::{ItemStore, JsonFileStore, KeyValueStore, MemoryStore};

/// Core configuration.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the key-value slot holding the list.
    pub storage_key: String,

    /// Directory for the storage and trace files. `~` is expanded.
    /// Defaults to [`infrastructure::get_data_dir`].
    pub data_dir: Option<String>,

    /// File name of the JSON key-value store inside `data_dir`.
    pub storage_file: String,

    /// Tracing filter directive, e.g. `"debug"` or `"listkeeper=trace"`.
    /// Default: `"info"`.
    pub trace_level: Option<String>,

    /// Span file size that triggers rotation.
    pub trace_max_bytes: u64,

    /// Rotated span files to keep.
    pub trace_backups: usize,

    /// Effect timings and magnitudes.
    pub transitions: TransitionSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: "items".to_string(),
            data_dir: None,
            storage_file: "storage.json".to_string(),
            trace_level: None,
            trace_max_bytes: 10 * 1024 * 1024,
            trace_backups: 3,
            transitions: TransitionSettings::default(),
        }
    }
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ListkeeperError::Config`] if the document is not valid TOML or
    /// a value has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use listkeeper::Config;
    ///
    /// let config = Config::from_toml_str("storage_key = \"groceries\"\n[transitions]\nremove_ms = 200\n")?;
    /// assert_eq!(config.storage_key, "groceries");
    /// assert_eq!(config.transitions.remove_ms, 200);
    /// assert_eq!(config.transitions.appear_ms, 500);
    /// # Ok::<(), listkeeper::ListkeeperError>(())
    /// ```
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| ListkeeperError::Config(e.to_string()))
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Builds a config from host-supplied string pairs.
    ///
    /// Unknown keys are ignored and unparseable values keep their defaults.
    /// Transition settings use a `transitions.` prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use listkeeper::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("storage_key".to_string(), "groceries".to_string());
    /// map.insert("trace_backups".to_string(), "five".to_string());
    /// map.insert("transitions.hover_scale".to_string(), "1.3".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.storage_key, "groceries");
    /// assert_eq!(config.trace_backups, 3);
    /// assert!((config.transitions.hover_scale - 1.3).abs() < f32::EPSILON);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            storage_key: text("storage_key").unwrap_or(defaults.storage_key),
            data_dir: text("data_dir"),
            storage_file: text("storage_file").unwrap_or(defaults.storage_file),
            trace_level: text("trace_level"),
            trace_max_bytes: text("trace_max_bytes")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.trace_max_bytes),
            trace_backups: text("trace_backups")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.trace_backups),
            transitions: transitions_from_map(map).unwrap_or(defaults.transitions),
        }
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.as_deref().map_or_else(infrastructure::get_data_dir, |dir| {
            PathBuf::from(infrastructure::expand_tilde(dir))
        })
    }

    /// Full path of the JSON key-value store.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage_file)
    }
}

/// Collects `transitions.*` pairs into a TOML table and decodes it.
fn transitions_from_map(map: &BTreeMap<String, String>) -> Option<TransitionSettings> {
    let table: toml::Table = map
        .iter()
        .filter_map(|(key, raw)| {
            let field = key.strip_prefix("transitions.")?;
            let raw = raw.trim();
            let value = raw
                .parse::<i64>()
                .map(toml::Value::Integer)
                .or_else(|_| raw.parse::<f64>().map(toml::Value::Float))
                .ok()?;
            Some((field.to_string(), value))
        })
        .collect();

    if table.is_empty() {
        return None;
    }
    toml::Value::Table(table)
        .try_into()
        .map_err(|e| tracing::debug!(error = %e, "ignoring malformed transition settings"))
        .ok()
}

/// Opens the configured storage and builds a controller over it.
///
/// Never fails: if the storage file cannot be opened the list runs on an
/// in-memory store for this session and the problem is logged.
///
/// # Example
///
/// ```rust,no_run
/// use listkeeper::{initialize, Config};
///
/// let controller = initialize(&Config::default());
/// println!("{} items", controller.items().len());
/// ```
pub fn initialize(config: &Config) -> ListController {
    tracing::debug!("initializing listkeeper");

    let path = config.storage_path();
    let backend: Box<dyn KeyValueStore> = match JsonFileStore::new(path.clone()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "storage unavailable, keeping list in memory");
            Box::new(MemoryStore::default())
        }
    };

    let store = ItemStore::open(backend, config.storage_key.clone());
    ListController::new(store, config.transitions.clone())
}
