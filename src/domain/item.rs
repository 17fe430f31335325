//! The list item model.
//!
//! An [`Item`] is a named entry in the single ordered list. Its [`ItemId`] is
//! allocated once, never reused, and never changes; only the name is mutable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, monotonically increasing item identifier.
///
/// Serialized as a bare integer so the persisted form stays
/// `[{"id": 1, "name": "milk"}]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named entry in the list.
///
/// # Examples
///
/// ```
/// use listkeeper::domain::{Item, ItemId};
///
/// let mut item = Item::new(ItemId(7), "eggs");
/// item.rename("free-range eggs");
/// assert_eq!(item.id, ItemId(7));
/// assert_eq!(item.name, "free-range eggs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Replaces the display name. The id is untouched.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Returns `true` when `name` is usable for a new item (not empty or blank).
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}
