//! Domain layer: the item model and the crate error type.
//!
//! Nothing here knows about storage backends, gestures, or rendering.
//!
//! - [`error`]: Error types and result alias
//! - [`item`]: The `Item` record and its identifier
//!
//! # Examples
//!
//! ```
//! use listkeeper::domain::{Item, ItemId};
//!
//! let item = Item::new(ItemId(1), "milk");
//! assert_eq!(item.name, "milk");
//! ```

pub mod error;
pub mod item;

pub use error::{ListkeeperError, Result};
pub use item::{Item, ItemId};
