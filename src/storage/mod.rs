//! Storage layer: the persisted item sequence.
//!
//! # Modules
//!
//! - `backend`: key-value slot abstraction
//! - `json`: JSON file backend with atomic writes
//! - `memory`: in-process backend
//! - `ids`: monotonic id allocation
//! - `items`: the `ItemStore` owning the ordered sequence

pub mod backend;
pub mod ids;
pub mod items;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use ids::IdGenerator;
pub use items::ItemStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
