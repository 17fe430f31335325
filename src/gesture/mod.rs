//! Reorder gestures from mouse drag-and-drop and touch drags.
//!
//! - [`session`]: the normalized `DragSession` and tracker phases
//! - [`tracker`]: the state machine turning raw events into effects

pub mod session;
pub mod tracker;

pub use session::{DragSession, GesturePhase, Modality};
pub use tracker::{GestureEffect, GestureEvent, GestureTracker};
