//! Visual feedback: transition requests and the coordinator that plays them.
//!
//! # Modules
//!
//! - [`request`]: `TransitionRequest`, targets, tweens, continuations
//! - [`coordinator`]: per-target FIFO scheduling driven by frame ticks
//! - [`surface`]: the lookup capability into rendered elements
//! - [`easing`]: timing curves
//! - [`settings`]: durations and magnitudes for the built-in effects

pub mod coordinator;
pub mod easing;
pub mod request;
pub mod settings;
pub mod surface;

pub use coordinator::TransitionCoordinator;
pub use easing::Easing;
pub use request::{Continuation, Property, Target, TransitionKind, TransitionRequest, Tween};
pub use settings::TransitionSettings;
pub use surface::{HandleTable, RenderSurface, RowHandle, StyleHandle, VisualStyle};
