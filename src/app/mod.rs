//! Application layer: the controller and event dispatch.
//!
//! ```text
//! Presentation events → handle_event → ListController ─┬─ ItemStore (mutate + persist)
//!                                                       ├─ GestureTracker (sessions)
//!                                                       └─ TransitionCoordinator (effects)
//!                                   ◀── re-render from ListController::items()
//! ```
//!
//! - [`controller`]: `ListController`, one method per user action
//! - [`handler`]: the `Event` enum and `handle_event` dispatcher

pub mod controller;
pub mod handler;

pub use controller::ListController;
pub use handler::{handle_event, Event};
