//! Event dispatch from the presentation layer.
//!
//! The presentation layer can call the [`ListController`] methods directly or
//! funnel everything through [`handle_event`], which is convenient when input
//! arrives as messages.
//!
//! # Example
//!
//! ```rust
//! use listkeeper::app::{handle_event, Event, ListController};
//! use listkeeper::storage::{ItemStore, MemoryStore};
//! use listkeeper::transition::{HandleTable, RowHandle, TransitionSettings};
//!
//! let store = ItemStore::open(Box::new(MemoryStore::default()), "items");
//! let mut controller = ListController::new(store, TransitionSettings::default());
//! let mut rows: HandleTable<RowHandle> = HandleTable::default();
//!
//! let rerender = handle_event(&mut controller, &Event::AddItem { name: "milk".into() }, &mut rows);
//! assert!(rerender);
//! ```

use crate::app::ListController;
use crate::domain::ItemId;
use crate::gesture::GestureEvent;
use crate::transition::RenderSurface;
use std::time::Duration;

/// Everything the presentation layer can report.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The add form was submitted.
    AddItem { name: String },
    /// The rename form was submitted for `id`.
    RenameItem { id: ItemId, name: String },
    /// The delete button on the row at `index` (showing `id`) was pressed.
    RemoveItem { id: ItemId, index: usize },
    /// The add form is opening.
    OpenAddForm,
    /// A drag or touch event on a row.
    Gesture(GestureEvent),
    /// An animation frame; `elapsed` since the previous one.
    Frame { elapsed: Duration },
}

/// Routes an event to the controller.
///
/// Returns `true` when the item sequence changed and should be re-rendered.
pub fn handle_event(
    controller: &mut ListController,
    event: &Event,
    surface: &mut dyn RenderSurface,
) -> bool {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::AddItem { name } => controller.add_item(name).is_some(),
        Event::RenameItem { id, name } => controller.rename_item(*id, name).is_some(),
        Event::RemoveItem { id, index } => {
            controller.remove_item(*id, *index);
            false
        }
        Event::OpenAddForm => {
            controller.open_add_form();
            false
        }
        Event::Gesture(gesture) => controller.handle_gesture(*gesture, surface),
        Event::Frame { elapsed } => controller.tick(*elapsed, surface),
    }
}
