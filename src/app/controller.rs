//! The single orchestration point behind every user action.
//!
//! [`ListController`] owns the item store, the gesture tracker and the
//! transition coordinator and keeps them consistent:
//!
//! - add and rename mutate immediately, then queue their effect
//! - remove queues its effect first; the delete runs only when the effect's
//!   continuation comes back from [`ListController::tick`]
//! - reorders happen only as the commit of a finished gesture
//!
//! Nothing here returns an error. Every failure mode degrades to a no-op or
//! a skipped effect and is logged.

use crate::domain::{Item, ItemId};
use crate::gesture::{GestureEffect, GestureEvent, GestureTracker};
use crate::storage::ItemStore;
use crate::transition::{
    Continuation, RenderSurface, Target, TransitionCoordinator, TransitionRequest,
    TransitionSettings,
};
use std::time::Duration;

/// Coordinates the item store, gestures and transitions.
///
/// # Examples
///
/// ```
/// use listkeeper::app::ListController;
/// use listkeeper::storage::{IdGenerator, ItemStore, MemoryStore};
/// use listkeeper::transition::{HandleTable, RowHandle, TransitionSettings};
/// use std::time::Duration;
///
/// let store = ItemStore::with_id_generator(
///     Box::new(MemoryStore::default()),
///     "items",
///     IdGenerator::with_clock(|| 0),
/// );
/// let mut controller = ListController::new(store, TransitionSettings::default());
/// let mut rows: HandleTable<RowHandle> = HandleTable::default();
///
/// controller.add_item("milk");
/// rows.sync(controller.items(), |_| RowHandle::default());
///
/// let id = controller.items()[0].id;
/// controller.remove_item(id, 0);
/// assert_eq!(controller.items().len(), 1);
///
/// controller.tick(Duration::from_secs(1), &mut rows);
/// controller.tick(Duration::from_secs(1), &mut rows);
/// assert!(controller.items().is_empty());
/// ```
#[derive(Debug)]
pub struct ListController {
    store: ItemStore,
    gestures: GestureTracker,
    transitions: TransitionCoordinator,
    settings: TransitionSettings,
}

impl ListController {
    #[must_use]
    pub fn new(store: ItemStore, settings: TransitionSettings) -> Self {
        Self {
            store,
            gestures: GestureTracker::new(settings.clone()),
            transitions: TransitionCoordinator::default(),
            settings,
        }
    }

    /// The sequence the presentation layer should render.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    #[must_use]
    pub const fn store(&self) -> &ItemStore {
        &self.store
    }

    #[must_use]
    pub const fn gestures(&self) -> &GestureTracker {
        &self.gestures
    }

    #[must_use]
    pub const fn transitions(&self) -> &TransitionCoordinator {
        &self.transitions
    }

    /// Appends an item and queues its appear effect.
    ///
    /// The effect is delayed briefly so the new row can render first.
    /// Returns the new item's index, or `None` for a blank name.
    pub fn add_item(&mut self, name: &str) -> Option<usize> {
        let _span = tracing::debug_span!("add_item").entered();

        let index = self.store.add(name)?;
        self.transitions
            .enqueue(TransitionRequest::appear(Target::Row(index), &self.settings));
        Some(index)
    }

    /// Renames an item and queues a highlight on it.
    ///
    /// The highlight follows the item's id, so it stays on the renamed row
    /// even if the sequence changes while it plays.
    pub fn rename_item(&mut self, id: ItemId, name: &str) -> Option<usize> {
        let _span = tracing::debug_span!("rename_item", item_id = %id).entered();

        let index = self.store.update(id, name)?;
        self.transitions
            .enqueue(TransitionRequest::highlight(Target::Item(id), &self.settings));
        Some(index)
    }

    /// Starts removing an item.
    ///
    /// Only the remove effect is queued here, against the row at `index` as
    /// currently rendered. The item leaves the sequence (and storage) when the
    /// effect completes or is abandoned, during a later [`tick`](Self::tick).
    pub fn remove_item(&mut self, id: ItemId, index: usize) {
        let _span = tracing::debug_span!("remove_item", item_id = %id, index = index).entered();

        self.transitions
            .enqueue(TransitionRequest::remove(Target::Row(index), id, &self.settings));
    }

    /// Spins the add icon as the add form opens.
    pub fn open_add_form(&mut self) {
        self.transitions
            .enqueue(TransitionRequest::icon_spin(&self.settings));
    }

    /// Feeds a raw drag or touch event through the gesture tracker.
    ///
    /// Live touch motion is applied to `surface` immediately. Returns `true`
    /// when the event committed a reorder.
    pub fn handle_gesture(&mut self, event: GestureEvent, surface: &mut dyn RenderSurface) -> bool {
        let effects = self.gestures.handle(event, self.store.len());
        let mut reordered = false;

        for effect in effects {
            match effect {
                GestureEffect::Feedback(request) => self.transitions.enqueue(request),
                GestureEffect::LiveOffset { target, offset } => {
                    self.transitions.apply_offset(target, offset, surface);
                }
                GestureEffect::Commit { from, to } => {
                    reordered |= self.reorder_item(from, to);
                }
                GestureEffect::Aborted { source } => {
                    tracing::debug!(source_index = source, "gesture aborted without reorder");
                }
            }
        }
        reordered
    }

    /// Advances transitions by `elapsed` and runs any deferred mutations.
    ///
    /// A deferred delete shifts every row after it, so a drag in progress at
    /// that moment would drop the wrong item; it is cancelled instead.
    ///
    /// Returns `true` when the sequence changed and should be re-rendered.
    pub fn tick(&mut self, elapsed: Duration, surface: &mut dyn RenderSurface) -> bool {
        let mut changed = false;
        for continuation in self.transitions.advance(elapsed, surface) {
            match continuation {
                Continuation::DeleteItem(id) => changed |= self.store.delete(id),
            }
        }

        if changed && self.gestures.is_active() {
            tracing::debug!("sequence changed under an active drag, cancelling it");
            self.handle_gesture(GestureEvent::Cancel, surface);
        }
        changed
    }

    fn reorder_item(&mut self, from: usize, to: usize) -> bool {
        let _span = tracing::debug_span!("reorder_item", from = from, to = to).entered();
        self.store.reorder(from, to)
    }
}
