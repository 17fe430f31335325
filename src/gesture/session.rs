//! Drag session state.
//!
//! A [`DragSession`] is the normalized form of one in-progress reorder
//! gesture, whichever input produced it. [`Modality`] is the only place the
//! two inputs differ.

/// Input source that started a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modality {
    /// Mouse drag-and-drop. Tracks the hovered row; no live motion.
    Pointer,
    /// Touch drag. Follows the finger vertically from `start_y`.
    Touch { start_y: f32 },
}

/// One active reorder gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Row index the gesture started on; fixed for the session's lifetime.
    pub source_index: usize,
    pub modality: Modality,
    /// Signed vertical distance from the touch start. Always 0 for pointer.
    pub current_pointer_offset: f32,
    /// Row currently dragged over. Always `None` for touch.
    pub hover_index: Option<usize>,
}

impl DragSession {
    #[must_use]
    pub const fn new(source_index: usize, modality: Modality) -> Self {
        Self {
            source_index,
            modality,
            current_pointer_offset: 0.0,
            hover_index: None,
        }
    }

    #[must_use]
    pub const fn is_touch(&self) -> bool {
        matches!(self.modality, Modality::Touch { .. })
    }
}

/// Lifecycle of the tracker.
///
/// `Dropped` and `Aborted` are momentary: the tracker reports them as
/// outcomes and is back to `Idle` before `handle` returns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Active(DragSession),
}
