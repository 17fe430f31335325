//! Gesture state machine: raw drag and touch events in, normalized effects out.
//!
//! ```text
//!            DragStart / TouchStart
//!   Idle ───────────────────────────▶ Active
//!    ▲                                  │  DragOver / DragLeave / TouchMove
//!    │        Drop / TouchEnd           │
//!    ├──────────── (Dropped) ◀──────────┤
//!    │   Cancel / new start             │
//!    └──────────── (Aborted) ◀──────────┘
//! ```
//!
//! Mouse and touch input differ only while the session is active. Both
//! starts go through one `begin` and both ends go through one `finish`, so a
//! given source-to-target motion commits the same reorder either way.
//!
//! The tracker never touches the item store. It returns [`GestureEffect`]s
//! and leaves applying them to the controller.

use super::session::{DragSession, GesturePhase, Modality};
use crate::transition::{Target, TransitionRequest, TransitionSettings};

/// Raw input from the presentation layer, tagged with the row it hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    DragStart { index: usize },
    DragOver { index: usize },
    DragLeave { index: usize },
    Drop { index: usize },
    TouchStart { index: usize, y: f32 },
    TouchMove { y: f32 },
    TouchEnd { index: usize },
    /// The gesture ended without a drop (drag-end outside the list, touch cancel).
    Cancel,
}

/// Result of feeding one event through the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEffect {
    /// Queue a discrete visual effect.
    Feedback(TransitionRequest),
    /// Move a row to follow the finger right now, outside any queue.
    LiveOffset { target: Target, offset: f32 },
    /// Reorder the sequence: remove at `from`, reinsert at `to`.
    Commit { from: usize, to: usize },
    /// A session ended without a commit.
    Aborted { source: usize },
}

/// Tracks at most one drag session.
///
/// # Examples
///
/// ```
/// use listkeeper::gesture::{GestureEffect, GestureEvent, GestureTracker};
/// use listkeeper::transition::TransitionSettings;
///
/// let mut tracker = GestureTracker::new(TransitionSettings::default());
/// tracker.handle(GestureEvent::TouchStart { index: 0, y: 100.0 }, 4);
/// tracker.handle(GestureEvent::TouchMove { y: 180.0 }, 4);
/// let effects = tracker.handle(GestureEvent::TouchEnd { index: 2 }, 4);
///
/// assert!(effects.contains(&GestureEffect::Commit { from: 0, to: 2 }));
/// assert!(!tracker.is_active());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    phase: GesturePhase,
    settings: TransitionSettings,
}

impl GestureTracker {
    #[must_use]
    pub const fn new(settings: TransitionSettings) -> Self {
        Self {
            phase: GesturePhase::Idle,
            settings,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    /// The active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            GesturePhase::Active(session) => Some(session),
            GesturePhase::Idle => None,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.phase, GesturePhase::Active(_))
    }

    /// Feeds one event through the state machine.
    ///
    /// `len` is the current length of the item sequence. Events naming a row
    /// outside it are ignored, so a commit always carries valid indices.
    pub fn handle(&mut self, event: GestureEvent, len: usize) -> Vec<GestureEffect> {
        let _span = tracing::trace_span!("gesture_event", event = ?event).entered();

        match event {
            GestureEvent::DragStart { index } => self.begin(index, Modality::Pointer, len),
            GestureEvent::TouchStart { index, y } => {
                self.begin(index, Modality::Touch { start_y: y }, len)
            }
            GestureEvent::DragOver { index } => self.hover(index, len),
            GestureEvent::DragLeave { index } => self.leave(index, len),
            GestureEvent::TouchMove { y } => self.follow(y),
            GestureEvent::Drop { index } | GestureEvent::TouchEnd { index } => {
                self.finish(index, len)
            }
            GestureEvent::Cancel => self.abort(),
        }
    }

    fn begin(&mut self, index: usize, modality: Modality, len: usize) -> Vec<GestureEffect> {
        if index >= len {
            tracing::debug!(index = index, len = len, "gesture start outside list ignored");
            return Vec::new();
        }

        // A start while active means the previous session never saw its end.
        let effects = self.abort();

        tracing::debug!(source_index = index, modality = ?modality, "drag session started");
        self.phase = GesturePhase::Active(DragSession::new(index, modality));
        effects
    }

    fn hover(&mut self, index: usize, len: usize) -> Vec<GestureEffect> {
        let GesturePhase::Active(session) = &mut self.phase else {
            return Vec::new();
        };
        if session.is_touch() || index >= len || session.hover_index == Some(index) {
            return Vec::new();
        }

        session.hover_index = Some(index);
        vec![GestureEffect::Feedback(TransitionRequest::hover_scale(
            Target::Row(index),
            &self.settings,
        ))]
    }

    fn leave(&mut self, index: usize, len: usize) -> Vec<GestureEffect> {
        let GesturePhase::Active(session) = &mut self.phase else {
            return Vec::new();
        };
        if session.is_touch() || index >= len {
            return Vec::new();
        }

        if session.hover_index == Some(index) {
            session.hover_index = None;
        }
        vec![GestureEffect::Feedback(TransitionRequest::hover_reset(
            Target::Row(index),
            &self.settings,
        ))]
    }

    fn follow(&mut self, y: f32) -> Vec<GestureEffect> {
        let GesturePhase::Active(session) = &mut self.phase else {
            return Vec::new();
        };
        let Modality::Touch { start_y } = session.modality else {
            return Vec::new();
        };

        session.current_pointer_offset = y - start_y;
        vec![GestureEffect::LiveOffset {
            target: Target::Row(session.source_index),
            offset: session.current_pointer_offset,
        }]
    }

    fn finish(&mut self, to: usize, len: usize) -> Vec<GestureEffect> {
        let GesturePhase::Active(session) = std::mem::take(&mut self.phase) else {
            tracing::trace!("drop without a session ignored");
            return Vec::new();
        };

        if to >= len {
            tracing::debug!(to = to, len = len, "drop outside list, aborting session");
            self.phase = GesturePhase::Active(session);
            return self.abort();
        }

        let mut effects = Vec::with_capacity(4);
        if session.is_touch() {
            effects.push(GestureEffect::LiveOffset {
                target: Target::Row(session.source_index),
                offset: 0.0,
            });
        }
        if let Some(hovered) = session.hover_index.filter(|&h| h != to) {
            effects.push(GestureEffect::Feedback(TransitionRequest::hover_reset(
                Target::Row(hovered),
                &self.settings,
            )));
        }
        effects.push(GestureEffect::Commit {
            from: session.source_index,
            to,
        });
        effects.push(GestureEffect::Feedback(TransitionRequest::drop_settle(
            Target::Row(to),
            &self.settings,
        )));

        tracing::debug!(from = session.source_index, to = to, "drag session dropped");
        effects
    }

    /// Ends the active session without committing. Idle is a no-op.
    fn abort(&mut self) -> Vec<GestureEffect> {
        let GesturePhase::Active(session) = std::mem::take(&mut self.phase) else {
            return Vec::new();
        };

        tracing::debug!(source_index = session.source_index, "drag session aborted");

        let mut effects = Vec::with_capacity(3);
        if session.is_touch() {
            effects.push(GestureEffect::LiveOffset {
                target: Target::Row(session.source_index),
                offset: 0.0,
            });
        }
        if let Some(hovered) = session.hover_index {
            effects.push(GestureEffect::Feedback(TransitionRequest::hover_reset(
                Target::Row(hovered),
                &self.settings,
            )));
        }
        effects.push(GestureEffect::Aborted {
            source: session.source_index,
        });
        effects
    }
}
