//! Sequencing of visual effects against rendered targets.
//!
//! Every target gets its own FIFO lane: requests for one target play strictly
//! in enqueue order, while lanes for different targets advance side by side.
//! Time is driven from outside through [`TransitionCoordinator::advance`],
//! typically once per animation frame.
//!
//! Effects are cosmetic. A target that is not rendered when its effect should
//! start, or that detaches mid-flight, simply loses the effect. The request's
//! [`Continuation`] is still handed back in that case, so work gated on an
//! effect (deleting a removed item) never waits on a row that is gone.

use super::request::{Continuation, Target, TransitionRequest};
use super::surface::{RenderSurface, VisualStyle};
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

#[derive(Debug)]
struct Pending {
    request: TransitionRequest,
    ready_at: Duration,
}

#[derive(Debug)]
struct Running {
    request: TransitionRequest,
    started_at: Duration,
    /// Resolved start value of each tween, same order as `request.tweens`.
    from: Vec<f32>,
}

#[derive(Debug, Default)]
struct Lane {
    pending: VecDeque<Pending>,
    running: Option<Running>,
    /// When the last effect in this lane ended.
    free_at: Duration,
}

impl Lane {
    fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.running.is_none()
    }
}

enum Step {
    InFlight,
    Finished,
    Detached,
}

/// Schedules transition requests and plays them frame by frame.
///
/// # Examples
///
/// ```
/// use listkeeper::domain::{Item, ItemId};
/// use listkeeper::transition::{
///     HandleTable, RenderSurface, RowHandle, Target, TransitionCoordinator, TransitionRequest,
///     TransitionSettings,
/// };
/// use std::time::Duration;
///
/// let settings = TransitionSettings::default();
/// let mut table: HandleTable<RowHandle> = HandleTable::default();
/// table.sync(&[Item::new(ItemId(1), "milk")], |_| RowHandle::default());
///
/// let mut coordinator = TransitionCoordinator::default();
/// coordinator.enqueue(TransitionRequest::hover_scale(Target::Row(0), &settings));
/// coordinator.advance(Duration::ZERO, &mut table);
/// coordinator.advance(Duration::from_millis(300), &mut table);
///
/// let scale = table.style(Target::Row(0)).map(|s| s.scale);
/// assert_eq!(scale, Some(1.15));
/// assert!(coordinator.is_idle());
/// ```
#[derive(Debug, Default)]
pub struct TransitionCoordinator {
    now: Duration,
    lanes: BTreeMap<Target, Lane>,
}

impl TransitionCoordinator {
    /// Time elapsed on the coordinator clock.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// `true` when nothing is queued or playing.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Number of requests queued or playing for `target`.
    #[must_use]
    pub fn queued_for(&self, target: Target) -> usize {
        self.lanes
            .get(&target)
            .map_or(0, |lane| lane.pending.len() + usize::from(lane.running.is_some()))
    }

    /// Appends a request to its target's lane.
    ///
    /// The request's delay counts from now; it starts once the delay has
    /// passed and every earlier request for the same target is done.
    pub fn enqueue(&mut self, request: TransitionRequest) {
        tracing::debug!(
            kind = ?request.kind,
            target = %request.target,
            delay_ms = request.delay.as_millis() as u64,
            duration_ms = request.duration.as_millis() as u64,
            "transition enqueued"
        );

        let ready_at = self.now.saturating_add(request.delay);
        self.lanes
            .entry(request.target)
            .or_default()
            .pending
            .push_back(Pending { request, ready_at });
    }

    /// Applies a transform immediately, outside any lane.
    ///
    /// Used for continuous pointer-following motion. Returns `false` if the
    /// target is not rendered.
    pub fn apply_offset(
        &self,
        target: Target,
        translate_y: f32,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        let Some(mut style) = surface.style(target) else {
            tracing::trace!(target = %target, "live transform target not rendered");
            return false;
        };
        style.translate_y = translate_y;
        surface.apply_style(target, style)
    }

    /// Moves the clock forward by `elapsed` and plays every lane.
    ///
    /// Returns the continuations of effects that finished or were abandoned
    /// during this step, in the order they ended.
    pub fn advance(
        &mut self,
        elapsed: Duration,
        surface: &mut dyn RenderSurface,
    ) -> Vec<Continuation> {
        self.now = self.now.saturating_add(elapsed);
        let now = self.now;
        let mut finished = Vec::new();

        for (&target, lane) in &mut self.lanes {
            Self::advance_lane(target, lane, now, surface, &mut finished);
        }
        self.lanes.retain(|_, lane| !lane.is_empty());

        finished
    }

    fn advance_lane(
        target: Target,
        lane: &mut Lane,
        now: Duration,
        surface: &mut dyn RenderSurface,
        finished: &mut Vec<Continuation>,
    ) {
        loop {
            if let Some(running) = lane.running.as_ref() {
                match Self::step(target, running, now, surface) {
                    Step::InFlight => return,
                    Step::Finished => {
                        tracing::trace!(
                            target = %target,
                            kind = ?running.request.kind,
                            "transition finished"
                        );
                        lane.free_at = running.started_at.saturating_add(running.request.duration);
                    }
                    Step::Detached => {
                        tracing::debug!(
                            target = %target,
                            kind = ?running.request.kind,
                            "target detached, transition abandoned"
                        );
                        lane.free_at = now;
                    }
                }
                if let Some(done) = lane.running.take() {
                    finished.extend(done.request.continuation);
                }
                continue;
            }

            let ready = lane.pending.front().is_some_and(|p| p.ready_at <= now);
            if !ready {
                return;
            }
            let Some(Pending { request, ready_at }) = lane.pending.pop_front() else {
                return;
            };

            let Some(current) = surface.style(target) else {
                tracing::debug!(
                    target = %target,
                    kind = ?request.kind,
                    "target not rendered, transition dropped"
                );
                finished.extend(request.continuation);
                continue;
            };

            let from = request
                .tweens
                .iter()
                .map(|tween| tween.from.unwrap_or_else(|| current.get(tween.property)))
                .collect();

            // Start when the lane actually became free, not at this frame, so
            // queued effects run back to back.
            lane.running = Some(Running {
                request,
                started_at: ready_at.max(lane.free_at),
                from,
            });
        }
    }

    fn step(
        target: Target,
        running: &Running,
        now: Duration,
        surface: &mut dyn RenderSurface,
    ) -> Step {
        let Some(mut style) = surface.style(target) else {
            return Step::Detached;
        };

        let request = &running.request;
        let progress = if request.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_sub(running.started_at);
            (elapsed.as_secs_f32() / request.duration.as_secs_f32()).min(1.0)
        };
        let eased = request.easing.apply(progress);

        apply_tweens(&mut style, running, eased);

        if !surface.apply_style(target, style) {
            return Step::Detached;
        }

        if progress >= 1.0 {
            Step::Finished
        } else {
            Step::InFlight
        }
    }
}

fn apply_tweens(style: &mut VisualStyle, running: &Running, eased: f32) {
    for (tween, &from) in running.request.tweens.iter().zip(&running.from) {
        let value = if eased >= 1.0 {
            tween.to
        } else {
            (tween.to - from).mul_add(eased, from)
        };
        style.set(tween.property, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Item, ItemId};
    use crate::transition::request::{Property, TransitionKind, Tween};
    use crate::transition::settings::TransitionSettings;
    use crate::transition::surface::{HandleTable, RowHandle};

    fn table(n: i64) -> HandleTable<RowHandle> {
        let items: Vec<Item> = (1..=n).map(|id| Item::new(ItemId(id), "x")).collect();
        let mut table = HandleTable::default();
        table.sync(&items, |_| RowHandle::default());
        table
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn scale_of(table: &HandleTable<RowHandle>, index: usize) -> Option<f32> {
        table.style(Target::Row(index)).map(|s| s.scale)
    }

    #[test]
    fn same_target_requests_play_in_order() {
        let settings = TransitionSettings::default();
        let mut surface = table(1);
        let mut coordinator = TransitionCoordinator::default();

        coordinator.enqueue(TransitionRequest::hover_scale(Target::Row(0), &settings));
        coordinator.enqueue(TransitionRequest::hover_reset(Target::Row(0), &settings));
        assert_eq!(coordinator.queued_for(Target::Row(0)), 2);

        coordinator.advance(Duration::ZERO, &mut surface);
        coordinator.advance(ms(300), &mut surface);
        assert_eq!(scale_of(&surface, 0), Some(1.15));
        assert_eq!(coordinator.queued_for(Target::Row(0)), 1);

        coordinator.advance(ms(300), &mut surface);
        assert_eq!(scale_of(&surface, 0), Some(1.0));
        assert!(coordinator.is_idle());
    }

    #[test]
    fn different_targets_overlap() {
        let settings = TransitionSettings::default();
        let mut surface = table(2);
        let mut coordinator = TransitionCoordinator::default();

        coordinator.enqueue(TransitionRequest::hover_scale(Target::Row(0), &settings));
        coordinator.enqueue(TransitionRequest::hover_scale(Target::Row(1), &settings));
        coordinator.advance(Duration::ZERO, &mut surface);
        coordinator.advance(ms(150), &mut surface);

        let a = scale_of(&surface, 0).expect("row 0");
        let b = scale_of(&surface, 1).expect("row 1");
        assert!(a > 1.0 && a < 1.15);
        assert!((a - b).abs() < f32::EPSILON);
    }

    #[test]
    fn delay_holds_the_effect_back() {
        let settings = TransitionSettings::default();
        let mut surface = table(1);
        let mut coordinator = TransitionCoordinator::default();

        coordinator.enqueue(TransitionRequest::appear(Target::Row(0), &settings));
        coordinator.advance(ms(50), &mut surface);
        assert_eq!(surface.row(0).map(RowHandle::writes), Some(0));

        coordinator.advance(ms(50), &mut surface);
        let style = surface.style(Target::Row(0)).expect("row 0");
        assert!(style.opacity < 0.01);
        assert!((style.translate_y + 50.0).abs() < 0.01);

        coordinator.advance(ms(500), &mut surface);
        let style = surface.style(Target::Row(0)).expect("row 0");
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.translate_y, 0.0);
    }

    #[test]
    fn missing_target_drops_request_but_returns_continuation() {
        let settings = TransitionSettings::default();
        let mut surface = table(1);
        let mut coordinator = TransitionCoordinator::default();

        coordinator.enqueue(TransitionRequest::highlight(Target::Row(7), &settings));
        coordinator.enqueue(TransitionRequest::remove(Target::Row(9), ItemId(3), &settings));

        let done = coordinator.advance(Duration::ZERO, &mut surface);
        assert_eq!(done, vec![Continuation::DeleteItem(ItemId(3))]);
        assert!(coordinator.is_idle());
    }

    #[test]
    fn continuation_waits_for_completion() {
        let settings = TransitionSettings::default();
        let mut surface = table(1);
        let mut coordinator = TransitionCoordinator::default();

        coordinator.enqueue(TransitionRequest::remove(Target::Row(0), ItemId(1), &settings));
        assert!(coordinator.advance(Duration::ZERO, &mut surface).is_empty());
        assert!(coordinator.advance(ms(299), &mut surface).is_empty());

        let done = coordinator.advance(ms(1), &mut surface);
        assert_eq!(done, vec![Continuation::DeleteItem(ItemId(1))]);
        assert_eq!(scale_of(&surface, 0), Some(-1.0));
    }

    #[test]
    fn detaching_mid_flight_abandons_without_blocking_the_lane() {
        let settings = TransitionSettings::default();
        let mut surface = table(1);
        let mut coordinator = TransitionCoordinator::default();

        coordinator.enqueue(TransitionRequest::remove(Target::Row(0), ItemId(1), &settings));
        coordinator.enqueue(TransitionRequest::hover_reset(Target::Row(0), &settings));
        coordinator.advance(ms(100), &mut surface);

        surface.unbind_row(0);
        let done = coordinator.advance(ms(10), &mut surface);

        assert_eq!(done, vec![Continuation::DeleteItem(ItemId(1))]);
        assert!(coordinator.is_idle());
    }

    #[test]
    fn open_tweens_start_from_current_value() {
        let mut surface = table(1);
        let mut coordinator = TransitionCoordinator::default();
        let start = VisualStyle {
            scale: 2.0,
            ..VisualStyle::default()
        };
        assert!(surface.apply_style(Target::Row(0), start));

        coordinator.enqueue(
            TransitionRequest::new(
                TransitionKind::HoverReset,
                Target::Row(0),
                ms(100),
                vec![Tween::to(Property::Scale, 1.0)],
            )
            .with_easing(crate::transition::Easing::Linear),
        );
        coordinator.advance(Duration::ZERO, &mut surface);
        coordinator.advance(ms(50), &mut surface);

        let scale = scale_of(&surface, 0).expect("row 0");
        assert!((scale - 1.5).abs() < 0.001);
    }

    #[test]
    fn apply_offset_bypasses_lanes() {
        let mut surface = table(1);
        let coordinator = TransitionCoordinator::default();

        assert!(coordinator.apply_offset(Target::Row(0), 42.0, &mut surface));
        assert!(!coordinator.apply_offset(Target::Row(3), 42.0, &mut surface));
        assert_eq!(surface.style(Target::Row(0)).map(|s| s.translate_y), Some(42.0));
        assert!(coordinator.is_idle());
    }
}
