//! Transition requests: one unit of visual feedback bound to a render target.
//!
//! A request names its target, a set of property tweens, timing, and an
//! optional [`Continuation`] the coordinator hands back once the effect has
//! finished or been abandoned. Requests are never persisted.

use super::easing::Easing;
use super::settings::TransitionSettings;
use crate::domain::ItemId;
use std::fmt;
use std::time::Duration;

/// Identity of a rendered element an effect plays against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    /// The row currently rendered at this list position.
    Row(usize),
    /// The row rendering this item, wherever it sits.
    Item(ItemId),
    /// The icon on the "add" button.
    AddIcon,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(index) => write!(f, "row[{index}]"),
            Self::Item(id) => write!(f, "item#{id}"),
            Self::AddIcon => f.write_str("add-icon"),
        }
    }
}

/// What an effect is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Appear,
    Highlight,
    Remove,
    HoverScale,
    HoverReset,
    DropSettle,
    IconSpin,
}

/// Animatable style property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Opacity,
    TranslateY,
    Scale,
    /// Degrees.
    Rotation,
    /// Background highlight strength, 1.0 fully highlighted.
    Highlight,
}

/// Animates one property towards `to`.
///
/// With `from == None` the tween starts at whatever value the target shows
/// when the effect begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub property: Property,
    pub from: Option<f32>,
    pub to: f32,
}

impl Tween {
    #[must_use]
    pub const fn to(property: Property, to: f32) -> Self {
        Self {
            property,
            from: None,
            to,
        }
    }

    #[must_use]
    pub const fn from_to(property: Property, from: f32, to: f32) -> Self {
        Self {
            property,
            from: Some(from),
            to,
        }
    }
}

/// Work the owner must perform once an effect is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    DeleteItem(ItemId),
}

/// A scheduled visual effect.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub kind: TransitionKind,
    pub target: Target,
    /// Wait measured from enqueue time before the effect may start.
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
    pub tweens: Vec<Tween>,
    pub continuation: Option<Continuation>,
}

impl TransitionRequest {
    /// Builds a request with no delay, default easing, and no continuation.
    #[must_use]
    pub fn new(
        kind: TransitionKind,
        target: Target,
        duration: Duration,
        tweens: Vec<Tween>,
    ) -> Self {
        Self {
            kind,
            target,
            delay: Duration::ZERO,
            duration,
            easing: Easing::default(),
            tweens,
            continuation: None,
        }
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub const fn then(mut self, continuation: Continuation) -> Self {
        self.continuation = Some(continuation);
        self
    }

    /// Fade and slide a freshly added row into place.
    #[must_use]
    pub fn appear(target: Target, settings: &TransitionSettings) -> Self {
        Self::new(
            TransitionKind::Appear,
            target,
            settings.appear(),
            vec![
                Tween::from_to(Property::Opacity, 0.0, 1.0),
                Tween::from_to(Property::TranslateY, settings.appear_offset_y, 0.0),
            ],
        )
        .with_delay(settings.appear_delay())
        .with_easing(Easing::Power3Out)
    }

    /// Flash a renamed row and fade the flash out.
    #[must_use]
    pub fn highlight(target: Target, settings: &TransitionSettings) -> Self {
        Self::new(
            TransitionKind::Highlight,
            target,
            settings.highlight(),
            vec![Tween::from_to(Property::Highlight, 1.0, 0.0)],
        )
        .with_easing(Easing::Power3Out)
    }

    /// Shrink a row out before its item is deleted.
    #[must_use]
    pub fn remove(target: Target, id: ItemId, settings: &TransitionSettings) -> Self {
        Self::new(
            TransitionKind::Remove,
            target,
            settings.remove(),
            vec![Tween::to(Property::Scale, settings.remove_scale)],
        )
        .then(Continuation::DeleteItem(id))
    }

    /// Grow the row a dragged item is hovering over.
    #[must_use]
    pub fn hover_scale(target: Target, settings: &TransitionSettings) -> Self {
        Self::new(
            TransitionKind::HoverScale,
            target,
            settings.hover(),
            vec![Tween::to(Property::Scale, settings.hover_scale)],
        )
    }

    #[must_use]
    pub fn hover_reset(target: Target, settings: &TransitionSettings) -> Self {
        Self::new(
            TransitionKind::HoverReset,
            target,
            settings.hover(),
            vec![Tween::to(Property::Scale, 1.0)],
        )
    }

    /// Return a drop target to its neutral transform.
    #[must_use]
    pub fn drop_settle(target: Target, settings: &TransitionSettings) -> Self {
        Self::new(
            TransitionKind::DropSettle,
            target,
            settings.settle(),
            vec![
                Tween::to(Property::Scale, 1.0),
                Tween::to(Property::Opacity, 1.0),
                Tween::to(Property::TranslateY, 0.0),
            ],
        )
    }

    #[must_use]
    pub fn icon_spin(settings: &TransitionSettings) -> Self {
        Self::new(
            TransitionKind::IconSpin,
            Target::AddIcon,
            settings.icon_spin(),
            vec![Tween::from_to(Property::Rotation, 0.0, settings.icon_spin_degrees)],
        )
    }
}
