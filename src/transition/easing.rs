//! Easing curves mapping linear progress to eased progress.

use serde::{Deserialize, Serialize};

/// Timing curve applied to a tween's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Quadratic ease-out; used when a request does not name a curve.
    #[default]
    Power1Out,
    /// Quartic ease-out, a fast start that settles slowly.
    Power3Out,
}

impl Easing {
    /// Maps `t` in `[0, 1]` to eased progress. Input is clamped.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - inv * inv,
            Self::Power3Out => 1.0 - inv * inv * inv * inv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_both_endpoints() {
        for easing in [Easing::Linear, Easing::Power1Out, Easing::Power3Out] {
            assert!((easing.apply(0.0)).abs() < f32::EPSILON);
            assert!((easing.apply(1.0) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn ease_out_curves_lead_linear() {
        assert!(Easing::Power1Out.apply(0.5) > Easing::Linear.apply(0.5));
        assert!(Easing::Power3Out.apply(0.5) > Easing::Power1Out.apply(0.5));
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert!((Easing::Power3Out.apply(2.0) - 1.0).abs() < f32::EPSILON);
        assert!(Easing::Linear.apply(-1.0).abs() < f32::EPSILON);
    }
}
