//! Timing and magnitude parameters for every transition kind.
//!
//! Loaded from the `[transitions]` table of the config file; any key left out
//! keeps its default.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable parameters for the built-in effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    /// Wait before an appear effect starts, so the new row can render first.
    pub appear_delay_ms: u64,
    pub appear_ms: u64,
    /// Vertical offset an appearing row slides in from.
    pub appear_offset_y: f32,
    pub highlight_ms: u64,
    pub remove_ms: u64,
    /// Scale a removed row animates to.
    pub remove_scale: f32,
    pub hover_ms: u64,
    pub hover_scale: f32,
    pub settle_ms: u64,
    pub icon_spin_ms: u64,
    pub icon_spin_degrees: f32,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            appear_delay_ms: 100,
            appear_ms: 500,
            appear_offset_y: -50.0,
            highlight_ms: 1000,
            remove_ms: 300,
            remove_scale: -1.0,
            hover_ms: 300,
            hover_scale: 1.15,
            settle_ms: 300,
            icon_spin_ms: 500,
            icon_spin_degrees: 360.0,
        }
    }
}

impl TransitionSettings {
    #[must_use]
    pub const fn appear_delay(&self) -> Duration {
        Duration::from_millis(self.appear_delay_ms)
    }

    #[must_use]
    pub const fn appear(&self) -> Duration {
        Duration::from_millis(self.appear_ms)
    }

    #[must_use]
    pub const fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    #[must_use]
    pub const fn remove(&self) -> Duration {
        Duration::from_millis(self.remove_ms)
    }

    #[must_use]
    pub const fn hover(&self) -> Duration {
        Duration::from_millis(self.hover_ms)
    }

    #[must_use]
    pub const fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    #[must_use]
    pub const fn icon_spin(&self) -> Duration {
        Duration::from_millis(self.icon_spin_ms)
    }
}
