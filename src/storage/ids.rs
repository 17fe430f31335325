//! Item id allocation.
//!
//! Ids are derived from the wall clock in milliseconds but never trust it
//! alone: two adds inside the same millisecond, or a clock that steps
//! backwards, still get strictly increasing ids.

use crate::domain::ItemId;

/// Source of "now" in milliseconds.
pub type MillisClock = fn() -> i64;

fn wall_clock_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Allocates strictly increasing item ids.
///
/// # Examples
///
/// ```
/// use listkeeper::domain::ItemId;
/// use listkeeper::storage::IdGenerator;
///
/// let mut ids = IdGenerator::with_clock(|| 0);
/// assert_eq!(ids.next_id(), ItemId(1));
/// assert_eq!(ids.next_id(), ItemId(2));
/// ```
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: i64,
    clock: MillisClock,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::with_clock(wall_clock_millis)
    }
}

impl IdGenerator {
    /// Creates a generator reading time from `clock`.
    #[must_use]
    pub fn with_clock(clock: MillisClock) -> Self {
        Self { last: 0, clock }
    }

    /// Makes sure future ids are greater than `id`.
    ///
    /// Called with every id loaded from storage so restarts never reuse one.
    pub fn observe(&mut self, id: ItemId) {
        self.last = self.last.max(id.0);
    }

    /// Returns the next id: the current time, or one past the last id
    /// handed out, whichever is larger.
    pub fn next_id(&mut self) -> ItemId {
        let now = (self.clock)();
        self.last = now.max(self.last.saturating_add(1));
        ItemId(self.last)
    }
}
