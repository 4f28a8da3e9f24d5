use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u16 = 1440;

/// Half-open minute-of-day interval `[start, end)` on a single date.
///
/// Degenerate intervals (`start >= end`) are a caller error; the placement
/// engine rejects them before any overlap check runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MinuteInterval {
    pub start: u16,
    pub end: u16,
}

impl MinuteInterval {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// True iff the two intervals share at least one minute.
    ///
    /// Covers the case where `other` fully contains `self` as well, since
    /// then `self.start` falls inside `other`.
    pub fn overlaps(&self, other: &MinuteInterval) -> bool {
        (self.start >= other.start && self.start < other.end)
            || (self.end > other.start && self.end <= other.end)
            || (self.start <= other.start && self.end >= other.end)
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.saturating_sub(self.start)
    }
}
