//! Recurrence timing shared by every scheduled event kind
//!
//! All timing is in integer day offsets from the plan's epoch (the subject's
//! birth date). Calendar conversion happens outside the engine.

use serde::{Deserialize, Serialize};

/// A day offset far enough out to mean "no end".
pub const NO_END: i64 = i64::MAX;

fn no_end() -> i64 {
    NO_END
}

/// When and how often a scheduled event fires.
///
/// The rule: an event always fires on its `start_time`. A recurring event
/// additionally fires on every `frequency_days`-th day after `start_time`,
/// up to and including `end_time`. Fractional frequencies are rounded to
/// whole days; a rounded cadence of zero or less disables the recurring
/// branch entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub start_time: i64,
    #[serde(default = "no_end")]
    pub end_time: i64,
    #[serde(default)]
    pub frequency_days: f64,
    #[serde(default)]
    pub is_recurring: bool,
}

impl Recurrence {
    /// A single firing on `start_time` with no recurring branch.
    pub fn once(start_time: i64) -> Self {
        Self {
            start_time,
            end_time: NO_END,
            frequency_days: 0.0,
            is_recurring: false,
        }
    }

    /// Fires on `start_time` and every `frequency_days` after, forever.
    pub fn every(start_time: i64, frequency_days: f64) -> Self {
        Self {
            start_time,
            end_time: NO_END,
            frequency_days,
            is_recurring: true,
        }
    }

    #[must_use]
    pub fn until(mut self, end_time: i64) -> Self {
        self.end_time = end_time;
        self
    }

    /// Whole-day cadence of the recurring branch.
    pub fn cadence_days(&self) -> i64 {
        self.frequency_days.round() as i64
    }

    pub fn fires_on(&self, day: i64) -> bool {
        if day == self.start_time {
            return true;
        }
        if !self.is_recurring || day < self.start_time || day > self.end_time {
            return false;
        }
        let cadence = self.cadence_days();
        cadence > 0 && (day - self.start_time) % cadence == 0
    }
}
