//! Game clock model.
//!
//! Converts (period, clock-remaining) into continuous elapsed game minutes.
//! Regulation periods 1-4 are 12 minutes each; overtime periods (5+) are
//! 5 minutes each. The formula extrapolates linearly for any OT period, no
//! upper bound is enforced.

use serde::{Deserialize, Serialize};

const REGULATION_PERIOD_MIN: f32 = 12.0;
const REGULATION_TOTAL_MIN: f32 = 48.0;
const OVERTIME_PERIOD_MIN: f32 = 5.0;

/// Elapsed game minutes for a shot taken at the given clock state.
///
/// Monotonically increasing across increasing period / decreasing clock.
pub fn elapsed_minutes(period: u32, minutes_remaining: u32, seconds_remaining: u32) -> f32 {
    let minutes = minutes_remaining as f32;
    let seconds = seconds_remaining as f32;
    if period <= 4 {
        (period as f32 - 1.0) * REGULATION_PERIOD_MIN
            + (REGULATION_PERIOD_MIN - minutes)
            + (60.0 - seconds) / 60.0
    } else {
        REGULATION_TOTAL_MIN
            + (period as f32 - 5.0) * OVERTIME_PERIOD_MIN
            + (OVERTIME_PERIOD_MIN - minutes)
            + (60.0 - seconds) / 60.0
    }
}

/// Half-open window `[start, end)` in elapsed game minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f32,
    pub end: f32,
}

impl TimeWindow {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, elapsed_min: f32) -> bool {
        elapsed_min >= self.start && elapsed_min < self.end
    }

    /// Window length in minutes. May be <= 0 for degenerate selections;
    /// binning maps that to zero frequency rather than dividing by it.
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }
}

impl Default for TimeWindow {
    /// Full regulation game.
    fn default() -> Self {
        Self { start: 0.0, end: REGULATION_TOTAL_MIN }
    }
}
