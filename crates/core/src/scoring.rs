//! Scoring module - row-clear points, level progression and fall speed
//!
//! Points scale with the level at the time of the clear:
//! - every cleared row pays `100 * level`
//! - every row beyond the first in the same tick adds `50 * level`
//!
//! The level goes up once for every 10 completed rows, counted row by row,
//! and each level shortens the fall interval to 3/4 of the previous one.

use crate::types::{
    MULTI_ROW_BONUS, ROWS_PER_LEVEL, ROW_POINTS, SPEEDUP_DENOMINATOR, SPEEDUP_NUMERATOR,
    START_LEVEL,
};

/// Outcome of recording one clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points added to the score
    pub points: u32,
    /// Number of level increments triggered by this clear
    pub levels_gained: u32,
}

/// Points for clearing `cleared` rows in one tick at `level`
pub fn line_clear_score(cleared: u32, level: u32) -> u32 {
    if cleared == 0 {
        return 0;
    }
    let row_points = cleared.saturating_mul(ROW_POINTS.saturating_mul(level));
    let bonus = (cleared - 1).saturating_mul(MULTI_ROW_BONUS.saturating_mul(level));
    row_points.saturating_add(bonus)
}

/// Fall interval for `level`, starting from `base_ms` at level 1
///
/// The interval is truncated after every step, never drops below 1ms.
pub fn tick_interval_ms(base_ms: u32, level: u32) -> u32 {
    let mut interval = base_ms;
    for _ in START_LEVEL..level {
        interval = (u64::from(interval) * u64::from(SPEEDUP_NUMERATOR)
            / u64::from(SPEEDUP_DENOMINATOR)) as u32;
        if interval <= 1 {
            break;
        }
    }
    interval.max(1)
}

/// Score, completed-row count and level of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    score: u32,
    rows_completed: u32,
    level: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            rows_completed: 0,
            level: START_LEVEL,
        }
    }

    /// Resume from saved values
    pub fn from_parts(score: u32, rows_completed: u32, level: u32) -> Self {
        Self {
            score,
            rows_completed,
            level: level.max(START_LEVEL),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rows_completed(&self) -> u32 {
        self.rows_completed
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Apply a clear of `cleared` rows
    ///
    /// Points use the level before the clear; the level is then advanced once
    /// per multiple of 10 crossed.
    pub fn record_clear(&mut self, cleared: u32) -> ScoreResult {
        if cleared == 0 {
            return ScoreResult::default();
        }

        let points = line_clear_score(cleared, self.level);
        self.score = self.score.saturating_add(points);

        let mut levels_gained = 0;
        for _ in 0..cleared {
            self.rows_completed = self.rows_completed.saturating_add(1);
            if self.rows_completed % ROWS_PER_LEVEL == 0 {
                let next = self.level.saturating_add(1);
                if next != self.level {
                    self.level = next;
                    levels_gained += 1;
                }
            }
        }

        ScoreResult {
            points,
            levels_gained,
        }
    }

    /// Bump the level without touching score or rows
    pub fn increase_level(&mut self) {
        self.level = self.level.saturating_add(1);
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
