//! Level thresholds and level resolution
//!
//! Levels are derived from cumulative lifetime points. Index `i` of the
//! threshold table is the minimum number of points for level `i + 1`.

use serde::Serialize;

use super::error::InvalidCatalogError;

/// Default open-ended progression step past the last defined level
pub const DEFAULT_OVERFLOW_STEP: u64 = 10_000;

/// Validated, strictly increasing level table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelThresholds {
    thresholds: Vec<u64>,
    titles: Vec<String>,
    overflow_step: u64,
}

/// Result of resolving a lifetime point total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    pub title: String,
    /// Lifetime points after clamping negatives to 0
    pub total_points: u64,
    /// Threshold of the current level
    pub current_threshold: u64,
    /// Threshold the user is working towards (synthetic past the table)
    pub next_threshold: u64,
    /// Always positive
    pub points_to_next: u64,
}

impl LevelThresholds {
    /// Build a level table.
    ///
    /// `titles` may be shorter than `thresholds`; levels without a title fall
    /// back to the last title given (or "Level N" when there are none).
    pub fn new(
        thresholds: Vec<u64>,
        titles: Vec<String>,
        overflow_step: u64,
    ) -> Result<Self, InvalidCatalogError> {
        let first = *thresholds.first().ok_or(InvalidCatalogError::EmptyThresholds)?;
        if first != 0 {
            return Err(InvalidCatalogError::FirstThresholdNotZero(first));
        }

        for (index, pair) in thresholds.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(InvalidCatalogError::NonIncreasingThresholds {
                    index: index + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }

        if overflow_step == 0 {
            return Err(InvalidCatalogError::ZeroOverflowStep);
        }

        Ok(Self {
            thresholds,
            titles,
            overflow_step,
        })
    }

    /// Resolve a lifetime point total to a level.
    ///
    /// Negative totals are treated as 0.
    pub fn resolve(&self, total_lifetime_points: i64) -> LevelProgress {
        let total = total_lifetime_points.max(0) as u64;

        let index = self
            .thresholds
            .iter()
            .rposition(|&threshold| threshold <= total)
            .unwrap_or(0);

        let current_threshold = self.thresholds[index];
        let next_threshold = match self.thresholds.get(index + 1) {
            Some(&next) => next,
            None => self.overflow_target(total),
        };

        LevelProgress {
            level: (index + 1) as u32,
            title: self.title_for(index),
            total_points: total,
            current_threshold,
            next_threshold,
            points_to_next: next_threshold - total,
        }
    }

    pub fn max_level(&self) -> u32 {
        self.thresholds.len() as u32
    }

    pub fn thresholds(&self) -> &[u64] {
        &self.thresholds
    }

    pub fn overflow_step(&self) -> u64 {
        self.overflow_step
    }

    /// (level, threshold, title) for every defined level
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64, String)> + '_ {
        self.thresholds
            .iter()
            .enumerate()
            .map(|(i, &t)| ((i + 1) as u32, t, self.title_for(i)))
    }

    /// Target past the last threshold: `last + step`, advanced by further
    /// steps once the total has reached it. Saturates at `u64::MAX`.
    fn overflow_target(&self, total: u64) -> u64 {
        let last = self.thresholds[self.thresholds.len() - 1];
        let first_target = last.saturating_add(self.overflow_step);
        if total < first_target {
            return first_target;
        }
        let steps_past = (total - first_target) / self.overflow_step + 1;
        first_target.saturating_add(steps_past.saturating_mul(self.overflow_step))
    }

    fn title_for(&self, index: usize) -> String {
        self.titles
            .get(index)
            .or_else(|| self.titles.last())
            .cloned()
            .unwrap_or_else(|| format!("Level {}", index + 1))
    }
}

impl LevelProgress {
    /// Progress from the current threshold to the next one (0.0 - 1.0)
    pub fn progress_to_next(&self) -> f32 {
        let span = self.next_threshold - self.current_threshold;
        if span == 0 {
            return 1.0;
        }
        let into_level = self.total_points.saturating_sub(self.current_threshold);
        (into_level as f32 / span as f32).min(1.0)
    }
}
