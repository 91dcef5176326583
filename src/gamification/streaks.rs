//! Streak tracking helpers
//!
//! Streak metrics reach the engine already computed. These helpers let the
//! statistics provider and the ledger compute them from activity days.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Current and best run of consecutive active days
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    pub current: u32,
    pub best: u32,
    pub last_activity_day: Option<NaiveDate>,
}

impl StreakInfo {
    /// Build from activity days (any order, duplicates allowed).
    ///
    /// `current` is the run ending at the most recent activity day.
    pub fn from_activity(days: &[NaiveDate]) -> Self {
        let mut sorted = days.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut info = Self::default();
        let mut run = 0u32;
        let mut previous: Option<NaiveDate> = None;

        for day in sorted {
            run = match previous {
                Some(prev) if (day - prev).num_days() == 1 => run + 1,
                _ => 1,
            };
            info.best = info.best.max(run);
            previous = Some(day);
        }

        info.current = run;
        info.last_activity_day = previous;
        info
    }

    /// Active if the last activity was `today` or the day before
    pub fn is_active(&self, today: NaiveDate) -> bool {
        let Some(last) = self.last_activity_day else {
            return false;
        };
        let days_since = (today - last).num_days();
        (0..=1).contains(&days_since)
    }

    /// Whether activity on `today` would extend the streak (not yet counted today)
    pub fn can_extend(&self, today: NaiveDate) -> bool {
        match self.last_activity_day {
            Some(last) => last < today,
            None => true,
        }
    }

    /// Record activity on `today`; returns the new current count if it changed
    pub fn record(&mut self, today: NaiveDate) -> Option<u32> {
        if !self.can_extend(today) {
            return None;
        }
        self.current = if self.is_active(today) {
            self.current + 1
        } else {
            1
        };
        self.best = self.best.max(self.current);
        self.last_activity_day = Some(today);
        Some(self.current)
    }
}

/// Saturday or Sunday
pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}
