//! User statistics snapshot supplied by the caller
//!
//! The snapshot is rebuilt from persisted records before every engine call and
//! is never mutated by the engine.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::streaks::StreakInfo;

/// A single metric value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    /// Compared as whole days elapsed up to the snapshot date
    Date(NaiveDate),
}

/// Flat metric-name -> value mapping, as of a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatsSnapshot {
    pub as_of: NaiveDate,
    #[serde(default)]
    pub metrics: HashMap<String, StatValue>,
}

impl UserStatsSnapshot {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            metrics: HashMap::new(),
        }
    }

    pub fn builder(as_of: NaiveDate) -> StatsBuilder {
        StatsBuilder {
            snapshot: Self::new(as_of),
        }
    }

    /// Numeric value of a metric. Absent metrics read as 0.
    ///
    /// Date metrics yield the days elapsed from the date to `as_of`,
    /// never negative.
    pub fn value(&self, metric: &str) -> f64 {
        match self.metrics.get(metric) {
            Some(StatValue::Number(n)) if n.is_finite() => *n,
            Some(StatValue::Number(_)) => 0.0,
            Some(StatValue::Date(date)) => (self.as_of - *date).num_days().max(0) as f64,
            None => 0.0,
        }
    }

    pub fn get(&self, metric: &str) -> Option<&StatValue> {
        self.metrics.get(metric)
    }

    pub fn set(&mut self, metric: impl Into<String>, value: StatValue) {
        self.metrics.insert(metric.into(), value);
    }
}

/// Typed construction of a snapshot by the statistics provider
#[derive(Debug, Clone)]
pub struct StatsBuilder {
    snapshot: UserStatsSnapshot,
}

impl StatsBuilder {
    pub fn count(mut self, metric: &str, value: u64) -> Self {
        self.snapshot.set(metric, StatValue::Number(value as f64));
        self
    }

    pub fn number(mut self, metric: &str, value: f64) -> Self {
        self.snapshot.set(metric, StatValue::Number(value));
        self
    }

    pub fn date(mut self, metric: &str, value: NaiveDate) -> Self {
        self.snapshot.set(metric, StatValue::Date(value));
        self
    }

    /// Record the current streak computed from activity days.
    ///
    /// The streak only counts if it is still active as of the snapshot date.
    pub fn streak(mut self, metric: &str, activity: &[NaiveDate]) -> Self {
        let info = StreakInfo::from_activity(activity);
        let current = if info.is_active(self.snapshot.as_of) {
            info.current
        } else {
            0
        };
        self.snapshot.set(metric, StatValue::Number(current as f64));
        self
    }

    pub fn build(self) -> UserStatsSnapshot {
        self.snapshot
    }
}
