//! Shared fixtures

use std::sync::Arc;

use chrono::NaiveDate;

use woofadaar_points::config::Config;
use woofadaar_points::gamification::{GamificationEngine, StatsBuilder, UserStatsSnapshot};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

pub fn default_engine() -> GamificationEngine {
    let catalog = Config::with_defaults().build_catalog().unwrap();
    GamificationEngine::new(Arc::new(catalog))
}

/// Engine over a TOML catalog, without the built-in defaults merged in
pub fn engine_from_toml(toml: &str) -> GamificationEngine {
    let config: Config = toml::from_str(toml).unwrap();
    let catalog = config.build_catalog().unwrap();
    GamificationEngine::new(Arc::new(catalog))
}

pub fn stats(pairs: &[(&str, u64)]) -> UserStatsSnapshot {
    pairs
        .iter()
        .fold(UserStatsSnapshot::builder(today()), |b: StatsBuilder, (metric, value)| {
            b.count(metric, *value)
        })
        .build()
}
