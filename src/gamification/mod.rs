//! Gamification engine: points, levels, achievements and achievement chains
//!
//! Every operation is a pure function over a validated [`Catalog`] and a
//! caller-supplied [`UserStatsSnapshot`]. Persisting awards and sending
//! notifications is left to the caller.

mod actions;
mod catalog;
mod chains;
mod checker;
mod definitions;
mod engine;
mod error;
mod levels;
mod multipliers;
mod points;
mod stats;
mod streaks;

pub use actions::ActionCatalog;
pub use catalog::Catalog;
pub use chains::{ChainDefinition, ChainLevel};
pub use checker::{evaluate_achievements, evaluate_chain_progress, ChainLevelUp, ChainProgressResult};
pub use definitions::{AchievementCategory, AchievementDefinition, Condition, ConditionType, Rarity};
pub use engine::{GamificationEngine, GamificationEvent, LevelUp};
pub use error::{InvalidActionError, InvalidCatalogError};
pub use levels::{LevelProgress, LevelThresholds, DEFAULT_OVERFLOW_STEP};
pub use multipliers::{ContextFlags, ContextMultipliers, RegionalBonusTable, RegionalContext};
pub use points::{award_points, calculate_points, regional_bonus, PointsAward, PointsAwardResult};
pub use stats::{StatValue, StatsBuilder, UserStatsSnapshot};
pub use streaks::{is_weekend, StreakInfo};
