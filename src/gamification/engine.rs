//! Gamification engine - entry point for callers
//!
//! Wraps a shared, validated [`Catalog`] and exposes every engine operation.
//! The engine holds no mutable state; one instance can serve any number of
//! users concurrently.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use super::catalog::Catalog;
use super::checker::{self, ChainLevelUp, ChainProgressResult};
use super::definitions::AchievementDefinition;
use super::error::InvalidActionError;
use super::levels::LevelProgress;
use super::multipliers::{ContextFlags, RegionalContext};
use super::points::{self, PointsAward, PointsAwardResult};
use super::stats::UserStatsSnapshot;

/// A level up derived from lifetime points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    pub new_title: String,
}

/// Events a caller forwards to its notification dispatcher
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GamificationEvent {
    PointsAwarded { amount: u32, reason: String },
    LevelUp(LevelUp),
    AchievementUnlocked { id: String, name: String, hidden: bool },
    ChainLevelUp(ChainLevelUp),
    ChainCompleted { chain_id: String },
}

#[derive(Debug, Clone)]
pub struct GamificationEngine {
    catalog: Arc<Catalog>,
}

impl GamificationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ========================================
    // POINTS & LEVELS
    // ========================================

    pub fn calculate_points(
        &self,
        action: &str,
        flags: &ContextFlags,
    ) -> Result<PointsAward, InvalidActionError> {
        points::calculate_points(&self.catalog, action, flags)
    }

    pub fn regional_bonus(&self, region: &RegionalContext) -> f64 {
        points::regional_bonus(&self.catalog, region)
    }

    pub fn award_points(
        &self,
        action: &str,
        flags: &ContextFlags,
        region: &RegionalContext,
        previous_lifetime_points: i64,
    ) -> Result<PointsAwardResult, InvalidActionError> {
        points::award_points(&self.catalog, action, flags, region, previous_lifetime_points)
    }

    pub fn resolve_level(&self, total_lifetime_points: i64) -> LevelProgress {
        self.catalog.levels().resolve(total_lifetime_points)
    }

    /// Level change caused by moving from `before` to `after` lifetime points
    pub fn level_change(&self, before: i64, after: i64) -> Option<LevelUp> {
        let old = self.resolve_level(before);
        let new = self.resolve_level(after);
        (new.level > old.level).then(|| LevelUp {
            old_level: old.level,
            new_level: new.level,
            new_title: new.title,
        })
    }

    // ========================================
    // ACHIEVEMENTS & CHAINS
    // ========================================

    pub fn evaluate_achievements(
        &self,
        stats: &UserStatsSnapshot,
        already_unlocked: &HashSet<String>,
    ) -> Vec<String> {
        checker::evaluate_achievements(&self.catalog, stats, already_unlocked)
    }

    pub fn evaluate_chain_progress(
        &self,
        user_id: &str,
        stats: &UserStatsSnapshot,
        current_levels: &HashMap<String, u32>,
        already_unlocked: &HashSet<String>,
    ) -> ChainProgressResult {
        checker::evaluate_chain_progress(
            &self.catalog,
            user_id,
            stats,
            current_levels,
            already_unlocked,
        )
    }

    /// Translate a chain evaluation into notification events
    pub fn progress_events(&self, progress: &ChainProgressResult) -> Vec<GamificationEvent> {
        let mut events = Vec::new();

        let unlocked = progress
            .new_achievements
            .iter()
            .chain(&progress.discovered_hidden)
            .filter_map(|id| self.catalog.achievement(id));
        for achievement in unlocked {
            events.push(unlocked_event(achievement));
        }

        for level_up in &progress.level_ups {
            events.push(GamificationEvent::ChainLevelUp(level_up.clone()));
            if level_up.completed {
                events.push(GamificationEvent::ChainCompleted {
                    chain_id: level_up.chain_id.clone(),
                });
            }
        }

        events
    }

    /// Points the caller should credit for the unlocks and level-ups in `progress`
    pub fn progress_points(&self, progress: &ChainProgressResult) -> u32 {
        let achievement_points: u32 = progress
            .new_achievements
            .iter()
            .chain(&progress.discovered_hidden)
            .filter_map(|id| self.catalog.achievement(id))
            .map(|a| a.points_reward)
            .sum();
        let chain_points: u32 = progress
            .level_ups
            .iter()
            .map(|l| l.achievement.points_reward)
            .sum();
        achievement_points + chain_points
    }
}

fn unlocked_event(achievement: &AchievementDefinition) -> GamificationEvent {
    GamificationEvent::AchievementUnlocked {
        id: achievement.id.clone(),
        name: achievement.name.clone(),
        hidden: achievement.hidden,
    }
}
