//! Achievement and chain checking logic
//!
//! Both checks are read-only: they report what became true and leave
//! persistence to the caller.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::catalog::Catalog;
use super::chains::ChainLevel;
use super::stats::UserStatsSnapshot;

/// A chain that moved up one level
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainLevelUp {
    pub chain_id: String,
    pub new_level: u32,
    pub achievement: ChainLevel,
    /// The new level is the chain's last
    pub completed: bool,
}

/// Everything that changed for one user in one evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainProgressResult {
    pub level_ups: Vec<ChainLevelUp>,
    /// Newly satisfied public achievements
    pub new_achievements: Vec<String>,
    /// Newly satisfied hidden achievements
    pub discovered_hidden: Vec<String>,
}

impl ChainProgressResult {
    pub fn is_empty(&self) -> bool {
        self.level_ups.is_empty()
            && self.new_achievements.is_empty()
            && self.discovered_hidden.is_empty()
    }
}

/// Ids of standalone achievements that are satisfied and not yet unlocked,
/// in catalog order
pub fn evaluate_achievements(
    catalog: &Catalog,
    stats: &UserStatsSnapshot,
    already_unlocked: &HashSet<String>,
) -> Vec<String> {
    let mut newly_unlocked = Vec::new();

    for achievement in catalog.achievements() {
        if already_unlocked.contains(&achievement.id) {
            continue;
        }
        if achievement.is_satisfied(stats) {
            tracing::debug!(
                "Achievement '{}' satisfied ({} >= {})",
                achievement.id,
                stats.value(&achievement.condition.metric),
                achievement.condition.target
            );
            newly_unlocked.push(achievement.id.clone());
        }
    }

    newly_unlocked
}

/// Advance each chain by at most one level and collect newly satisfied
/// standalone achievements, split into public and hidden
pub fn evaluate_chain_progress(
    catalog: &Catalog,
    user_id: &str,
    stats: &UserStatsSnapshot,
    current_levels: &HashMap<String, u32>,
    already_unlocked: &HashSet<String>,
) -> ChainProgressResult {
    let mut result = ChainProgressResult::default();

    for chain in catalog.chains() {
        let current = current_levels.get(&chain.id).copied().unwrap_or(0);
        if chain.is_complete(current) {
            continue;
        }

        let next_level = current + 1;
        let Some(next) = chain.level(next_level) else {
            continue;
        };

        if next.condition.is_satisfied(stats) {
            tracing::debug!(
                user_id,
                "Chain '{}' advanced {} -> {}",
                chain.id,
                current,
                next_level
            );
            result.level_ups.push(ChainLevelUp {
                chain_id: chain.id.clone(),
                new_level: next_level,
                achievement: next.clone(),
                completed: next_level == chain.total_levels,
            });
        }
    }

    for id in evaluate_achievements(catalog, stats, already_unlocked) {
        let hidden = catalog.achievement(&id).is_some_and(|a| a.hidden);
        if hidden {
            result.discovered_hidden.push(id);
        } else {
            result.new_achievements.push(id);
        }
    }

    result
}
