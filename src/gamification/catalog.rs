//! Validated, read-only bundle of every definition the engine evaluates
//!
//! A catalog is built once at process start and shared by `Arc`. All
//! structural validation happens here, so evaluation never sees a malformed
//! definition.

use std::collections::HashSet;

use super::actions::ActionCatalog;
use super::chains::ChainDefinition;
use super::definitions::AchievementDefinition;
use super::error::InvalidCatalogError;
use super::levels::LevelThresholds;
use super::multipliers::{ContextMultipliers, RegionalBonusTable};

#[derive(Debug, Clone)]
pub struct Catalog {
    actions: ActionCatalog,
    multipliers: ContextMultipliers,
    regional: RegionalBonusTable,
    levels: LevelThresholds,
    achievements: Vec<AchievementDefinition>,
    chains: Vec<ChainDefinition>,
}

impl Catalog {
    pub fn new(
        actions: ActionCatalog,
        multipliers: ContextMultipliers,
        regional: RegionalBonusTable,
        levels: LevelThresholds,
        achievements: Vec<AchievementDefinition>,
        chains: Vec<ChainDefinition>,
    ) -> Result<Self, InvalidCatalogError> {
        multipliers.validate()?;
        regional.validate()?;

        let mut seen = HashSet::new();
        for achievement in &achievements {
            if !seen.insert(achievement.id.as_str()) {
                return Err(InvalidCatalogError::DuplicateAchievement(
                    achievement.id.clone(),
                ));
            }
            if achievement.condition.metric.trim().is_empty() {
                return Err(InvalidCatalogError::EmptyMetric(achievement.id.clone()));
            }
            let target = achievement.condition.target;
            if !target.is_finite() || target < 0.0 {
                return Err(InvalidCatalogError::InvalidTarget {
                    id: achievement.id.clone(),
                    target,
                });
            }
        }

        let mut seen_chains = HashSet::new();
        for chain in &chains {
            if !seen_chains.insert(chain.id.as_str()) {
                return Err(InvalidCatalogError::DuplicateChain(chain.id.clone()));
            }
            chain.validate()?;
        }

        tracing::debug!(
            "Catalog loaded: {} actions, {} levels, {} achievements, {} chains",
            actions.len(),
            levels.max_level(),
            achievements.len(),
            chains.len()
        );

        Ok(Self {
            actions,
            multipliers,
            regional,
            levels,
            achievements,
            chains,
        })
    }

    pub fn actions(&self) -> &ActionCatalog {
        &self.actions
    }

    pub fn multipliers(&self) -> &ContextMultipliers {
        &self.multipliers
    }

    pub fn regional(&self) -> &RegionalBonusTable {
        &self.regional
    }

    pub fn levels(&self) -> &LevelThresholds {
        &self.levels
    }

    /// Every standalone achievement, hidden ones included
    pub fn achievements(&self) -> &[AchievementDefinition] {
        &self.achievements
    }

    /// Achievements shown in public listings
    pub fn public_achievements(&self) -> impl Iterator<Item = &AchievementDefinition> {
        self.achievements.iter().filter(|a| !a.hidden)
    }

    pub fn achievement(&self, id: &str) -> Option<&AchievementDefinition> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn chains(&self) -> &[ChainDefinition] {
        &self.chains
    }

    pub fn chain(&self, id: &str) -> Option<&ChainDefinition> {
        self.chains.iter().find(|c| c.id == id)
    }
}
