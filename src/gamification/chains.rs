//! Progressive multi-level achievement chains

use serde::{Deserialize, Serialize};

use super::definitions::{AchievementCategory, Condition, Rarity};
use super::error::InvalidCatalogError;

/// One stage of a chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLevel {
    /// 1-based position in the chain
    pub level: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub condition: Condition,
    #[serde(default)]
    pub points_reward: u32,
    pub rarity: Rarity,
}

/// A chain of levels unlocked one after another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainDefinition {
    pub id: String,
    pub name: String,
    pub category: AchievementCategory,
    pub total_levels: u32,
    pub levels: Vec<ChainLevel>,
    #[serde(default)]
    pub version: u32,
}

impl ChainDefinition {
    /// Structural checks: level count, numbering and strictly increasing targets
    pub fn validate(&self) -> Result<(), InvalidCatalogError> {
        if self.levels.len() != self.total_levels as usize || self.levels.is_empty() {
            return Err(InvalidCatalogError::LevelCountMismatch {
                chain: self.id.clone(),
                declared: self.total_levels,
                defined: self.levels.len(),
            });
        }

        for (position, level) in self.levels.iter().enumerate() {
            if level.level as usize != position + 1 {
                return Err(InvalidCatalogError::LevelNumbering {
                    chain: self.id.clone(),
                    position: position + 1,
                    found: level.level,
                });
            }
            if level.condition.metric.trim().is_empty() {
                return Err(InvalidCatalogError::EmptyMetric(format!(
                    "{}#{}",
                    self.id, level.level
                )));
            }
            if !level.condition.target.is_finite() || level.condition.target < 0.0 {
                return Err(InvalidCatalogError::InvalidTarget {
                    id: format!("{}#{}", self.id, level.level),
                    target: level.condition.target,
                });
            }
        }

        for pair in self.levels.windows(2) {
            if pair[1].condition.target <= pair[0].condition.target {
                return Err(InvalidCatalogError::NonIncreasingChainTargets {
                    chain: self.id.clone(),
                    level: pair[1].level,
                    previous: pair[0].condition.target,
                    target: pair[1].condition.target,
                });
            }
        }

        Ok(())
    }

    /// Definition of the 1-based `level`, if it exists
    pub fn level(&self, level: u32) -> Option<&ChainLevel> {
        level
            .checked_sub(1)
            .and_then(|index| self.levels.get(index as usize))
    }

    pub fn is_complete(&self, current_level: u32) -> bool {
        current_level >= self.total_levels
    }

    /// Sum of every level's point reward
    pub fn total_points(&self) -> u32 {
        self.levels.iter().map(|l| l.points_reward).sum()
    }
}
