//! Achievement definitions and metadata

use serde::{Deserialize, Serialize};

use super::stats::UserStatsSnapshot;

/// Condition type tag.
///
/// The tag records the catalog author's intent. All four are evaluated the
/// same way: the metric must reach the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    Count,
    /// The metric already holds a running streak length
    Streak,
    Milestone,
    Special,
}

impl ConditionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Streak => "streak",
            Self::Milestone => "milestone",
            Self::Special => "special",
        }
    }
}

/// Unlock condition: `stats[metric] >= target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: ConditionType,
    pub target: f64,
    pub metric: String,
}

impl Condition {
    pub fn is_satisfied(&self, stats: &UserStatsSnapshot) -> bool {
        stats.value(&self.metric) >= self.target
    }

    /// Progress towards the target (0.0 - 1.0)
    pub fn progress(&self, stats: &UserStatsSnapshot) -> f64 {
        if self.target <= 0.0 {
            return 1.0;
        }
        (stats.value(&self.metric) / self.target).clamp(0.0, 1.0)
    }
}

/// Rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

/// Achievement category for grouping in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Community,
    Health,
    Social,
    Engagement,
    Expertise,
    Milestone,
    Special,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Community => "Community",
            Self::Health => "Health & Care",
            Self::Social => "Social",
            Self::Engagement => "Engagement",
            Self::Expertise => "Expertise",
            Self::Milestone => "Milestones",
            Self::Special => "Special",
        }
    }
}

/// Standalone achievement definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub category: AchievementCategory,
    /// Informational only
    #[serde(default)]
    pub points_required: u32,
    pub condition: Condition,
    pub rarity: Rarity,
    /// Hidden achievements are left out of public listings
    #[serde(default)]
    pub hidden: bool,
    /// Points the caller credits when the achievement unlocks
    #[serde(default)]
    pub points_reward: u32,
    /// Used when merging built-in defaults into user configuration
    #[serde(default)]
    pub version: u32,
}

impl AchievementDefinition {
    pub fn is_satisfied(&self, stats: &UserStatsSnapshot) -> bool {
        self.condition.is_satisfied(stats)
    }
}
