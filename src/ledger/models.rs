//! Ledger records

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gamification::StreakInfo;

/// Source used for points credited by an achievement unlock
pub const SOURCE_ACHIEVEMENT: &str = "achievement";
/// Source used for points credited by a chain level-up
pub const SOURCE_CHAIN: &str = "chain";

/// One credited award
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointTransaction {
    pub id: Uuid,
    /// Action id, or `achievement` / `chain` for reward credits
    pub source: String,
    /// Id of the triggering entity (post id, achievement id, `chain#level`)
    pub source_id: String,
    pub points: u32,
    pub multiplier: f64,
    pub created_at: DateTime<Utc>,
}

/// Everything persisted for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub lifetime_points: i64,
    /// Achievement id -> unlock time
    #[serde(default)]
    pub unlocked: BTreeMap<String, DateTime<Utc>>,
    /// Chain id -> highest reached level
    #[serde(default)]
    pub chain_levels: BTreeMap<String, u32>,
    /// Chain id -> completion time
    #[serde(default)]
    pub completed_chains: BTreeMap<String, DateTime<Utc>>,
    #[serde(default)]
    pub transactions: Vec<PointTransaction>,
    /// Consecutive days with at least one credited action
    #[serde(default)]
    pub activity_streak: StreakInfo,
}

impl UserRecord {
    pub fn has_transaction(&self, source: &str, source_id: &str) -> bool {
        self.transactions
            .iter()
            .any(|t| t.source == source && t.source_id == source_id)
    }

    /// Append a transaction and add its points to the lifetime total.
    ///
    /// Returns `None` without touching the record when the same
    /// (source, source_id) pair was already credited.
    pub fn credit(
        &mut self,
        source: &str,
        source_id: &str,
        points: u32,
        multiplier: f64,
        now: DateTime<Utc>,
    ) -> Option<&PointTransaction> {
        if self.has_transaction(source, source_id) {
            tracing::warn!("Skipping duplicate award {}:{}", source, source_id);
            return None;
        }

        self.lifetime_points = self.lifetime_points.saturating_add(i64::from(points));
        self.transactions.push(PointTransaction {
            id: Uuid::new_v4(),
            source: source.to_string(),
            source_id: source_id.to_string(),
            points,
            multiplier,
            created_at: now,
        });
        self.transactions.last()
    }

    /// Mark an achievement unlocked. Returns false if it already was.
    pub fn unlock(&mut self, achievement_id: &str, now: DateTime<Utc>) -> bool {
        if self.unlocked.contains_key(achievement_id) {
            return false;
        }
        self.unlocked.insert(achievement_id.to_string(), now);
        true
    }

    /// Raise a chain to `level`. Lower or equal levels are ignored.
    pub fn advance_chain(
        &mut self,
        chain_id: &str,
        level: u32,
        completed: bool,
        now: DateTime<Utc>,
    ) -> bool {
        let current = self.chain_levels.get(chain_id).copied().unwrap_or(0);
        if level <= current {
            return false;
        }
        self.chain_levels.insert(chain_id.to_string(), level);
        if completed {
            self.completed_chains.entry(chain_id.to_string()).or_insert(now);
        }
        true
    }

    /// Unlocked ids in the form the engine expects
    pub fn unlocked_set(&self) -> HashSet<String> {
        self.unlocked.keys().cloned().collect()
    }

    /// Chain levels in the form the engine expects
    pub fn chain_level_map(&self) -> HashMap<String, u32> {
        self.chain_levels
            .iter()
            .map(|(id, level)| (id.clone(), *level))
            .collect()
    }
}

/// All users, keyed by user id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub users: BTreeMap<String, UserRecord>,
}

impl Ledger {
    pub fn user(&self, user_id: &str) -> Option<&UserRecord> {
        self.users.get(user_id)
    }

    pub fn user_mut(&mut self, user_id: &str) -> &mut UserRecord {
        self.users.entry(user_id.to_string()).or_default()
    }
}
