//! Award recorder - the full caller flow around the engine
//!
//! Dedups the triggering action, credits the award, evaluates achievements
//! and chains against the caller's snapshot, credits their rewards and
//! persists everything in one locked ledger update.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use super::models::{SOURCE_ACHIEVEMENT, SOURCE_CHAIN};
use super::store::LedgerStore;
use crate::gamification::{
    ChainProgressResult, ContextFlags, GamificationEngine, GamificationEvent, PointsAwardResult,
    RegionalContext, StatValue, UserStatsSnapshot,
};

/// Metric injected into the snapshot with the post-award lifetime total
pub const LIFETIME_POINTS_METRIC: &str = "lifetime_points";
/// Metric filled from the ledger's activity streak when the snapshot lacks it
pub const STREAK_DAYS_METRIC: &str = "streak_days";

/// One action to record for one user
#[derive(Debug, Clone)]
pub struct AwardRequest {
    pub user_id: String,
    pub action: String,
    /// Id of the entity that triggered the action (post, answer, vote...)
    pub source_id: String,
    pub flags: ContextFlags,
    pub region: RegionalContext,
    /// Snapshot to evaluate achievements against; skipped when absent
    pub stats: Option<UserStatsSnapshot>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardOutcome {
    /// The (user, action, source_id) triple was already credited
    pub duplicate: bool,
    /// Level fields reflect the lifetime total after reward credits
    pub award: Option<PointsAwardResult>,
    pub progress: ChainProgressResult,
    /// Points credited for unlocks and chain level-ups
    pub reward_points: u32,
    pub lifetime_points: i64,
    pub events: Vec<GamificationEvent>,
}

#[derive(Debug, Clone)]
pub struct AwardRecorder {
    engine: GamificationEngine,
    store: LedgerStore,
}

impl AwardRecorder {
    pub fn new(engine: GamificationEngine, store: LedgerStore) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &GamificationEngine {
        &self.engine
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Record one action. A duplicate is reported, not treated as an error.
    pub fn record(&self, request: &AwardRequest) -> Result<AwardOutcome> {
        self.store.update(|ledger| {
            let now = Utc::now();
            let record = ledger.user_mut(&request.user_id);
            let previous = record.lifetime_points;

            if record.has_transaction(&request.action, &request.source_id) {
                tracing::warn!(
                    user_id = %request.user_id,
                    "Action {}:{} already credited",
                    request.action,
                    request.source_id
                );
                return Ok(AwardOutcome {
                    duplicate: true,
                    lifetime_points: previous,
                    ..Default::default()
                });
            }

            let mut award = self.engine.award_points(
                &request.action,
                &request.flags,
                &request.region,
                previous,
            )?;
            record.credit(
                &request.action,
                &request.source_id,
                award.points,
                award.multiplier,
                now,
            );
            if let Some(days) = record.activity_streak.record(now.date_naive()) {
                tracing::debug!(user_id = %request.user_id, "Activity streak at {} days", days);
            }

            let mut events = vec![GamificationEvent::PointsAwarded {
                amount: award.points,
                reason: request.action.clone(),
            }];

            let mut progress = ChainProgressResult::default();
            let mut reward_points = 0;
            if let Some(stats) = &request.stats {
                let mut stats = stats.clone();
                stats.set(
                    LIFETIME_POINTS_METRIC,
                    StatValue::Number(record.lifetime_points as f64),
                );
                if stats.get(STREAK_DAYS_METRIC).is_none() {
                    stats.set(
                        STREAK_DAYS_METRIC,
                        StatValue::Number(f64::from(record.activity_streak.current)),
                    );
                }

                progress = self.engine.evaluate_chain_progress(
                    &request.user_id,
                    &stats,
                    &record.chain_level_map(),
                    &record.unlocked_set(),
                );

                for id in progress.new_achievements.iter().chain(&progress.discovered_hidden) {
                    record.unlock(id, now);
                    let reward = self
                        .engine
                        .catalog()
                        .achievement(id)
                        .map_or(0, |a| a.points_reward);
                    if reward > 0 && record.credit(SOURCE_ACHIEVEMENT, id, reward, 1.0, now).is_some()
                    {
                        reward_points += reward;
                    }
                }

                for level_up in &progress.level_ups {
                    record.advance_chain(
                        &level_up.chain_id,
                        level_up.new_level,
                        level_up.completed,
                        now,
                    );
                    let reward = level_up.achievement.points_reward;
                    let source_id = format!("{}#{}", level_up.chain_id, level_up.new_level);
                    if reward > 0
                        && record
                            .credit(SOURCE_CHAIN, &source_id, reward, 1.0, now)
                            .is_some()
                    {
                        reward_points += reward;
                    }
                }

                events.extend(self.engine.progress_events(&progress));
                if reward_points > 0 {
                    events.push(GamificationEvent::PointsAwarded {
                        amount: reward_points,
                        reason: "rewards".to_string(),
                    });
                }
            }

            let level_up = self.engine.level_change(previous, record.lifetime_points);
            let level = self.engine.resolve_level(record.lifetime_points);
            award.new_total = level.total_points;
            award.new_level = level.level;
            award.points_to_next_level = level.points_to_next;
            award.leveled_up = level_up.is_some();

            if let Some(level_up) = level_up {
                tracing::info!(
                    user_id = %request.user_id,
                    "Level up: {} -> {} ({})",
                    level_up.old_level,
                    level_up.new_level,
                    level_up.new_title
                );
                events.push(GamificationEvent::LevelUp(level_up));
            }

            tracing::info!(
                user_id = %request.user_id,
                "Recorded {} for {} points ({} reward)",
                request.action,
                award.points,
                reward_points
            );

            Ok(AwardOutcome {
                duplicate: false,
                award: Some(award),
                progress,
                reward_points,
                lifetime_points: record.lifetime_points,
                events,
            })
        })
    }
}
