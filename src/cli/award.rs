//! Award command: record an action in the ledger

use std::path::PathBuf;

use anyhow::Result;

use woofadaar_points::config::Config;
use woofadaar_points::gamification::{ContextFlags, GamificationEvent, RegionalContext};
use woofadaar_points::ledger::{AwardRecorder, AwardRequest};

use super::{build_engine, ledger_store, print_json, read_stats};

#[derive(Debug, Clone, Default)]
pub struct AwardArgs {
    pub user: String,
    pub action: String,
    pub source_id: String,
    pub flags: ContextFlags,
    pub region: RegionalContext,
    pub stats: Option<PathBuf>,
    pub ledger: Option<PathBuf>,
    pub json: bool,
}

pub fn award_command(config: &Config, args: AwardArgs) -> Result<()> {
    let engine = build_engine(config)?;
    let store = ledger_store(config, args.ledger.as_ref());
    let stats = args.stats.as_deref().map(read_stats).transpose()?;

    let recorder = AwardRecorder::new(engine, store);
    let outcome = recorder.record(&AwardRequest {
        user_id: args.user.clone(),
        action: args.action,
        source_id: args.source_id,
        flags: args.flags,
        region: args.region,
        stats,
    })?;

    if args.json {
        return print_json(&outcome);
    }

    if outcome.duplicate {
        println!("Already credited, nothing recorded.");
        return Ok(());
    }

    for event in &outcome.events {
        println!("  {}", describe(event));
    }
    println!(
        "Lifetime points for {}: {}",
        args.user, outcome.lifetime_points
    );
    Ok(())
}

fn describe(event: &GamificationEvent) -> String {
    match event {
        GamificationEvent::PointsAwarded { amount, reason } => {
            format!("+{} points ({})", amount, reason)
        }
        GamificationEvent::LevelUp(up) => {
            format!("Level up! {} -> {} ({})", up.old_level, up.new_level, up.new_title)
        }
        GamificationEvent::AchievementUnlocked { name, hidden, .. } => {
            if *hidden {
                format!("Secret achievement discovered: {}", name)
            } else {
                format!("Achievement unlocked: {}", name)
            }
        }
        GamificationEvent::ChainLevelUp(up) => {
            format!("{} reached level {}: {}", up.chain_id, up.new_level, up.achievement.name)
        }
        GamificationEvent::ChainCompleted { chain_id } => format!("{} completed", chain_id),
    }
}
