//! Achievements command: evaluate standalone achievements against a snapshot

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use woofadaar_points::config::Config;

use super::{build_engine, print_json, read_stats};

#[derive(Debug, Clone, Default)]
pub struct AchievementsArgs {
    pub stats: PathBuf,
    pub unlocked: Vec<String>,
    pub json: bool,
}

pub fn achievements_command(config: &Config, args: AchievementsArgs) -> Result<()> {
    let engine = build_engine(config)?;
    let stats = read_stats(&args.stats)?;
    let already_unlocked: HashSet<String> = args
        .unlocked
        .iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();

    let newly_unlocked = engine.evaluate_achievements(&stats, &already_unlocked);

    if args.json {
        return print_json(&newly_unlocked);
    }

    if newly_unlocked.is_empty() {
        println!("No new achievements.");
    } else {
        println!("Unlocked ({}):", newly_unlocked.len());
        for id in &newly_unlocked {
            if let Some(achievement) = engine.catalog().achievement(id) {
                println!(
                    "  {} {} [{}] +{} - {}",
                    achievement.icon,
                    achievement.name,
                    achievement.rarity.label(),
                    achievement.points_reward,
                    achievement.description
                );
            }
        }
    }

    // Progress on what is still locked; hidden ones stay secret
    let pending: Vec<_> = engine
        .catalog()
        .public_achievements()
        .filter(|a| !already_unlocked.contains(&a.id) && !newly_unlocked.contains(&a.id))
        .collect();
    if !pending.is_empty() {
        println!("\nIn progress:");
        for achievement in pending {
            println!(
                "  {:<24} {:>3.0}% ({} {} / {})",
                achievement.name,
                achievement.condition.progress(&stats) * 100.0,
                achievement.condition.metric,
                stats.value(&achievement.condition.metric),
                achievement.condition.target
            );
        }
    }

    Ok(())
}
