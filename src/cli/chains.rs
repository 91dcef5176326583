//! Chains command: evaluate chain progress for a ledger user (read-only)

use std::path::PathBuf;

use anyhow::Result;

use woofadaar_points::config::Config;

use super::{build_engine, ledger_store, print_json, read_stats};

#[derive(Debug, Clone, Default)]
pub struct ChainsArgs {
    pub user: String,
    pub stats: PathBuf,
    pub ledger: Option<PathBuf>,
    pub json: bool,
}

pub fn chains_command(config: &Config, args: ChainsArgs) -> Result<()> {
    let engine = build_engine(config)?;
    let stats = read_stats(&args.stats)?;
    let ledger = ledger_store(config, args.ledger.as_ref()).load()?;
    let record = ledger.user(&args.user).cloned().unwrap_or_default();
    let current_levels = record.chain_level_map();

    let progress = engine.evaluate_chain_progress(
        &args.user,
        &stats,
        &current_levels,
        &record.unlocked_set(),
    );

    if args.json {
        return print_json(&progress);
    }

    for chain in engine.catalog().chains() {
        let current = current_levels.get(&chain.id).copied().unwrap_or(0);
        let advanced = progress.level_ups.iter().find(|l| l.chain_id == chain.id);
        let status = match advanced {
            Some(up) if up.completed => format!("-> {} (completed!)", up.new_level),
            Some(up) => format!("-> {} ({})", up.new_level, up.achievement.name),
            None if chain.is_complete(current) => "completed".to_string(),
            None => String::new(),
        };
        println!(
            "  {:<24} {}/{} {}",
            chain.name, current, chain.total_levels, status
        );
    }

    let unlocked: Vec<_> = progress
        .new_achievements
        .iter()
        .chain(&progress.discovered_hidden)
        .collect();
    if !unlocked.is_empty() {
        println!("\nWould unlock:");
        for id in unlocked {
            let name = engine
                .catalog()
                .achievement(id)
                .map_or(id.as_str(), |a| a.name.as_str());
            println!("  {}", name);
        }
    }

    if progress.is_empty() {
        println!("\nNothing new for {}.", args.user);
    }

    Ok(())
}
