//! Catalog command: list actions, levels, achievements and chains

use anyhow::Result;
use serde_json::json;

use woofadaar_points::config::Config;

use super::{build_engine, print_json};

pub fn catalog_command(config: &Config, show_hidden: bool, json: bool) -> Result<()> {
    let engine = build_engine(config)?;
    let catalog = engine.catalog();
    let achievements: Vec<_> = catalog
        .achievements()
        .iter()
        .filter(|a| show_hidden || !a.hidden)
        .collect();

    if json {
        let levels: Vec<_> = catalog
            .levels()
            .iter()
            .map(|(level, threshold, title)| {
                json!({ "level": level, "threshold": threshold, "title": title })
            })
            .collect();
        return print_json(&json!({
            "actions": catalog.actions(),
            "multipliers": catalog.multipliers(),
            "levels": levels,
            "achievements": achievements,
            "chains": catalog.chains(),
        }));
    }

    println!("Actions ({}):", catalog.actions().len());
    for (action, points) in catalog.actions().iter() {
        println!("  {:<22} {:>4}", action, points);
    }

    println!("\nLevels:");
    for (level, threshold, title) in catalog.levels().iter() {
        println!("  {:>2}  {:>6}  {}", level, threshold, title);
    }
    println!(
        "  ..  every {} points after that",
        catalog.levels().overflow_step()
    );

    println!("\nAchievements ({}):", achievements.len());
    for achievement in achievements {
        println!(
            "  {} {:<24} {:<10} {}{}",
            achievement.icon,
            achievement.name,
            achievement.rarity.label(),
            achievement.description,
            if achievement.hidden { " (hidden)" } else { "" }
        );
    }

    println!("\nChains ({}):", catalog.chains().len());
    for chain in catalog.chains() {
        println!(
            "  {} [{}] {} levels, {} points",
            chain.name,
            chain.category.label(),
            chain.total_levels,
            chain.total_points()
        );
        for level in &chain.levels {
            println!("    {}. {} - {}", level.level, level.name, level.description);
        }
    }

    Ok(())
}
