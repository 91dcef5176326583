//! Level command

use anyhow::Result;

use woofadaar_points::config::Config;

use super::{build_engine, print_json};

pub fn level_command(config: &Config, points: i64, json: bool) -> Result<()> {
    let engine = build_engine(config)?;
    let progress = engine.resolve_level(points);

    if json {
        return print_json(&progress);
    }

    println!("Level {} - {}", progress.level, progress.title);
    println!(
        "  {} points ({} / {}, {} to next, {:.0}%)",
        progress.total_points,
        progress.current_threshold,
        progress.next_threshold,
        progress.points_to_next,
        progress.progress_to_next() * 100.0
    );
    Ok(())
}
