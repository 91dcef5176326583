//! Points command: preview an award without recording it

use anyhow::Result;

use woofadaar_points::config::Config;
use woofadaar_points::gamification::{ContextFlags, RegionalContext};

use super::{build_engine, print_json};

#[derive(Debug, Clone, Default)]
pub struct PointsArgs {
    pub action: String,
    pub flags: ContextFlags,
    pub region: RegionalContext,
    /// Lifetime points before the award
    pub lifetime: i64,
    pub json: bool,
}

pub fn points_command(config: &Config, args: PointsArgs) -> Result<()> {
    let engine = build_engine(config)?;
    let result = engine.award_points(&args.action, &args.flags, &args.region, args.lifetime)?;

    if args.json {
        return print_json(&result);
    }

    println!(
        "{}: {} points (x{})",
        args.action, result.points, result.multiplier
    );
    if result.regional_bonus > 1.0 {
        println!("  Regional bonus: x{}", result.regional_bonus);
    }
    println!(
        "  Lifetime: {} -> {}",
        args.lifetime.max(0),
        result.new_total
    );
    if result.leveled_up {
        let level = engine.resolve_level(i64::try_from(result.new_total).unwrap_or(i64::MAX));
        println!("  Level up! Now level {} ({})", level.level, level.title);
    } else {
        println!(
            "  Level {} ({} to next)",
            result.new_level, result.points_to_next_level
        );
    }

    Ok(())
}
