//! Points calculation
//!
//! Points are `round(base * multiplier)`, where the multiplier is the product
//! of every active context factor. Regional bonuses multiply on top of the
//! rounded contextual award.

use serde::Serialize;

use super::catalog::Catalog;
use super::error::InvalidActionError;
use super::multipliers::{ContextFlags, RegionalContext};

/// Output of the points calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointsAward {
    pub points: u32,
    /// Rounded to two decimals
    pub multiplier: f64,
}

/// Full award outcome handed to the persistence sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsAwardResult {
    pub points: u32,
    /// Contextual multiplier times regional bonus, rounded to two decimals
    pub multiplier: f64,
    pub regional_bonus: f64,
    pub new_total: u64,
    pub new_level: u32,
    pub leveled_up: bool,
    pub points_to_next_level: u64,
}

/// Compute points for an action under the given context
pub fn calculate_points(
    catalog: &Catalog,
    action: &str,
    flags: &ContextFlags,
) -> Result<PointsAward, InvalidActionError> {
    let base = catalog.actions().base_points(action)?;
    let multiplier = catalog.multipliers().combined(flags);

    Ok(PointsAward {
        points: round_half_up(base as f64 * multiplier),
        multiplier: round_two_decimals(multiplier),
    })
}

/// Product of the regional bonuses that apply to `region`
pub fn regional_bonus(catalog: &Catalog, region: &RegionalContext) -> f64 {
    catalog.regional().bonus(region)
}

/// Compute the award, apply regional bonuses and resolve the resulting level
pub fn award_points(
    catalog: &Catalog,
    action: &str,
    flags: &ContextFlags,
    region: &RegionalContext,
    previous_lifetime_points: i64,
) -> Result<PointsAwardResult, InvalidActionError> {
    let award = calculate_points(catalog, action, flags)?;
    let contextual = catalog.multipliers().combined(flags);
    let bonus = regional_bonus(catalog, region);
    let points = round_half_up(award.points as f64 * bonus);

    let levels = catalog.levels();
    let before = levels.resolve(previous_lifetime_points);
    let new_total = (before.total_points as i64).saturating_add(i64::from(points));
    let after = levels.resolve(new_total);
    let leveled_up = after.level > before.level;

    if leveled_up {
        tracing::info!(
            "Level up via '{}': {} -> {} ({})",
            action,
            before.level,
            after.level,
            after.title
        );
    }

    Ok(PointsAwardResult {
        points,
        multiplier: round_two_decimals(contextual * bonus),
        regional_bonus: round_two_decimals(bonus),
        new_total: after.total_points,
        new_level: after.level,
        leveled_up,
        points_to_next_level: after.points_to_next,
    })
}

/// Round half up on a non-negative product
pub fn round_half_up(value: f64) -> u32 {
    // Trims binary noise such as 64.99999999999999 before rounding
    let cleaned = (value * 1e9).round() / 1e9;
    (cleaned + 0.5).floor().max(0.0) as u32
}

pub fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
