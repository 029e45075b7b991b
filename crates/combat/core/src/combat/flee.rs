//! Flee chance calculation.

use crate::config::FleeParams;

/// Chance (percent) that a flee attempt succeeds.
///
/// # Formula
///
/// ```text
/// flee_chance = base + (speed - fastest_hostile_speed) * per_speed_point
/// clamped to [min, max]
/// ```
///
/// With no living hostile the attempt always succeeds.
pub fn calculate_flee_chance(speed: i32, fastest_hostile: Option<i32>, params: &FleeParams) -> u32 {
    let Some(fastest) = fastest_hostile else {
        return 100;
    };
    let chance = i64::from(params.base)
        + (i64::from(speed) - i64::from(fastest)) * i64::from(params.per_speed_point);
    super::clamp_percent(chance, params.min, params.max)
}
