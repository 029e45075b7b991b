//! Damage calculation.

use crate::config::DamageParams;

/// Base damage of a hit.
///
/// # Formula
///
/// ```text
/// damage = max(minimum, power + attack - defense)
/// ```
///
/// `power` is zero for a plain attack and the declared power for skills.
pub fn calculate_damage(attack: i32, defense: i32, power: u32, params: &DamageParams) -> u32 {
    let raw = i64::from(attack) + i64::from(power) - i64::from(defense);
    saturate(raw).max(params.minimum)
}

/// Half-width of the variance window around `base`. Never wider than `base`.
pub fn variance_spread(base: u32, params: &DamageParams) -> u32 {
    let percent = u64::from(params.variance_percent.min(100));
    saturate((u64::from(base) * percent / 100) as i64)
}

/// Shifts `base` by `roll - spread`, where `roll` was drawn from `[0, 2 * spread]`.
///
/// The result never drops below the configured minimum.
pub fn apply_variance(base: u32, spread: u32, roll: u32, params: &DamageParams) -> u32 {
    let roll = i64::from(roll).min(i64::from(spread) * 2);
    let shifted = i64::from(base) + roll - i64::from(spread);
    saturate(shifted).max(params.minimum)
}

fn saturate(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
