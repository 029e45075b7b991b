//! Hit chance and accuracy calculations.

use crate::config::HitChanceParams;

/// Evasion derived from the defender's effective defense.
pub fn calculate_evasion(defense: i32, params: &HitChanceParams) -> i32 {
    defense.max(0) / params.evasion_divisor.max(1)
}

/// Calculate hit chance based on accuracy vs evasion.
///
/// # Formula
///
/// ```text
/// hit_chance = base + (accuracy - evasion)
/// clamped to [min, max]
/// ```
pub fn calculate_hit_chance(accuracy: i32, evasion: i32, params: &HitChanceParams) -> u32 {
    let hit_chance = i64::from(params.base) + i64::from(accuracy) - i64::from(evasion);
    super::clamp_percent(hit_chance, params.min, params.max)
}

/// A d100 roll at or below the hit chance hits.
pub fn check_hit(hit_chance: u32, roll: u32) -> bool {
    roll <= hit_chance
}
