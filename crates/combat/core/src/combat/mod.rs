//! Combat resolution formulas.
//!
//! Pure functions with no access to state or randomness: the resolver rolls
//! and passes the results in, which keeps every formula testable in
//! isolation.
//!
//! - `calculate_hit_chance` / `check_hit`: accuracy vs evasion
//! - `calculate_damage` / `apply_variance`: attack vs defense with spread
//! - `calculate_flee_chance`: speed vs the fastest hostile

pub mod damage;
pub mod flee;
pub mod hit;

pub use damage::{apply_variance, calculate_damage, variance_spread};
pub use flee::calculate_flee_chance;
pub use hit::{calculate_evasion, calculate_hit_chance, check_hit};

/// Clamps a widened chance into `[min, max]` percent.
fn clamp_percent(value: i64, min: u32, max: u32) -> u32 {
    let clamped = value.clamp(i64::from(min), i64::from(max.max(min)));
    u32::try_from(clamped).unwrap_or(max)
}
