//! Session configuration.
use std::env;

use combat_core::CombatTables;

/// Settings a [`CombatSession`](crate::CombatSession) is built with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Balance tables handed to the engine on every call.
    pub tables: CombatTables,
    /// Fixed encounter seed. `None` draws a fresh seed per encounter.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Construct session configuration from environment variables.
    ///
    /// Environment variables (all optional, defaults from [`CombatTables`]):
    /// - `COMBAT_SEED` - Fixed encounter seed
    /// - `COMBAT_AP_REGEN` - Action points restored at each turn start
    /// - `COMBAT_WAIT_BONUS` - Extra action points banked by waiting
    /// - `COMBAT_DAMAGE_VARIANCE` - Damage spread in percent (0 disables)
    /// - `COMBAT_HIT_BASE` - Base hit chance in percent
    /// - `COMBAT_FLEE_BASE` - Base flee chance in percent
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading values through `lookup`.
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            seed: parse(lookup("COMBAT_SEED")),
            ..Self::default()
        };
        let tables = &mut config.tables;

        if let Some(regen) = parse::<u32>(lookup("COMBAT_AP_REGEN")) {
            tables.ap_regen_per_turn = regen;
        }
        if let Some(bonus) = parse::<u32>(lookup("COMBAT_WAIT_BONUS")) {
            tables.wait_ap_bonus = bonus;
        }
        if let Some(variance) = parse::<u32>(lookup("COMBAT_DAMAGE_VARIANCE")) {
            tables.damage.variance_percent = variance.min(100);
        }
        if let Some(base) = parse::<i32>(lookup("COMBAT_HIT_BASE")) {
            tables.hit_chance.base = base;
        }
        if let Some(base) = parse::<i32>(lookup("COMBAT_FLEE_BASE")) {
            tables.flee.base = base;
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tables(mut self, tables: CombatTables) -> Self {
        self.tables = tables;
        self
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}
