//! Combat configuration constants and balance tables.
//!
//! Compile-time capacities live on [`CombatConfig`]; every tunable number the
//! resolver reads lives in [`CombatTables`], which hosts may override per
//! encounter.

/// Compile-time capacities and the balance tables used by an encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    pub tables: CombatTables,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneous status effects on one participant.
    pub const MAX_STATUS_EFFECTS: usize = 16;
    /// Maximum number of participants in a single encounter.
    pub const MAX_PARTICIPANTS: usize = 32;

    pub fn new(tables: CombatTables) -> Self {
        Self { tables }
    }
}

/// Balance parameters read by the validator and the resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTables {
    pub costs: ActionCosts,
    pub hit_chance: HitChanceParams,
    pub damage: DamageParams,
    pub flee: FleeParams,
    pub defend: DefendParams,
    pub movement: MovementRules,
    /// Action points restored at the start of each participant's turn.
    pub ap_regen_per_turn: u32,
    /// Extra action points granted on the turn after a wait.
    pub wait_ap_bonus: u32,
}

impl Default for CombatTables {
    fn default() -> Self {
        Self {
            costs: ActionCosts::default(),
            hit_chance: HitChanceParams::default(),
            damage: DamageParams::default(),
            flee: FleeParams::default(),
            defend: DefendParams::default(),
            movement: MovementRules::default(),
            ap_regen_per_turn: 2,
            wait_ap_bonus: 1,
        }
    }
}

/// Action point cost of the fixed-cost action kinds.
///
/// Skill and item costs are declared on the skill or item itself; waiting is
/// always free.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionCosts {
    pub attack: u32,
    pub defend: u32,
    pub movement: u32,
    pub flee: u32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            attack: 2,
            defend: 1,
            movement: 1,
            flee: 2,
        }
    }
}

/// `hit_chance = clamp(base + accuracy - evasion, min, max)` (percent).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitChanceParams {
    pub base: i32,
    pub min: u32,
    pub max: u32,
    /// Evasion is the defender's effective defense divided by this value.
    pub evasion_divisor: i32,
}

impl Default for HitChanceParams {
    fn default() -> Self {
        Self {
            base: 80,
            min: 5,
            max: 95,
            evasion_divisor: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageParams {
    /// Floor applied to every damaging hit.
    pub minimum: u32,
    /// Symmetric spread around the base damage, in percent. Zero disables the
    /// variance roll entirely.
    pub variance_percent: u32,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            minimum: 1,
            variance_percent: 10,
        }
    }
}

/// `flee_chance = clamp(base + (speed - fastest_hostile) * per_speed_point, min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeParams {
    pub base: i32,
    pub per_speed_point: i32,
    pub min: u32,
    pub max: u32,
}

impl Default for FleeParams {
    fn default() -> Self {
        Self {
            base: 50,
            per_speed_point: 5,
            min: 10,
            max: 90,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendParams {
    /// Additive defense granted by the guard effect.
    pub defense_bonus: i32,
}

impl Default for DefendParams {
    fn default() -> Self {
        Self { defense_bonus: 5 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementRules {
    /// Largest Chebyshev distance a single move may cover.
    pub max_distance: u32,
}

impl Default for MovementRules {
    fn default() -> Self {
        Self { max_distance: 3 }
    }
}
