//! Combatant data model.
//!
//! Participant definitions arrive from upstream collaborators with stats that
//! already include equipment bonuses. The engine never recomputes them; it
//! only layers status effect modifiers on top (see [`Participant::effective_stats`]).

use crate::action::{Effect, TargetClass};
use crate::state::{ItemId, ParticipantId, Position, SkillId, StatKind, StatusEffects};

/// Side a participant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FactionKind {
    Player,
    Ally,
    Enemy,
}

impl FactionKind {
    /// Player and allies; the set `PartyWiped` watches.
    pub fn is_party(self) -> bool {
        matches!(self, FactionKind::Player | FactionKind::Ally)
    }
}

/// Bounded resource pool. Every mutation clamps to `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Adds up to `amount`, returning the amount actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current - before
    }

    /// Removes up to `amount`, returning the amount actually drained.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    pub fn set_current(&mut self, value: u32) {
        self.current = value.min(self.maximum);
    }

    /// Re-establishes `current <= maximum` after upstream edits.
    pub fn clamp(&mut self) {
        self.current = self.current.min(self.maximum);
    }
}

/// Combat stats as supplied upstream (equipment already folded in).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub accuracy: i32,
}

impl CombatStats {
    pub fn new(attack: i32, defense: i32, speed: i32, accuracy: i32) -> Self {
        Self {
            attack,
            defense,
            speed,
            accuracy,
        }
    }

    pub fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::Accuracy => self.accuracy,
        }
    }

    fn set(&mut self, stat: StatKind, value: i32) {
        match stat {
            StatKind::Attack => self.attack = value,
            StatKind::Defense => self.defense = value,
            StatKind::Speed => self.speed = value,
            StatKind::Accuracy => self.accuracy = value,
        }
    }
}

/// A known skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub ap_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: Option<u32>,
    /// Turns remaining before the skill can be used again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    /// Value `cooldown` is reset to after use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_cooldown: u32,
    pub target: TargetClass,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

impl Skill {
    pub fn new(
        id: impl Into<SkillId>,
        name: impl Into<String>,
        ap_cost: u32,
        target: TargetClass,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ap_cost,
            mana_cost: None,
            cooldown: 0,
            base_cooldown: 0,
            target,
            effects: Vec::new(),
        }
    }

    pub fn with_mana_cost(mut self, mana: u32) -> Self {
        self.mana_cost = Some(mana);
        self
    }

    pub fn with_cooldown(mut self, base_cooldown: u32) -> Self {
        self.base_cooldown = base_cooldown;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown == 0
    }
}

/// A usable item stack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub ap_cost: u32,
    pub target: TargetClass,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

impl Item {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        quantity: u32,
        ap_cost: u32,
        target: TargetClass,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            ap_cost,
            target,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub faction: FactionKind,
    pub health: ResourceMeter,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana: Option<ResourceMeter>,
    pub action_points: ResourceMeter,
    pub stats: CombatStats,
    /// Opaque equipped-gear references, carried for the host.
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_effects: StatusEffects,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<Skill>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<Item>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Position>,
    /// Bonus action points granted at the start of the next turn (from waiting).
    #[cfg_attr(feature = "serde", serde(default))]
    pub pending_ap_bonus: u32,
}

impl Participant {
    pub fn new(
        id: impl Into<ParticipantId>,
        name: impl Into<String>,
        faction: FactionKind,
        health: ResourceMeter,
        action_points: ResourceMeter,
        stats: CombatStats,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            faction,
            health,
            mana: None,
            action_points,
            stats,
            equipment: Vec::new(),
            status_effects: StatusEffects::empty(),
            skills: Vec::new(),
            items: Vec::new(),
            position: None,
            pending_ap_bonus: 0,
        }
    }

    pub fn with_mana(mut self, mana: ResourceMeter) -> Self {
        self.mana = Some(mana);
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_equipment(mut self, gear: impl Into<String>) -> Self {
        self.equipment.push(gear.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health.current > 0
    }

    /// Any participant of a different faction kind is hostile.
    pub fn is_hostile_to(&self, other: &Participant) -> bool {
        self.faction != other.faction
    }

    pub fn mana_available(&self) -> u32 {
        self.mana.map_or(0, |m| m.current)
    }

    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| &s.id == id)
    }

    /// Counts every skill cooldown down by one owner turn.
    pub fn tick_cooldowns(&mut self) {
        for skill in self.skills.iter_mut() {
            skill.cooldown = skill.cooldown.saturating_sub(1);
        }
    }

    pub fn skill_mut(&mut self, id: &SkillId) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| &s.id == id)
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Stats after status effect modifiers.
    ///
    /// Additive modifiers are summed onto the base value first, then the summed
    /// multiplicative percentage is applied. Results are clamped to
    /// `[0, i32::MAX]`.
    pub fn effective_stats(&self) -> CombatStats {
        let mut stats = self.stats;
        for stat in [
            StatKind::Attack,
            StatKind::Defense,
            StatKind::Speed,
            StatKind::Accuracy,
        ] {
            let (additive, percent) = self.status_effects.modifier_totals(stat);
            let base = i64::from(stats.get(stat)).saturating_add(additive);
            let value = if percent == 0 {
                base
            } else {
                base.saturating_mul(percent.saturating_add(100)) / 100
            };
            stats.set(stat, value.clamp(0, i64::from(i32::MAX)) as i32);
        }
        stats
    }

    /// Re-establishes the resource invariants after upstream edits.
    pub(crate) fn clamp_resources(&mut self) {
        self.health.clamp();
        self.action_points.clamp();
        if let Some(mana) = self.mana.as_mut() {
            mana.clamp();
        }
    }
}
