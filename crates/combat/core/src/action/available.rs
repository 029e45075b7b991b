//! Enumerate what the current actor can do.
//!
//! Hosts use [`available_actions`] to build menus and AI opponents use it to
//! pick a move. Every entry it returns would pass validation with at least one
//! of its listed targets (or with no target when the list is empty).

use crate::action::{ActionKind, CombatAction, attack_targets, class_targets};
use crate::config::CombatTables;
use crate::state::{CombatState, ItemId, ParticipantId, SkillId};

/// One legal choice for the current actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvailableAction {
    pub kind: ActionKind,
    /// Set for [`ActionKind::Skill`].
    pub skill: Option<SkillId>,
    /// Set for [`ActionKind::Item`].
    pub item: Option<ItemId>,
    pub cost: u32,
    /// Candidate targets; empty for kinds that take none.
    pub targets: Vec<ParticipantId>,
}

impl AvailableAction {
    fn basic(kind: ActionKind, cost: u32, targets: Vec<ParticipantId>) -> Self {
        Self {
            kind,
            skill: None,
            item: None,
            cost,
            targets,
        }
    }
}

/// Every action the current actor can afford and legally take right now.
///
/// Empty when the encounter is not active or the current actor is dead.
pub fn available_actions(state: &CombatState, tables: &CombatTables) -> Vec<AvailableAction> {
    let Some(actor) = state.current_actor() else {
        return Vec::new();
    };
    if !state.active || !actor.is_alive() {
        return Vec::new();
    }

    let ap = actor.action_points.current;
    let costs = &tables.costs;
    let mut actions = Vec::new();

    let targets = attack_targets(state, actor);
    if ap >= costs.attack && !targets.is_empty() {
        actions.push(AvailableAction::basic(ActionKind::Attack, costs.attack, targets));
    }
    if ap >= costs.defend {
        actions.push(AvailableAction::basic(ActionKind::Defend, costs.defend, Vec::new()));
    }

    for skill in &actor.skills {
        let mana_ok = skill
            .mana_cost
            .is_none_or(|cost| actor.mana_available() >= cost);
        if !skill.is_ready() || !mana_ok || ap < skill.ap_cost {
            continue;
        }
        let targets = class_targets(state, actor, skill.target);
        if targets.is_empty() {
            continue;
        }
        actions.push(AvailableAction {
            kind: ActionKind::Skill,
            skill: Some(skill.id.clone()),
            item: None,
            cost: skill.ap_cost,
            targets,
        });
    }

    for item in &actor.items {
        if item.quantity == 0 || ap < item.ap_cost {
            continue;
        }
        let targets = class_targets(state, actor, item.target);
        if targets.is_empty() {
            continue;
        }
        actions.push(AvailableAction {
            kind: ActionKind::Item,
            skill: None,
            item: Some(item.id.clone()),
            cost: item.ap_cost,
            targets,
        });
    }

    if actor.position.is_some() && ap >= costs.movement {
        actions.push(AvailableAction::basic(ActionKind::Move, costs.movement, Vec::new()));
    }
    if ap >= costs.flee {
        actions.push(AvailableAction::basic(ActionKind::Flee, costs.flee, Vec::new()));
    }
    actions.push(AvailableAction::basic(ActionKind::Wait, 0, Vec::new()));

    actions
}

/// Participants `action` could legally target.
///
/// Attack yields living hostiles, skills and items follow their target class,
/// and kinds that take no target yield nothing.
pub fn valid_targets(state: &CombatState, action: &CombatAction) -> Vec<ParticipantId> {
    let Some(actor) = state.participant(action.actor()) else {
        return Vec::new();
    };
    match action {
        CombatAction::Attack(_) => attack_targets(state, actor),
        CombatAction::Skill(skill) => actor
            .skill(&skill.skill)
            .map(|s| class_targets(state, actor, s.target))
            .unwrap_or_default(),
        CombatAction::Item(item) => actor
            .item(&item.item)
            .map(|i| class_targets(state, actor, i.target))
            .unwrap_or_default(),
        CombatAction::Defend(_)
        | CombatAction::Move(_)
        | CombatAction::Flee(_)
        | CombatAction::Wait(_) => Vec::new(),
    }
}
