//! Tactical priority engine.
//!
//! Maps the situation of both combatants to a single [`TacticalPriority`].
//! Rules are evaluated in a fixed order and the first match wins.

use crate::config::BattleConfig;
use crate::moves::{MoveCategory, MoveDefinition, MoveTag};
use crate::state::Character;

/// Self health below which the combatant turtles up.
const DEFEND_BELOW: u32 = 25;
/// Enemy health below which high-damage moves go for the kill.
const FINISH_BELOW: u32 = 20;
/// Enemy defense above which piercing moves are preferred.
const PIERCE_DEFENSE_ABOVE: u32 = 25;
/// Self health below which healing is preferred.
const HEAL_BELOW: u32 = 40;
/// Chi below which defense buffs are preferred.
const RECOVER_CHI_BELOW: u32 = 3;

/// Discrete AI intent for one turn.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TacticalPriority {
    #[default]
    Attack,
    Defend,
    Pierce,
    Finish,
    Heal,
    Recover,
    Gamble,
}

impl TacticalPriority {
    pub fn label(&self) -> &'static str {
        self.into()
    }
}

/// Heuristic class of a move, inferred from its display name.
///
/// Defense keywords are checked first, so "Fire Shield" is a defense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LastMoveClass {
    Attack,
    Defense,
    Other,
}

impl LastMoveClass {
    const DEFENSE_KEYWORDS: [&'static str; 4] = ["shield", "evasion", "glide", "jets"];
    const ATTACK_KEYWORDS: [&'static str; 4] = ["strike", "fire", "slice", "blast"];

    /// Classifies a move by case-insensitive substring match on its name.
    pub fn classify(move_name: &str) -> Self {
        let name = move_name.to_lowercase();
        if Self::DEFENSE_KEYWORDS.iter().any(|kw| name.contains(kw)) {
            Self::Defense
        } else if Self::ATTACK_KEYWORDS.iter().any(|kw| name.contains(kw)) {
            Self::Attack
        } else {
            Self::Other
        }
    }

    /// Class of the last move `character` used (`Other` if none).
    pub fn of_last_move(character: &Character) -> Self {
        character
            .last_move()
            .map(|record| Self::classify(&record.name))
            .unwrap_or(Self::Other)
    }
}

/// A priority together with a human-readable rationale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TacticalDecision {
    pub priority: TacticalPriority,
    pub rationale: String,
}

impl TacticalDecision {
    fn new(priority: TacticalPriority, rationale: impl Into<String>) -> Self {
        Self {
            priority,
            rationale: rationale.into(),
        }
    }
}

/// Tactical priority engine.
pub struct TacticalPriorityEngine;

impl TacticalPriorityEngine {
    /// Decides the priority for `me` facing `enemy`.
    ///
    /// `available` must contain only moves `me` can legally use this turn.
    pub fn decide(
        me: &Character,
        enemy: &Character,
        available: &[&MoveDefinition],
        stalemate_counter: u32,
        config: &BattleConfig,
    ) -> TacticalDecision {
        let any = |predicate: fn(&MoveDefinition) -> bool| {
            available.iter().any(|definition| predicate(definition))
        };

        if stalemate_counter >= config.stalemate.gamble_after {
            return TacticalDecision::new(
                TacticalPriority::Gamble,
                format!("{stalemate_counter} turns without damage, forcing variance"),
            );
        }

        if me.health < DEFEND_BELOW {
            return TacticalDecision::new(
                TacticalPriority::Defend,
                format!("own health {} is critical", me.health),
            );
        }

        if enemy.health < FINISH_BELOW && any(|m| m.has_tag(MoveTag::HighDamage)) {
            return TacticalDecision::new(
                TacticalPriority::Finish,
                format!("enemy health {} is low enough to finish", enemy.health),
            );
        }

        let enemy_turtling = enemy.effective_defense() > PIERCE_DEFENSE_ABOVE
            || LastMoveClass::of_last_move(enemy) == LastMoveClass::Defense;
        if enemy_turtling && any(|m| m.has_tag(MoveTag::Piercing)) {
            return TacticalDecision::new(
                TacticalPriority::Pierce,
                "enemy is defending, piercing through",
            );
        }

        if me.health < HEAL_BELOW && any(MoveDefinition::is_healing) {
            return TacticalDecision::new(
                TacticalPriority::Heal,
                format!("own health {} calls for healing", me.health),
            );
        }

        if me.chi < RECOVER_CHI_BELOW && any(|m| m.category == MoveCategory::DefenseBuff) {
            return TacticalDecision::new(
                TacticalPriority::Recover,
                format!("chi {} is low, recovering", me.chi),
            );
        }

        TacticalDecision::new(TacticalPriority::Attack, "no pressing need, attacking")
    }
}
