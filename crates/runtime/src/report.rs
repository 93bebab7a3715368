//! Battle summaries.

use battle_core::{BattleAnalytics, BattleState, BattleStatus, DrawReason, Side};
use serde::Serialize;

/// Final standing of one combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CombatantSummary {
    pub name: String,
    pub health: u32,
    pub chi: u32,
    pub moves_used: usize,
    pub used_finisher: bool,
    pub desperation: &'static str,
}

impl CombatantSummary {
    fn of(state: &BattleState, side: Side) -> Self {
        let character = state.character(side);
        Self {
            name: character.name.clone(),
            health: character.health,
            chi: character.chi,
            moves_used: character.history.len(),
            used_finisher: character
                .flags
                .contains(battle_core::CombatFlags::USED_FINISHER),
            desperation: character.desperation.into(),
        }
    }
}

/// Serializable summary of a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BattleReport {
    pub seed: u64,
    pub terrain: &'static str,
    /// `"victory"`, `"draw"` or `"ongoing"`.
    pub outcome: &'static str,
    pub winner: Option<String>,
    pub draw_reason: Option<&'static str>,
    /// Turns fully processed.
    pub turns: u32,
    pub sudden_death: bool,
    pub escalations: u32,
    pub combatants: [CombatantSummary; 2],
    pub analytics: BattleAnalytics,
    pub log_entries: usize,
    /// Hex SHA-256 digest of the final snapshot.
    pub digest: String,
}

impl BattleReport {
    pub fn from_state(state: &BattleState) -> Self {
        let (outcome, winner, draw_reason) = match state.status {
            BattleStatus::Ongoing => ("ongoing", None, None),
            BattleStatus::Victory(side) => {
                ("victory", Some(state.character(side).name.clone()), None)
            }
            BattleStatus::Draw(reason) => ("draw", None, Some(<&'static str>::from(reason))),
        };

        Self {
            seed: state.seed,
            terrain: state.terrain.into(),
            outcome,
            winner,
            draw_reason,
            turns: state.turn.saturating_sub(1),
            sudden_death: state.sudden_death,
            escalations: state.escalation_cycles,
            combatants: [
                CombatantSummary::of(state, Side::First),
                CombatantSummary::of(state, Side::Second),
            ],
            analytics: state.analytics.clone().unwrap_or_default(),
            log_entries: state.log.len(),
            digest: hex::encode(state.digest()),
        }
    }

    pub fn is_draw(&self) -> bool {
        self.draw_reason.is_some()
    }

    /// True when the battle ended without any damage dealt.
    pub fn is_damageless(&self) -> bool {
        self.draw_reason == Some(<&'static str>::from(DrawReason::NoDamage))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
