//! Legal-move filtering and AI move selection against a battle state.

use crate::cooldown::CooldownTracker;
use crate::env::BattleEnv;
use crate::moves::MoveDefinition;
use crate::state::{BattleState, Character, CombatFlags, Position, Side};

use super::{MoveScore, MoveScorer, TacticalDecision, TacticalPriorityEngine};

/// Move chosen for one side, with the reasoning behind it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveSelection {
    pub definition: MoveDefinition,
    pub decision: TacticalDecision,
    /// `None` when the basic-move fallback was used.
    pub score: Option<MoveScore>,
}

impl MoveSelection {
    pub fn is_fallback(&self) -> bool {
        self.score.is_none()
    }
}

/// Selects moves for AI-controlled combatants.
pub struct MoveSelector;

impl MoveSelector {
    /// Moves `side` may use this turn, in catalog order.
    ///
    /// Finishers are excluded; they are only ever used by the finisher phase.
    /// Scoring keeps the first of equally scored moves, so catalog order breaks
    /// ties regardless of how the roster lists the moveset.
    pub fn legal_moves<'a>(
        state: &BattleState,
        side: Side,
        env: &BattleEnv<'a>,
    ) -> Vec<&'a MoveDefinition> {
        let character = state.character(side);
        env.moves
            .moves_in_catalog_order(&character.moves)
            .into_iter()
            .filter(|definition| Self::is_legal(state, character, definition))
            .collect()
    }

    /// First finisher, in catalog order, that `side` would execute this turn.
    ///
    /// A finisher is ready when the side has not used one yet, is neither
    /// stunned nor charging, meets the unlock condition, stands on a required
    /// position and terrain, and can pay for it.
    pub fn ready_finisher<'a>(
        state: &BattleState,
        side: Side,
        env: &BattleEnv<'a>,
    ) -> Option<&'a MoveDefinition> {
        let me = state.character(side);
        if me.flags.contains(CombatFlags::USED_FINISHER)
            || me.position == Position::Stunned
            || me.charge.is_charging()
        {
            return None;
        }
        let enemy = state.character(side.opponent());

        env.moves
            .moves_in_catalog_order(&me.moves)
            .into_iter()
            .find(|definition| {
                definition
                    .finisher
                    .is_some_and(|condition| condition.is_met(me, enemy, state.phase, state.turn))
                    && (definition.required_positions.is_empty()
                        || definition.required_positions.contains(&me.position))
                    && (definition.terrain.is_empty()
                        || definition.terrain.contains(&state.terrain))
                    && CooldownTracker::is_available(
                        me,
                        definition,
                        state.turn,
                        me.chi + me.position.chi_discount(),
                        state.phase,
                    )
                    .is_available()
            })
    }

    /// True if `character` may use `definition` in `state` this turn.
    pub fn is_legal(state: &BattleState, character: &Character, definition: &MoveDefinition) -> bool {
        if definition.is_finisher() {
            return false;
        }
        if !definition.required_positions.is_empty()
            && !definition.required_positions.contains(&character.position)
        {
            return false;
        }
        if !definition.terrain.is_empty() && !definition.terrain.contains(&state.terrain) {
            return false;
        }

        CooldownTracker::is_available(
            character,
            definition,
            state.turn,
            character.chi + character.position.chi_discount(),
            state.phase,
        )
        .is_available()
    }

    /// Picks the best legal move for `side`.
    ///
    /// When no move is legal the configured basic move is returned; it costs
    /// nothing and has no cooldown, so the pipeline always makes progress.
    pub fn select_best_move(state: &BattleState, side: Side, env: &BattleEnv<'_>) -> MoveSelection {
        let me = state.character(side);
        let enemy = state.character(side.opponent());
        let legal = Self::legal_moves(state, side, env);

        let decision =
            TacticalPriorityEngine::decide(me, enemy, &legal, state.stalemate_counter, env.config);
        tracing::debug!(
            side = ?side,
            priority = decision.priority.label(),
            rationale = %decision.rationale,
            legal = legal.len(),
            "tactical priority"
        );

        let best = MoveScorer::select_best_move(&legal, decision.priority, me, enemy);
        let chosen = best.as_ref().and_then(|score| {
            legal
                .iter()
                .find(|definition| definition.id == score.move_id)
                .map(|definition| (*definition).clone())
        });

        match (chosen, best) {
            (Some(definition), Some(score)) => MoveSelection {
                definition,
                decision,
                score: Some(score),
            },
            _ => {
                tracing::warn!(side = ?side, "no legal moves, falling back to basic move");
                MoveSelection {
                    definition: env.basic_move(),
                    decision,
                    score: None,
                }
            }
        }
    }
}
