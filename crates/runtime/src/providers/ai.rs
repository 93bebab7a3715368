use battle_core::{BattleEnv, BattleState, MoveSelector, Side, TurnInput};

use crate::api::{MoveProvider, Result};

/// Delegates every decision to the engine's tactical AI.
///
/// The pick is left to the pipeline (`TurnInput::ai()`) so charging and
/// stunned participants are handled there; the selector is only consulted
/// for diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct AiMoveProvider;

impl MoveProvider for AiMoveProvider {
    fn provide_move(
        &mut self,
        side: Side,
        state: &BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<TurnInput> {
        if tracing::enabled!(tracing::Level::TRACE) {
            let selection = MoveSelector::select_best_move(state, side, env);
            tracing::trace!(
                ?side,
                move_id = %selection.definition.id,
                priority = selection.decision.priority.label(),
                rationale = %selection.decision.rationale,
                "AI preview"
            );
        }
        Ok(TurnInput::ai())
    }

    fn name(&self) -> &'static str {
        "ai"
    }
}
