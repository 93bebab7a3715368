//! Finisher phase.

use crate::ai::MoveSelector;
use crate::combat::{MoveResolver, TurnContext};
use crate::engine::{TurnError, TurnPhase};
use crate::state::{BattleState, Side};

use super::PhaseContext;

/// Executes the first unlocked, unused finisher of the active side.
///
/// A finisher consumes the turn: the tactical move phase is skipped.
pub(super) fn run(ctx: &mut PhaseContext<'_, '_>) -> Result<(), TurnError> {
    let side = ctx.state.active;
    let Some(definition) = MoveSelector::ready_finisher(&ctx.state, side, ctx.env).cloned() else {
        return Ok(());
    };

    let turn_ctx = turn_context(&ctx.state, ctx, side);
    let (attacker, target) = ctx.state.pair_mut(side);
    let resolution = MoveResolver::resolve(&definition, attacker, target, &turn_ctx)
        .map_err(|error| TurnError::resolve(TurnPhase::Finisher, error))?;

    tracing::info!(
        turn = ctx.state.turn,
        ?side,
        move_id = %definition.id,
        outcome = resolution.outcome.label(),
        "finisher executed"
    );
    ctx.state.push_log(resolution.entry);
    ctx.finisher_used = true;
    ctx.check_knockout();

    Ok(())
}

/// Resolution context for `side` on the current turn.
pub(super) fn turn_context<'e>(
    state: &BattleState,
    ctx: &PhaseContext<'e, '_>,
    side: Side,
) -> TurnContext<'e> {
    TurnContext {
        env: ctx.env,
        seed: state.seed,
        turn: state.turn,
        phase: state.phase,
        terrain: state.terrain,
        sudden_death: state.sudden_death,
        actor: side,
    }
}
