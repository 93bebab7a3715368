//! Pre-checks and end-state validation.

use crate::engine::TurnError;
use crate::state::{BattlePhase, BattleStatus, DrawReason};

use super::PhaseContext;

/// Initializes analytics lazily and folds the previous turn's entries.
pub(super) fn pre_checks(ctx: &mut PhaseContext<'_, '_>) -> Result<(), TurnError> {
    ctx.state.refresh_analytics();
    Ok(())
}

/// Win conditions, the turn ceiling and stalemate heuristics.
///
/// Heuristics only ever produce advisories and phase changes; they never fail.
pub(super) fn validate_end_state(ctx: &mut PhaseContext<'_, '_>) -> Result<(), TurnError> {
    if ctx.check_knockout() {
        return Ok(());
    }

    let config = ctx.env.config;
    if ctx.state.turn > config.max_turns {
        ctx.state.conclude(BattleStatus::Draw(DrawReason::TurnLimit));
        return Ok(());
    }

    if is_basic_loop(ctx) && ctx.state.phase != BattlePhase::Climax {
        ctx.state.phase = BattlePhase::Climax;
        ctx.log_advisory(
            "basic_move_loop",
            format!(
                "last {} moves were basic strikes, forcing climax",
                config.stalemate.basic_loop_window
            ),
        );
    }

    let elapsed = ctx.state.turn.saturating_sub(1);
    let average = ctx
        .state
        .analytics
        .as_ref()
        .map(|analytics| analytics.average_damage(elapsed))
        .unwrap_or(0);
    if ctx.state.turn > config.stalemate.turn_threshold
        && average < config.stalemate.min_average_damage
        && !ctx.state.sudden_death
    {
        ctx.state.sudden_death = true;
        ctx.state.phase = BattlePhase::Stalemate;
        ctx.log_advisory(
            "sudden_death",
            format!("average damage {average} per turn after {elapsed} turns, sudden death"),
        );
    }

    Ok(())
}

/// True when the trailing move entries of the log are all basic moves.
fn is_basic_loop(ctx: &PhaseContext<'_, '_>) -> bool {
    let window = ctx.env.config.stalemate.basic_loop_window;
    if window == 0 {
        return false;
    }

    let recent: Vec<_> = ctx
        .state
        .log
        .iter()
        .rev()
        .filter(|entry| entry.is_move_use())
        .take(window)
        .collect();

    recent.len() == window
        && recent.iter().all(|entry| {
            entry
                .meta
                .move_id
                .as_ref()
                .is_some_and(|id| ctx.env.is_basic(id))
        })
}
