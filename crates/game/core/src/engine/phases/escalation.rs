//! Forced escalation.

use crate::engine::TurnError;
use crate::state::{BattlePhase, CombatFlags, LogKind};

use super::PhaseContext;

/// Forces the active side to escalate when the battle stalls or loops.
///
/// Triggers on low average damage past the turn threshold, or on the active
/// side repeating the same move. A side escalates at most once, and never
/// within the cooldown window of the previous escalation.
pub(super) fn run(ctx: &mut PhaseContext<'_, '_>) -> Result<(), TurnError> {
    let config = ctx.env.config;
    let side = ctx.state.active;
    let turn = ctx.state.turn;

    let elapsed = turn.saturating_sub(1);
    let stalled = turn > config.stalemate.turn_threshold
        && ctx
            .state
            .analytics
            .as_ref()
            .is_some_and(|analytics| analytics.average_damage(elapsed) < config.stalemate.min_average_damage);
    let repeating = ctx
        .state
        .character(side)
        .is_repeating(config.escalation.repetition_window);

    if !stalled && !repeating {
        return Ok(());
    }

    let attacker = ctx.state.character(side);
    let already = attacker.flags.contains(CombatFlags::FORCED_ESCALATION);
    let cooling_down = ctx
        .state
        .last_escalation_turn
        .is_some_and(|last| turn.saturating_sub(last) < config.escalation.cooldown_window);
    if already || cooling_down {
        tracing::debug!(turn, ?side, already, cooling_down, "escalation suppressed");
        return Ok(());
    }

    ctx.state
        .character_mut(side)
        .flags
        .insert(CombatFlags::FORCED_ESCALATION);
    ctx.state.escalation_cycles += 1;
    ctx.state.last_escalation_turn = Some(turn);
    if ctx.state.phase == BattlePhase::Positioning {
        ctx.state.phase = BattlePhase::Escalation;
    }

    let reason = if repeating { "repetition" } else { "stalemate" };
    tracing::info!(turn, ?side, reason, "forced escalation");
    ctx.log_state_change(
        side,
        LogKind::Escalation,
        "forced_escalation",
        &format!("is forced to escalate ({reason})"),
    );

    Ok(())
}
