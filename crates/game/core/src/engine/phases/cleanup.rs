//! Tactical-state cleanup and turn advance.

use crate::engine::TurnError;
use crate::state::{BattleStatus, CombatFlags, DrawReason, Position};

use super::PhaseContext;

/// Resets transient positions at the turn boundary.
///
/// Both reset on the waiting side once the opponent has acted against it: a
/// failed reposition, and a stun whose victim has already sat out a turn. A
/// stun therefore costs its victim one turn and leaves it punishable for one
/// attack.
pub(super) fn run(ctx: &mut PhaseContext<'_, '_>) -> Result<(), TurnError> {
    let waiting = ctx.state.active.opponent();
    let defender = ctx.state.character_mut(waiting);
    match defender.position {
        Position::Repositioning => defender.position = Position::Neutral,
        Position::Stunned if defender.flags.contains(CombatFlags::STUN_SPENT) => {
            defender.position = Position::Neutral;
            defender.flags.remove(CombatFlags::STUN_SPENT);
        }
        _ => {}
    }

    Ok(())
}

/// Updates the stalemate counter, switches the active side and advances the turn.
pub(super) fn advance(ctx: &mut PhaseContext<'_, '_>) -> Result<(), TurnError> {
    let dealt: u32 = ctx.turn_entries().iter().map(|entry| entry.damage_dealt()).sum();
    if dealt == 0 {
        ctx.state.stalemate_counter += 1;
    } else {
        ctx.state.stalemate_counter = 0;
    }

    ctx.state.active = ctx.state.active.opponent();
    ctx.state.turn += 1;
    ctx.state.refresh_analytics();

    tracing::debug!(
        turn = ctx.state.turn,
        dealt,
        stalemate = ctx.state.stalemate_counter,
        "turn advanced"
    );

    if ctx.state.turn > ctx.env.config.max_turns {
        ctx.state.conclude(BattleStatus::Draw(DrawReason::TurnLimit));
    }

    Ok(())
}
