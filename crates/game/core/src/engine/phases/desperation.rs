//! Desperation tier ratchet for the active combatant.

use crate::engine::TurnError;
use crate::state::{BattlePhase, DesperationTier, LogKind};

use super::PhaseContext;

/// Raises the active side's desperation tier when its health crossed a breakpoint.
///
/// Tiers never decrease within a battle, even after healing.
pub(super) fn run(ctx: &mut PhaseContext<'_, '_>) -> Result<(), TurnError> {
    let side = ctx.state.active;
    let config = ctx.env.config;
    let character = ctx.state.character_mut(side);
    let tier = DesperationTier::for_health(character.health_percent(), config);

    if !character.raise_desperation(tier, config) {
        return Ok(());
    }

    let label: &'static str = tier.into();
    tracing::info!(turn = ctx.state.turn, ?side, tier = label, "desperation increased");
    ctx.log_state_change(
        side,
        LogKind::Desperation,
        label,
        &format!("reaches {label} desperation"),
    );

    if tier >= DesperationTier::Extreme
        && matches!(
            ctx.state.phase,
            BattlePhase::Positioning | BattlePhase::Escalation
        )
    {
        ctx.state.phase = BattlePhase::Climax;
    }

    Ok(())
}
