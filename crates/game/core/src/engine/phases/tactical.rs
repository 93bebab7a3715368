//! Tactical move phase.

use crate::ai::MoveSelector;
use crate::combat::{MoveResolver, Resolution};
use crate::config::BattleConfig;
use crate::cooldown::{Availability, CooldownTracker};
use crate::engine::{TurnError, TurnPhase};
use crate::env::NarrativeRequest;
use crate::moves::{MoveDefinition, MoveId, MoveShape};
use crate::state::{CombatFlags, LogEntry, LogKind, Outcome, Position, Side};

use super::PhaseContext;
use super::finisher::turn_context;

/// Chooses and resolves the active side's move for this turn.
///
/// Skipped when the finisher phase already acted. A stunned side loses the
/// turn, a charging side continues its charge, otherwise the externally
/// chosen move or the AI's pick is resolved according to its shape.
pub(super) fn run(ctx: &mut PhaseContext<'_, '_>) -> Result<(), TurnError> {
    if ctx.finisher_used {
        return Ok(());
    }

    let side = ctx.state.active;
    let me = ctx.state.character(side);

    if me.position == Position::Stunned {
        ctx.state
            .character_mut(side)
            .flags
            .insert(CombatFlags::STUN_SPENT);
        log_fallback(ctx, side, "stunned", Outcome::Stunned);
        return Ok(());
    }

    if let Some(charging) = me.charge.move_id.clone() {
        return continue_charge(ctx, side, &charging);
    }

    let definition = match ctx.input.chosen_move.clone() {
        Some(id) => match chosen_move(ctx, side, &id)? {
            Some(definition) => definition,
            None => return Ok(()),
        },
        None => {
            let selection = MoveSelector::select_best_move(&ctx.state, side, ctx.env);
            tracing::debug!(
                ?side,
                move_id = %selection.definition.id,
                priority = selection.decision.priority.label(),
                fallback = selection.is_fallback(),
                "AI selected move"
            );
            selection.definition
        }
    };

    execute(ctx, side, &definition)
}

/// Validates an externally chosen move.
///
/// Returns `Ok(None)` when the id is missing from the catalog: the action is
/// skipped with a fallback entry instead of failing the turn.
fn chosen_move(
    ctx: &mut PhaseContext<'_, '_>,
    side: Side,
    id: &MoveId,
) -> Result<Option<MoveDefinition>, TurnError> {
    let Some(definition) = ctx.env.moves.move_by_id(id) else {
        tracing::warn!(?side, move_id = %id, "chosen move missing from catalog, skipping");
        log_fallback(ctx, side, id.as_str(), Outcome::Skipped);
        return Ok(None);
    };

    let state = &ctx.state;
    let me = state.character(side);
    if !me.knows(id) && id != &ctx.env.config.basic_move {
        return Err(TurnError::UnknownMove {
            move_id: id.clone(),
        });
    }

    let position_ok = definition.required_positions.is_empty()
        || definition.required_positions.contains(&me.position);
    let terrain_ok = definition.terrain.is_empty() || definition.terrain.contains(&state.terrain);
    if definition.is_finisher() || !position_ok || !terrain_ok {
        return Err(TurnError::IllegalMove {
            move_id: id.clone(),
        });
    }

    match CooldownTracker::is_available(
        me,
        definition,
        state.turn,
        me.chi + me.position.chi_discount(),
        state.phase,
    ) {
        Availability::Available => Ok(Some(definition.clone())),
        Availability::Unavailable(reason) => Err(TurnError::MoveUnavailable {
            move_id: id.clone(),
            reason,
        }),
    }
}

/// Resolves `definition` according to its shape.
fn execute(
    ctx: &mut PhaseContext<'_, '_>,
    side: Side,
    definition: &MoveDefinition,
) -> Result<(), TurnError> {
    let turn_ctx = turn_context(&ctx.state, ctx, side);
    let (attacker, target) = ctx.state.pair_mut(side);

    if !matches!(definition.shape, MoveShape::Reposition { .. }) {
        attacker.reposition_attempts = 0;
    }

    let resolution = match definition.shape {
        MoveShape::Instant => MoveResolver::resolve(definition, attacker, target, &turn_ctx),
        MoveShape::Reposition { success_bonus_pct } => MoveResolver::attempt_reposition(
            definition,
            success_bonus_pct,
            attacker,
            target,
            &turn_ctx,
        ),
        MoveShape::Charge { rate } => {
            MoveResolver::begin_charge(definition, rate, attacker, target, &turn_ctx)
        }
    }
    .map_err(|error| TurnError::resolve(TurnPhase::TacticalMove, error))?;

    record(ctx, resolution);
    Ok(())
}

fn continue_charge(
    ctx: &mut PhaseContext<'_, '_>,
    side: Side,
    move_id: &MoveId,
) -> Result<(), TurnError> {
    let Some(definition) = ctx.env.moves.move_by_id(move_id).cloned() else {
        tracing::warn!(?side, %move_id, "charged move missing from catalog, dropping charge");
        let me = ctx.state.character_mut(side);
        me.charge.reset();
        me.position = Position::Neutral;
        log_fallback(ctx, side, move_id.as_str(), Outcome::Skipped);
        return Ok(());
    };

    let rate = match definition.shape {
        MoveShape::Charge { rate } => rate,
        _ => BattleConfig::FULL_CHARGE,
    };

    let turn_ctx = turn_context(&ctx.state, ctx, side);
    let (attacker, target) = ctx.state.pair_mut(side);
    let resolution = MoveResolver::continue_charge(&definition, rate, attacker, target, &turn_ctx);

    record(ctx, resolution);
    Ok(())
}

fn record(ctx: &mut PhaseContext<'_, '_>, resolution: Resolution) {
    tracing::debug!(
        turn = ctx.state.turn,
        action = %resolution.entry.action,
        outcome = resolution.outcome.label(),
        damage = resolution.damage,
        "move resolved"
    );
    ctx.state.push_log(resolution.entry);
    ctx.check_knockout();
}

fn log_fallback(ctx: &mut PhaseContext<'_, '_>, side: Side, action: &str, outcome: Outcome) {
    let name = ctx.state.character(side).name.clone();
    let result = ctx.env.narrate(&NarrativeRequest {
        actor_name: &name,
        target_name: None,
        context: action,
        outcome,
        move_name: None,
        damage: None,
    });
    let entry = LogEntry::by(ctx.state.turn, side, name, LogKind::Fallback, action)
        .with_outcome(outcome)
        .with_result(result);
    ctx.state.push_log(entry);
}
