//! End-of-turn effects: status ticks and chi regeneration.

use crate::engine::TurnError;
use crate::state::{LogEntry, LogKind, Outcome, Side};

use super::PhaseContext;

pub(super) fn run(ctx: &mut PhaseContext<'_, '_>) -> Result<(), TurnError> {
    let turn = ctx.state.turn;
    let regen = ctx.env.config.chi_regen_per_turn;

    for side in Side::BOTH {
        let character = ctx.state.character_mut(side);
        let ticks = character.status.tick();
        let name = character.name.clone();

        let mut entries = Vec::new();
        for tick in ticks {
            let label: &'static str = tick.kind.into();
            if tick.damage > 0 {
                tracing::debug!(turn, ?side, status = label, damage = tick.damage, "status tick");
                character.take_damage(tick.damage);
                entries.push(
                    LogEntry::system(turn, LogKind::Effect, label)
                        .with_target(side)
                        .with_damage(tick.damage)
                        .with_outcome(Outcome::Hit)
                        .with_result(format!("{name} takes {} {label} damage", tick.damage)),
                );
            }
            if tick.expired {
                entries.push(
                    LogEntry::system(turn, LogKind::Effect, label)
                        .with_target(side)
                        .with_outcome(Outcome::StateChange)
                        .with_result(format!("{label} on {name} wears off")),
                );
            }
        }
        character.chi += regen;

        for entry in entries {
            ctx.state.push_log(entry);
        }
    }

    ctx.check_knockout();
    Ok(())
}
