//! Mental-state update.

use crate::config::MentalConfig;
use crate::engine::TurnError;
use crate::state::{
    BattleState, Character, DesperationTier, LogEntry, LogKind, MoodTags, Side, Threshold,
};

use super::PhaseContext;

/// Per-side tallies of this turn's log entries.
#[derive(Default)]
struct TurnTally {
    damage_taken: u32,
    big_hits: u32,
    setbacks: u32,
}

fn tally(entries: &[LogEntry], side: Side, big_hit: u32) -> TurnTally {
    let mut tally = TurnTally::default();
    for entry in entries {
        if entry.kind == LogKind::Conclusion {
            continue;
        }
        if entry.target == Some(side) {
            tally.damage_taken += entry.damage_dealt();
        }
        if entry.actor == Some(side) {
            if entry.damage_dealt() >= big_hit {
                tally.big_hits += 1;
            }
            if entry.outcome().is_some_and(|outcome| outcome.is_setback()) {
                tally.setbacks += 1;
            }
        }
    }
    tally
}

fn apply(character: &mut Character, tally: &TurnTally, config: &MentalConfig) {
    let mental = &mut character.mental;

    let pride_loss = tally.damage_taken / config.pride_damage_divisor.max(1)
        + tally.setbacks * config.setback_pride;
    let stability_loss = tally.damage_taken / config.stability_damage_divisor.max(1)
        + tally.setbacks * config.setback_stability;
    let pride_gain = tally.big_hits * config.big_hit_pride;
    let stability_gain = tally.big_hits * config.big_hit_stability;

    mental.pride = (mental.pride + pride_gain).saturating_sub(pride_loss).min(100);
    mental.stability = (mental.stability + stability_gain)
        .saturating_sub(stability_loss)
        .min(100);
}

fn moods(character: &Character) -> MoodTags {
    let mental = &character.mental;
    let mut moods = MoodTags::empty();
    moods.set(MoodTags::CONFIDENT, mental.pride >= 70);
    moods.set(MoodTags::RATTLED, mental.stability < 50);
    moods.set(MoodTags::FURIOUS, mental.pride < 30);
    moods.set(
        MoodTags::DESPERATE,
        character.desperation >= DesperationTier::Desperate,
    );
    moods
}

/// Thresholds newly crossed by `side`.
fn cross_thresholds(state: &mut BattleState, side: Side, config: &MentalConfig) -> Vec<Threshold> {
    let character = state.character_mut(side);
    let stability = character.mental.stability;

    let mut crossed = Vec::new();
    if stability < config.unhinged_below && character.thresholds.mark(Threshold::Unhinged) {
        crossed.push(Threshold::Unhinged);
    }
    if stability < config.broken_below && character.thresholds.mark(Threshold::Broken) {
        crossed.push(Threshold::Broken);
    }
    crossed
}

/// Recomputes stability, pride and moods from this turn's entries and marks
/// irreversible thresholds.
pub(super) fn run(ctx: &mut PhaseContext<'_, '_>) -> Result<(), TurnError> {
    let config = ctx.env.config;
    let tallies = Side::BOTH.map(|side| tally(ctx.turn_entries(), side, config.combat.big_hit));

    for side in Side::BOTH {
        let character = ctx.state.character_mut(side);
        apply(character, &tallies[side.index()], &config.mental);
        character.mental.moods = moods(character);

        for threshold in cross_thresholds(&mut ctx.state, side, &config.mental) {
            let label: &'static str = threshold.into();
            tracing::info!(turn = ctx.state.turn, ?side, threshold = label, "mental threshold crossed");
            ctx.log_state_change(side, LogKind::Mental, label, &format!("becomes {label}"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Outcome;

    fn hit(turn: u32, actor: Side, damage: u32) -> LogEntry {
        LogEntry::by(turn, actor, "Zuko", LogKind::Move, "Fire Blast")
            .with_target(actor.opponent())
            .with_damage(damage)
            .with_outcome(Outcome::Hit)
    }

    #[test]
    fn tally_separates_dealt_and_taken() {
        let entries = [hit(4, Side::First, 18), hit(4, Side::Second, 6)];

        let first = tally(&entries, Side::First, 15);
        assert_eq!(first.damage_taken, 6);
        assert_eq!(first.big_hits, 1);

        let second = tally(&entries, Side::Second, 15);
        assert_eq!(second.damage_taken, 18);
        assert_eq!(second.big_hits, 0);
    }

    #[test]
    fn setbacks_cost_pride_and_stability() {
        let config = MentalConfig::default();
        let mut character = Character::new(
            crate::state::CharacterId(1),
            "Zuko",
            crate::state::BaseStats::new(10, 10, 10),
            Vec::new(),
            &crate::config::BattleConfig::default(),
        );
        let tally = TurnTally {
            damage_taken: 12,
            big_hits: 0,
            setbacks: 1,
        };

        apply(&mut character, &tally, &config);
        assert_eq!(character.mental.pride, 100 - 6 - 10);
        assert_eq!(character.mental.stability, 100 - 4 - 8);
    }
}
