//! Multi-turn and rolled move shapes: charge-ups and repositioning.

use crate::config::{BattleConfig, RepositionConfig};
use crate::env::RollContext;
use crate::moves::MoveDefinition;
use crate::state::{Character, Outcome, Position, Terrain};

use super::damage::DamageBreakdown;
use super::resolver::{MoveResolver, Resolution, ResolveError, TurnContext};

/// Reposition success chance in percent.
///
/// `base + agility / divisor + terrain + move bonus - step * attempts`,
/// clamped to the configured bounds.
pub fn reposition_chance(
    character: &Character,
    definition_bonus: i32,
    terrain: Terrain,
    config: &RepositionConfig,
) -> u32 {
    let chance = config.base_success_pct as i32
        + (character.stats.agility / config.agility_divisor.max(1)) as i32
        + terrain.reposition_modifier()
        + definition_bonus
        - (config.diminishing_step_pct * character.reposition_attempts) as i32;

    chance.clamp(config.min_success_pct as i32, config.max_success_pct as i32) as u32
}

impl MoveResolver {
    /// Rolls a reposition attempt.
    ///
    /// Success moves the attacker to the move's declared position (high
    /// ground if none); failure leaves them repositioning and punishable.
    /// Chi and cooldown are spent either way.
    pub fn attempt_reposition(
        definition: &MoveDefinition,
        success_bonus_pct: i32,
        attacker: &mut Character,
        target: &mut Character,
        ctx: &TurnContext<'_>,
    ) -> Result<Resolution, ResolveError> {
        let chance = reposition_chance(
            attacker,
            success_bonus_pct,
            ctx.terrain,
            &ctx.config().reposition,
        );
        let roll = ctx.roll(RollContext::Reposition);
        let succeeded = roll < chance;

        let chi_spent = Self::pay(definition, attacker, ctx)?;
        attacker.reposition_attempts += 1;

        let (outcome, healed) = if succeeded {
            attacker.position = definition.sets_position.unwrap_or(Position::HighGround);
            let healed = Self::apply_effects(definition, attacker, target);
            (Outcome::RepositionSucceeded, healed)
        } else {
            attacker.position = Position::Repositioning;
            (Outcome::RepositionFailed, 0)
        };

        tracing::debug!(
            move_id = %definition.id,
            chance,
            roll,
            succeeded,
            "reposition attempt"
        );

        Ok(Self::finish(
            definition,
            attacker,
            target,
            ctx,
            DamageBreakdown::default(),
            outcome,
            chi_spent,
            healed,
        ))
    }

    /// Starts charging a charge-up move.
    ///
    /// Chi and cooldown are paid up front. A rate that reaches full charge
    /// immediately releases on the same turn.
    pub fn begin_charge(
        definition: &MoveDefinition,
        rate: u32,
        attacker: &mut Character,
        target: &mut Character,
        ctx: &TurnContext<'_>,
    ) -> Result<Resolution, ResolveError> {
        let chi_spent = Self::pay(definition, attacker, ctx)?;
        attacker.charge.move_id = Some(definition.id.clone());
        attacker.charge.progress = rate.min(BattleConfig::FULL_CHARGE);
        attacker.position = Position::Charging;

        if attacker.charge.progress >= BattleConfig::FULL_CHARGE {
            return Ok(Self::release_charge(definition, attacker, target, ctx, chi_spent));
        }

        Ok(Self::finish(
            definition,
            attacker,
            target,
            ctx,
            DamageBreakdown::default(),
            Outcome::ChargeProgress,
            chi_spent,
            0,
        ))
    }

    /// Advances an ongoing charge by one turn.
    ///
    /// While the opponent holds an aggressive or neutral position the charge
    /// may be interrupted, which discards all progress.
    pub fn continue_charge(
        definition: &MoveDefinition,
        rate: u32,
        attacker: &mut Character,
        target: &mut Character,
        ctx: &TurnContext<'_>,
    ) -> Resolution {
        if target.position.threatens_charge() {
            let roll = ctx.roll(RollContext::ChargeInterrupt);
            if roll < ctx.config().charge.interrupt_chance_pct {
                tracing::debug!(move_id = %definition.id, roll, "charge interrupted");
                attacker.charge.reset();
                attacker.position = Position::Neutral;
                return Self::finish(
                    definition,
                    attacker,
                    target,
                    ctx,
                    DamageBreakdown::default(),
                    Outcome::Interrupted,
                    0,
                    0,
                );
            }
        }

        attacker.charge.progress =
            (attacker.charge.progress + rate.max(1)).min(BattleConfig::FULL_CHARGE);
        if attacker.charge.progress >= BattleConfig::FULL_CHARGE {
            return Self::release_charge(definition, attacker, target, ctx, 0);
        }

        Self::finish(
            definition,
            attacker,
            target,
            ctx,
            DamageBreakdown::default(),
            Outcome::ChargeProgress,
            0,
            0,
        )
    }

    fn release_charge(
        definition: &MoveDefinition,
        attacker: &mut Character,
        target: &mut Character,
        ctx: &TurnContext<'_>,
        chi_spent: u32,
    ) -> Resolution {
        attacker.charge.reset();
        attacker.position = definition.sets_position.unwrap_or(Position::Neutral);

        let breakdown = Self::strike(definition, attacker, target, ctx, true);
        let healed = Self::apply_effects(definition, attacker, target);

        Self::finish(
            definition,
            attacker,
            target,
            ctx,
            breakdown,
            Outcome::ChargeReleased,
            chi_spent,
            healed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveId;
    use crate::state::{BaseStats, CharacterId};

    fn runner(agility: u32) -> Character {
        Character::new(
            CharacterId(3),
            "Ty Lee",
            BaseStats::new(8, 8, agility),
            vec![MoveId::new("flip")],
            &BattleConfig::default(),
        )
    }

    #[test]
    fn reposition_chance_diminishes_per_attempt() {
        let config = RepositionConfig::default();
        let mut character = runner(25);

        assert_eq!(reposition_chance(&character, 0, Terrain::Open, &config), 75);
        character.reposition_attempts = 2;
        assert_eq!(reposition_chance(&character, 0, Terrain::Open, &config), 45);
    }

    #[test]
    fn reposition_chance_is_clamped() {
        let config = RepositionConfig::default();
        let mut character = runner(100);
        assert_eq!(reposition_chance(&character, 40, Terrain::Open, &config), 95);

        character.reposition_attempts = 10;
        assert_eq!(reposition_chance(&character, 0, Terrain::Confined, &config), 10);
    }
}
