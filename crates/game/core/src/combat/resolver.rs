//! Move resolution.
//!
//! [`MoveResolver`] turns a chosen move into state mutations on the two
//! combatants: damage, chi, cooldown bookkeeping, history, position and
//! secondary effects. It returns a [`Resolution`] carrying the log entry the
//! pipeline appends.

use crate::config::BattleConfig;
use crate::cooldown::{CooldownError, CooldownTracker};
use crate::env::{BattleEnv, NarrativeRequest, RollContext, compute_seed};
use crate::error::{BattleError, ErrorSeverity};
use crate::moves::{EffectTarget, MoveDefinition, MoveEffect, MoveId};
use crate::state::{
    BattlePhase, Character, CombatFlags, EntryMeta, LogEntry, LogKind, Outcome, Position, Side,
    Terrain,
};

use super::damage::{
    DamageBreakdown, DamageModifiers, calculate_damage, calculate_finisher_damage, crit_chance,
};

/// Errors raised while resolving a move.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Finisher used while its unlock condition is not met.
    #[error("finisher '{move_id}' is locked")]
    FinisherLocked { move_id: MoveId },

    /// Second finisher in the same battle.
    #[error("finisher '{move_id}' used after the finisher was spent")]
    FinisherSpent { move_id: MoveId },

    #[error(transparent)]
    Cooldown(#[from] CooldownError),
}

impl BattleError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FinisherLocked { .. } | Self::FinisherSpent { .. } => ErrorSeverity::Validation,
            Self::Cooldown(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::FinisherLocked { .. } => "RESOLVE_FINISHER_LOCKED",
            Self::FinisherSpent { .. } => "RESOLVE_FINISHER_SPENT",
            Self::Cooldown(error) => error.error_code(),
        }
    }
}

/// Per-turn inputs shared by every resolution.
#[derive(Clone, Copy, Debug)]
pub struct TurnContext<'a> {
    pub env: &'a BattleEnv<'a>,
    pub seed: u64,
    pub turn: u32,
    pub phase: BattlePhase,
    pub terrain: Terrain,
    pub sudden_death: bool,
    /// Side performing the move.
    pub actor: Side,
}

impl<'a> TurnContext<'a> {
    pub fn config(&self) -> &'a BattleConfig {
        self.env.config
    }

    /// Percentage roll for the acting side.
    pub fn roll(&self, context: RollContext) -> u32 {
        self.env
            .rng
            .roll_percent(compute_seed(self.seed, self.turn, self.actor, context))
    }

    /// Crit roll against `chance` percent.
    fn roll_crit(&self, chance: u32) -> bool {
        chance > 0 && self.roll(RollContext::Crit) < chance
    }
}

/// Outcome of one resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub damage: u32,
    pub outcome: Outcome,
    pub breakdown: DamageBreakdown,
    /// Entry to append to the battle log.
    pub entry: LogEntry,
}

/// Move resolver.
pub struct MoveResolver;

impl MoveResolver {
    /// Resolves an instant move or a finisher.
    ///
    /// # Errors
    ///
    /// Locked or spent finishers and cooldown bookkeeping failures are caller
    /// bugs; the pipeline discards the working snapshot when they occur.
    pub fn resolve(
        definition: &MoveDefinition,
        attacker: &mut Character,
        target: &mut Character,
        ctx: &TurnContext<'_>,
    ) -> Result<Resolution, ResolveError> {
        if definition.is_finisher() {
            return Self::resolve_finisher(definition, attacker, target, ctx);
        }

        let breakdown = Self::strike(definition, attacker, target, ctx, false);
        let chi_spent = Self::pay(definition, attacker, ctx)?;
        let healed = Self::apply_effects(definition, attacker, target);
        if let Some(position) = definition.sets_position {
            attacker.position = position;
        }

        let outcome = if !definition.is_damaging() {
            Outcome::Support
        } else if breakdown.is_critical() {
            Outcome::Critical
        } else {
            Outcome::Hit
        };

        Ok(Self::finish(
            definition, attacker, target, ctx, breakdown, outcome, chi_spent, healed,
        ))
    }

    fn resolve_finisher(
        definition: &MoveDefinition,
        attacker: &mut Character,
        target: &mut Character,
        ctx: &TurnContext<'_>,
    ) -> Result<Resolution, ResolveError> {
        if attacker.flags.contains(CombatFlags::USED_FINISHER) {
            return Err(ResolveError::FinisherSpent {
                move_id: definition.id.clone(),
            });
        }
        let unlocked = definition
            .finisher
            .is_some_and(|condition| condition.is_met(attacker, target, ctx.phase, ctx.turn));
        if !unlocked {
            return Err(ResolveError::FinisherLocked {
                move_id: definition.id.clone(),
            });
        }

        let critical = ctx.roll_crit(crit_chance(definition, attacker));
        let breakdown = calculate_finisher_damage(definition, attacker, critical, ctx.config());
        target.take_damage(breakdown.total);
        attacker.flags.insert(CombatFlags::USED_FINISHER);

        let chi_spent = Self::pay(definition, attacker, ctx)?;
        let healed = Self::apply_effects(definition, attacker, target);
        if let Some(position) = definition.sets_position {
            attacker.position = position;
        }

        let outcome = if target.is_defeated() {
            Outcome::FinisherLanded
        } else {
            Outcome::FinisherFailed
        };

        tracing::debug!(
            move_id = %definition.id,
            damage = breakdown.total,
            landed = target.is_defeated(),
            "finisher resolved"
        );

        Ok(Self::finish(
            definition, attacker, target, ctx, breakdown, outcome, chi_spent, healed,
        ))
    }

    /// Computes and applies damage for a regular hit.
    pub(super) fn strike(
        definition: &MoveDefinition,
        attacker: &Character,
        target: &mut Character,
        ctx: &TurnContext<'_>,
        charge_release: bool,
    ) -> DamageBreakdown {
        let modifiers = DamageModifiers {
            critical: ctx.roll_crit(crit_chance(definition, attacker)),
            escalated: ctx.sudden_death || attacker.flags.contains(CombatFlags::FORCED_ESCALATION),
            charge_release,
        };
        let breakdown = calculate_damage(definition, attacker, target, modifiers, ctx.config());

        if breakdown.exposed {
            target.flags.remove(CombatFlags::EXPOSED);
        }
        target.take_damage(breakdown.total);
        breakdown
    }

    /// Deducts chi, applies cooldown bookkeeping and records history.
    ///
    /// Returns the chi actually spent.
    pub(super) fn pay(
        definition: &MoveDefinition,
        attacker: &mut Character,
        ctx: &TurnContext<'_>,
    ) -> Result<u32, CooldownError> {
        let cost = definition
            .chi_cost
            .saturating_sub(attacker.position.chi_discount());
        let spent = cost.min(attacker.chi);
        attacker.chi -= spent;

        CooldownTracker::apply(attacker, definition, ctx.turn)?;
        attacker.record_move(definition, ctx.turn);
        Ok(spent)
    }

    /// Applies secondary effects. Returns the health restored to the attacker.
    pub(super) fn apply_effects(
        definition: &MoveDefinition,
        attacker: &mut Character,
        target: &mut Character,
    ) -> u32 {
        let mut healed = 0;
        for effect in &definition.effects {
            match *effect {
                MoveEffect::ApplyStatus {
                    kind,
                    target: EffectTarget::User,
                    duration,
                    magnitude,
                } => attacker.status.add(kind, duration, magnitude),
                MoveEffect::ApplyStatus {
                    kind,
                    target: EffectTarget::Opponent,
                    duration,
                    magnitude,
                } => target.status.add(kind, duration, magnitude),
                MoveEffect::Expose => target.flags.insert(CombatFlags::EXPOSED),
                MoveEffect::Stun => {
                    if !target.is_defeated() {
                        target.charge.reset();
                        target.position = Position::Stunned;
                        target.flags.remove(CombatFlags::STUN_SPENT);
                    }
                }
                MoveEffect::Heal(amount) => {
                    let before = attacker.health;
                    attacker.heal(amount);
                    healed += attacker.health - before;
                }
                MoveEffect::RestoreChi(amount) => attacker.chi += amount,
            }
        }
        healed
    }

    /// Builds the resolution and its log entry.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn finish(
        definition: &MoveDefinition,
        attacker: &Character,
        target: &Character,
        ctx: &TurnContext<'_>,
        breakdown: DamageBreakdown,
        outcome: Outcome,
        chi_spent: u32,
        healed: u32,
    ) -> Resolution {
        let (kind, context) = match outcome {
            Outcome::FinisherLanded | Outcome::FinisherFailed => (LogKind::Finisher, "finisher"),
            Outcome::ChargeProgress | Outcome::ChargeReleased | Outcome::Interrupted => {
                (LogKind::Charge, "charge")
            }
            Outcome::RepositionSucceeded | Outcome::RepositionFailed => {
                (LogKind::Reposition, "reposition")
            }
            _ => (LogKind::Move, "move"),
        };
        let damage = breakdown.total;

        let result = ctx.env.narrate(&NarrativeRequest {
            actor_name: &attacker.name,
            target_name: Some(&target.name),
            context,
            outcome,
            move_name: Some(&definition.name),
            damage: (damage > 0).then_some(damage),
        });

        let mut entry = LogEntry::by(ctx.turn, ctx.actor, attacker.name.clone(), kind, definition.name.clone())
            .with_target(ctx.actor.opponent())
            .with_result(result)
            .with_meta(EntryMeta {
                move_id: Some(definition.id.clone()),
                outcome: Some(outcome),
                chi_spent,
                critical: breakdown.is_critical(),
                desperation: breakdown.desperation_applied(),
                exposed: breakdown.exposed,
                punish: breakdown.punish_pct.is_some(),
                escalated: breakdown.escalation_pct.is_some(),
                healed,
            });
        if damage > 0 {
            entry = entry.with_damage(damage);
        }

        Resolution {
            damage,
            outcome,
            breakdown,
            entry,
        }
    }
}
