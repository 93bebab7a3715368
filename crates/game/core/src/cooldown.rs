//! Cooldown and uses tracking.
//!
//! Gates move legality and applies post-use bookkeeping. Remaining cooldown is
//! derived from the last-used turn (`max(0, last + cooldown - turn + 1)`), so
//! there is no separately stored countdown that could drift.

use crate::error::{BattleError, ErrorSeverity};
use crate::moves::{MoveDefinition, MoveId};
use crate::state::{BattlePhase, Character, MoveUsage};

/// Why a move cannot be used right now.
///
/// Variants are listed in precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum UnavailableReason {
    InsufficientChi,
    OnCooldown,
    NoUsesRemaining,
    BattlePhaseRestriction,
    /// Desperation move whose health gate is not met.
    DesperationLocked,
}

/// Availability answer for a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable(UnavailableReason),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    pub fn reason(&self) -> Option<UnavailableReason> {
        match self {
            Self::Available => None,
            Self::Unavailable(reason) => Some(*reason),
        }
    }
}

/// Errors raised when applying a move's usage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CooldownError {
    /// A desperation move was applied above its unlock threshold.
    #[error("move '{move_id}' applied at {health_percent}% health, unlock requires <= {threshold}%")]
    DesperationLocked {
        move_id: MoveId,
        health_percent: u32,
        threshold: u32,
    },

    /// A capped move was applied with no uses left.
    #[error("move '{move_id}' applied with no uses remaining")]
    UsesExhausted { move_id: MoveId },
}

impl BattleError for CooldownError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DesperationLocked { .. } => "COOLDOWN_DESPERATION_LOCKED",
            Self::UsesExhausted { .. } => "COOLDOWN_USES_EXHAUSTED",
        }
    }
}

/// Cooldown and uses tracker.
///
/// Stateless: all bookkeeping lives in [`Character::usage`].
pub struct CooldownTracker;

impl CooldownTracker {
    /// Answers whether `definition` may be used by `character` this turn.
    ///
    /// Reasons are checked in precedence order: chi, cooldown, uses, battle
    /// phase, then the desperation health gate.
    pub fn is_available(
        character: &Character,
        definition: &MoveDefinition,
        current_turn: u32,
        available_chi: u32,
        phase: BattlePhase,
    ) -> Availability {
        let usage = character.usage.get(&definition.id);

        if available_chi < definition.chi_cost {
            return Availability::Unavailable(UnavailableReason::InsufficientChi);
        }

        if let Some(last) = usage.and_then(|usage| usage.last_used_turn) {
            if definition.cooldown > 0 && current_turn <= last + definition.cooldown {
                return Availability::Unavailable(UnavailableReason::OnCooldown);
            }
        }

        if Self::uses_remaining(character, definition) == Some(0) {
            return Availability::Unavailable(UnavailableReason::NoUsesRemaining);
        }

        if !definition.phases.is_empty() && !definition.phases.contains(&phase) {
            return Availability::Unavailable(UnavailableReason::BattlePhaseRestriction);
        }

        if let Some(threshold) = definition.unlock_below_health {
            if character.health_percent() > threshold {
                return Availability::Unavailable(UnavailableReason::DesperationLocked);
            }
        }

        Availability::Available
    }

    /// Records a use of `definition` on `current_turn`.
    ///
    /// # Errors
    ///
    /// Applying a desperation move above its threshold, or a capped move with
    /// no uses left, is a caller bug and is reported instead of ignored.
    pub fn apply(
        character: &mut Character,
        definition: &MoveDefinition,
        current_turn: u32,
    ) -> Result<(), CooldownError> {
        if let Some(threshold) = definition.unlock_below_health {
            let health_percent = character.health_percent();
            if health_percent > threshold {
                return Err(CooldownError::DesperationLocked {
                    move_id: definition.id.clone(),
                    health_percent,
                    threshold,
                });
            }
        }

        let remaining = Self::uses_remaining(character, definition);
        if remaining == Some(0) {
            return Err(CooldownError::UsesExhausted {
                move_id: definition.id.clone(),
            });
        }

        let usage = character
            .usage
            .entry(definition.id.clone())
            .or_insert_with(|| MoveUsage {
                last_used_turn: None,
                uses_remaining: definition.max_uses,
            });
        usage.last_used_turn = Some(current_turn);
        usage.uses_remaining = remaining.map(|uses| uses - 1);

        Ok(())
    }

    /// Turns of cooldown left at `current_turn` (0 when ready).
    pub fn cooldown_remaining(
        character: &Character,
        definition: &MoveDefinition,
        current_turn: u32,
    ) -> u32 {
        character
            .usage
            .get(&definition.id)
            .and_then(|usage| usage.last_used_turn)
            .filter(|_| definition.cooldown > 0)
            .map(|last| (last + definition.cooldown + 1).saturating_sub(current_turn))
            .unwrap_or(0)
    }

    /// Uses left for capped moves; `None` when the move is uncapped.
    pub fn uses_remaining(character: &Character, definition: &MoveDefinition) -> Option<u32> {
        definition.max_uses.map(|max| {
            character
                .usage
                .get(&definition.id)
                .and_then(|usage| usage.uses_remaining)
                .unwrap_or(max)
        })
    }
}
