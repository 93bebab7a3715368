//! Battle state invariant violations.
//!
//! These indicate a pipeline or caller bug. They are never clamped away.

use crate::error::{BattleError, ErrorSeverity};

use super::Side;

/// Invariant broken by a battle state snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    /// Health exceeded its maximum.
    #[error("{side:?} health {health} exceeds maximum {max}")]
    HealthOutOfBounds { side: Side, health: u32, max: u32 },

    /// Charge progress exceeded full charge.
    #[error("{side:?} charge progress {progress} exceeds {max}")]
    ChargeOutOfBounds { side: Side, progress: u32, max: u32 },

    /// Mental stat exceeded 100.
    #[error("{side:?} mental state out of bounds (stability {stability}, pride {pride})")]
    MentalOutOfBounds {
        side: Side,
        stability: u32,
        pride: u32,
    },

    /// An irreversible threshold was cleared.
    #[error("{side:?} lost an irreversible mental threshold")]
    ThresholdCleared { side: Side },

    /// The turn counter moved backwards.
    #[error("turn counter regressed from {before} to {after}")]
    TurnRegressed { before: u32, after: u32 },

    /// A concluded battle was processed again.
    #[error("battle already concluded")]
    BattleConcluded,
}

impl BattleError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use InvariantViolation::*;
        match self {
            HealthOutOfBounds { .. } => "STATE_HEALTH_OUT_OF_BOUNDS",
            ChargeOutOfBounds { .. } => "STATE_CHARGE_OUT_OF_BOUNDS",
            MentalOutOfBounds { .. } => "STATE_MENTAL_OUT_OF_BOUNDS",
            ThresholdCleared { .. } => "STATE_THRESHOLD_CLEARED",
            TurnRegressed { .. } => "STATE_TURN_REGRESSED",
            BattleConcluded => "STATE_BATTLE_CONCLUDED",
        }
    }
}
