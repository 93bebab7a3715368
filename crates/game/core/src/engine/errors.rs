//! Error types for the turn pipeline.

use crate::combat::ResolveError;
use crate::cooldown::UnavailableReason;
use crate::error::{BattleError, ErrorSeverity};
use crate::moves::MoveId;
use crate::state::InvariantViolation;

/// Identifies which stage of the turn pipeline is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    PreChecks,
    ValidateEndState,
    Desperation,
    Finisher,
    Escalation,
    TacticalMove,
    EndOfTurn,
    MentalState,
    Cleanup,
    Advance,
    PostValidate,
}

impl TurnPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPhase::PreChecks => "pre_checks",
            TurnPhase::ValidateEndState => "validate_end_state",
            TurnPhase::Desperation => "desperation",
            TurnPhase::Finisher => "finisher",
            TurnPhase::Escalation => "escalation",
            TurnPhase::TacticalMove => "tactical_move",
            TurnPhase::EndOfTurn => "end_of_turn",
            TurnPhase::MentalState => "mental_state",
            TurnPhase::Cleanup => "cleanup",
            TurnPhase::Advance => "advance",
            TurnPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a pipeline phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseError<E> {
    pub phase: TurnPhase,
    pub error: E,
}

impl<E> PhaseError<E> {
    pub fn new(phase: TurnPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for PhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for PhaseError<E> {}

/// Errors surfaced while processing a turn.
///
/// The caller's snapshot is never modified when an error is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("battle already concluded")]
    BattleConcluded,

    #[error("move '{move_id}' is not in the active moveset")]
    UnknownMove { move_id: MoveId },

    #[error("move '{move_id}' cannot be used in the current position or terrain")]
    IllegalMove { move_id: MoveId },

    #[error("move '{move_id}' is unavailable: {reason}")]
    MoveUnavailable {
        move_id: MoveId,
        reason: UnavailableReason,
    },

    #[error("move resolution failed: {0}")]
    Resolve(PhaseError<ResolveError>),

    #[error("invariant violated: {0}")]
    Invariant(PhaseError<InvariantViolation>),
}

impl TurnError {
    pub(crate) fn resolve(phase: TurnPhase, error: ResolveError) -> Self {
        Self::Resolve(PhaseError::new(phase, error))
    }
}

impl BattleError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::BattleConcluded => ErrorSeverity::Fatal,
            Self::UnknownMove { .. } | Self::IllegalMove { .. } | Self::MoveUnavailable { .. } => {
                ErrorSeverity::Validation
            }
            Self::Resolve(inner) => inner.error.severity(),
            Self::Invariant(inner) => inner.error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleConcluded => "TURN_BATTLE_CONCLUDED",
            Self::UnknownMove { .. } => "TURN_UNKNOWN_MOVE",
            Self::IllegalMove { .. } => "TURN_ILLEGAL_MOVE",
            Self::MoveUnavailable { .. } => "TURN_MOVE_UNAVAILABLE",
            Self::Resolve(inner) => inner.error.error_code(),
            Self::Invariant(inner) => inner.error.error_code(),
        }
    }
}
