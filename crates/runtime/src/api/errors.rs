//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from move providers, content lookup and the turn pipeline
//! so clients can bubble them up with consistent context.
use battle_core::{BattleError, ErrorSeverity, OracleError, Side, TurnError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{side:?} move provider not set")]
    ProviderNotSet { side: Side },

    #[error("runtime requires an initial battle state before building")]
    MissingState,

    #[error("scripted moves for {side:?} ran out on turn {turn}")]
    ScriptExhausted { side: Side, turn: u32 },

    #[error("{side:?} move provider failed: {message}")]
    Provider { side: Side, message: String },

    #[error("battle still running after {steps} steps")]
    TurnGuard { steps: u32 },

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl RuntimeError {
    /// Severity of the underlying failure.
    ///
    /// Runtime-level failures are internal; pipeline and content errors keep
    /// their own classification.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Turn(error) => error.severity(),
            Self::Oracle(error) => error.severity(),
            Self::ScriptExhausted { .. } | Self::Provider { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Internal,
        }
    }

    /// True when retrying the turn with different input may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.severity(),
            ErrorSeverity::Recoverable | ErrorSeverity::Validation
        )
    }
}
