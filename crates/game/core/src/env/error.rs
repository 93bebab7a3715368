//! Oracle access errors.

use crate::error::{BattleError, ErrorSeverity};
use crate::moves::MoveId;

/// Errors raised when read-only battle data is missing or inconsistent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Move definition was not found in the catalog.
    #[error("move '{0}' not found in catalog")]
    MoveNotFound(MoveId),

    /// Character template was not found in the roster.
    #[error("character template '{0}' not found")]
    CharacterNotFound(String),

    /// Catalog contains the same move id twice.
    #[error("duplicate move id '{0}' in catalog")]
    DuplicateMove(MoveId),
}

impl BattleError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MoveNotFound(_) | CharacterNotFound(_) => ErrorSeverity::Validation,
            DuplicateMove(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MoveNotFound(_) => "ORACLE_MOVE_NOT_FOUND",
            CharacterNotFound(_) => "ORACLE_CHARACTER_NOT_FOUND",
            DuplicateMove(_) => "ORACLE_DUPLICATE_MOVE",
        }
    }
}
