//! Common error infrastructure for battle-core.
//!
//! This module provides shared types and traits used across all error types in battle-core.
//! Domain-specific errors (e.g., `CooldownError`, `ResolveError`) are defined in their
//! respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Loud invariants**: Broken invariants surface as `Internal`/`Fatal` errors, never
//!   as silently clamped values
//! - **Severity Classification**: Errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Missing data the pipeline can route around (fallback move, skipped action)
/// - **Validation**: Invalid caller input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted battle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the pipeline can continue with a fallback.
    ///
    /// Examples: move id missing from the catalog, empty legal move set
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: externally supplied move is on cooldown
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: desperation move applied above its unlock threshold
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - battle state corrupted or misused, cannot continue.
    ///
    /// Examples: processing a finished battle, health outside its bounds
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// This trait provides a uniform interface for error classification across all
/// error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
