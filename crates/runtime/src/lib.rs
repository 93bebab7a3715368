//! Runtime orchestration for deterministic duels.
//!
//! This crate wires the move provider abstraction, content and the
//! `battle-core` turn pipeline into a runtime API. Consumers build a
//! [`BattleRuntime`] to drive turns one at a time or run a battle to
//! completion and collect a [`BattleReport`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`providers`] contains the bundled move providers
//! - [`report`] summarises finished battles
pub mod api;
pub mod providers;
pub mod report;
pub mod runtime;

pub use api::{MoveProvider, Result, RuntimeError, TurnEvent, TurnObserver};
pub use providers::{AiMoveProvider, ScriptedMoveProvider};
pub use report::{BattleReport, CombatantSummary};
pub use runtime::{BattleRuntime, BattleRuntimeBuilder, RuntimeConfig};
