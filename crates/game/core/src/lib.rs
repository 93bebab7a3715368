//! Deterministic duel rules shared across the runtime and tools.
//!
//! `battle-core` defines the canonical rules of a two-combatant duel: the move
//! catalog types, the battle state, the cooldown tracker, the tactical AI and
//! the turn pipeline. All state mutation flows through
//! [`engine::BattleEngine::process_turn`], which takes a snapshot and returns a
//! new one; supporting crates depend on the types re-exported here.
pub mod ai;
pub mod combat;
pub mod config;
pub mod cooldown;
pub mod engine;
pub mod env;
pub mod error;
pub mod moves;
pub mod state;

pub use ai::{
    LastMoveClass, MoveScore, MoveScorer, MoveSelection, MoveSelector, TacticalDecision,
    TacticalPriority, TacticalPriorityEngine,
};
pub use combat::{DamageBreakdown, MoveResolver, Resolution, ResolveError, TurnContext};
pub use config::BattleConfig;
pub use cooldown::{Availability, CooldownError, CooldownTracker, UnavailableReason};
pub use engine::{BattleEngine, PhaseError, TurnError, TurnInput, TurnPhase, process_turn};
pub use env::{
    BattleEnv, CharacterTemplate, MoveOracle, MovesSnapshot, NarrativeOracle, NarrativeRequest,
    OracleError, PcgRng, RngOracle, RollContext, TemplateNarrative, compute_seed,
};
pub use error::{BattleError, ErrorSeverity};
pub use moves::{
    CritProfile, DesperationBuff, EffectTarget, MoveCategory, MoveDefinition, MoveEffect, MoveId,
    MoveShape, MoveTag, UnlockCondition,
};
pub use state::{
    BaseStats, BattleAnalytics, BattlePhase, BattleState, BattleStatus, Character, CharacterId,
    CombatFlags, DesperationTier, DrawReason, EntryMeta, InvariantViolation, LogEntry, LogKind,
    MentalState, MoodTags, Outcome, Position, Side, StatusEffects, StatusKind, Terrain, Thresholds,
};
