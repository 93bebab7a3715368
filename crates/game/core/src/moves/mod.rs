//! Move catalog entries.
//!
//! Moves are immutable catalog data loaded once per process. The only mutable
//! per-move state (last use, remaining uses) lives on the character and is
//! managed by [`crate::cooldown::CooldownTracker`].

mod condition;
mod definition;

pub use condition::UnlockCondition;
pub use definition::{
    CritProfile, DesperationBuff, EffectTarget, MoveCategory, MoveDefinition, MoveEffect, MoveId,
    MoveShape, MoveTag,
};
