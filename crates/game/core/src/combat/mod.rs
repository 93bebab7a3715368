//! Combat resolution.
//!
//! - [`damage`]: pure damage arithmetic with a fixed modifier stacking order
//! - [`resolver`]: applies a move to both combatants and builds the log entry
//! - [`maneuver`]: charge-up and repositioning move shapes
//!
//! Randomness is drawn through [`TurnContext::roll`], so resolutions replay
//! identically for the same battle seed.

pub mod damage;
pub mod maneuver;
pub mod resolver;

pub use damage::{
    DamageBreakdown, DamageModifiers, calculate_damage, calculate_finisher_damage, crit_chance,
    scale_pct,
};
pub use maneuver::reposition_chance;
pub use resolver::{MoveResolver, Resolution, ResolveError, TurnContext};
