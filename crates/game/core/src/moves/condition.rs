//! Unlock conditions for finishers.

use crate::state::{BattlePhase, Character, CombatFlags};

/// Condition that unlocks a finisher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnlockCondition {
    /// User's health percent is at or below the value.
    HealthBelow(u32),
    /// Battle is in the given tactical phase.
    Phase(BattlePhase),
    /// Opponent's health percent is at or below the value.
    TargetHealthBelow(u32),
    /// User is under forced escalation.
    Escalated,
    /// Turn counter has reached the value.
    TurnAtLeast(u32),
}

impl UnlockCondition {
    /// Evaluates the condition for `owner` facing `target`.
    pub fn is_met(
        &self,
        owner: &Character,
        target: &Character,
        phase: BattlePhase,
        turn: u32,
    ) -> bool {
        match *self {
            Self::HealthBelow(threshold) => owner.health_percent() <= threshold,
            Self::Phase(required) => phase == required,
            Self::TargetHealthBelow(threshold) => target.health_percent() <= threshold,
            Self::Escalated => owner.flags.contains(CombatFlags::FORCED_ESCALATION),
            Self::TurnAtLeast(required) => turn >= required,
        }
    }
}
