//! Append-only structured battle log.
//!
//! The pipeline appends one [`LogEntry`] per notable event. Consumers
//! (analytics, UI, reports) read the sequence but never mutate it.

use crate::moves::MoveId;

use super::Side;

/// Entry type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LogKind {
    /// A regular move resolved.
    Move,
    /// A finisher resolved.
    Finisher,
    /// Charge progress, interruption or release.
    Charge,
    /// Reposition attempt.
    Reposition,
    /// Desperation tier increased.
    Desperation,
    /// Forced escalation triggered.
    Escalation,
    /// End-of-turn status tick or expiry.
    Effect,
    /// Irreversible mental threshold crossed.
    Mental,
    /// Action skipped or replaced by a fallback.
    Fallback,
    /// Non-fatal heuristic observation (stalemate, loops).
    Advisory,
    /// Battle concluded.
    Conclusion,
}

/// Outcome class of an entry, shared with the narrative collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Hit,
    Critical,
    /// Non-damaging move resolved (buffs, evasion, heals).
    Support,
    FinisherLanded,
    FinisherFailed,
    ChargeProgress,
    ChargeReleased,
    Interrupted,
    RepositionSucceeded,
    RepositionFailed,
    Stunned,
    Skipped,
    StateChange,
    Victory,
    Draw,
}

impl Outcome {
    /// Setbacks reduce stability and pride of the actor.
    pub const fn is_setback(&self) -> bool {
        matches!(self, Self::FinisherFailed | Self::Interrupted)
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}

/// Mechanical metadata attached to an entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EntryMeta {
    pub move_id: Option<MoveId>,
    pub outcome: Option<Outcome>,
    pub chi_spent: u32,
    pub critical: bool,
    /// Move-level desperation buff applied.
    pub desperation: bool,
    pub exposed: bool,
    pub punish: bool,
    pub escalated: bool,
    pub healed: u32,
}

/// A single structured log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub turn: u32,
    /// `None` for system entries.
    pub actor: Option<Side>,
    pub actor_name: String,
    pub kind: LogKind,
    pub action: String,
    pub target: Option<Side>,
    pub damage: Option<u32>,
    /// Narrative or templated description of the result.
    pub result: String,
    pub meta: EntryMeta,
}

impl LogEntry {
    /// Creates a system entry.
    pub fn system(turn: u32, kind: LogKind, action: impl Into<String>) -> Self {
        Self {
            turn,
            actor: None,
            actor_name: "system".into(),
            kind,
            action: action.into(),
            target: None,
            damage: None,
            result: String::new(),
            meta: EntryMeta::default(),
        }
    }

    /// Creates an entry attributed to a combatant.
    pub fn by(
        turn: u32,
        actor: Side,
        actor_name: impl Into<String>,
        kind: LogKind,
        action: impl Into<String>,
    ) -> Self {
        Self {
            actor: Some(actor),
            actor_name: actor_name.into(),
            ..Self::system(turn, kind, action)
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: Side) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    #[must_use]
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = result.into();
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.meta.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: EntryMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.meta.outcome
    }

    /// Damage carried by the entry (0 if none).
    pub fn damage_dealt(&self) -> u32 {
        self.damage.unwrap_or(0)
    }

    /// True for entries recording a move being used.
    pub fn is_move_use(&self) -> bool {
        self.meta.move_id.is_some()
            && matches!(
                self.kind,
                LogKind::Move | LogKind::Finisher | LogKind::Charge | LogKind::Reposition
            )
    }
}
