//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe both combatants, turn
//! bookkeeping, analytics and the structured log. Runtime layers clone or
//! query this state but derive new snapshots exclusively through the engine.
mod analytics;
mod character;
mod error;
mod flags;
mod log;
mod status;

pub use analytics::BattleAnalytics;
pub use character::{
    BaseStats, ChargeState, Character, CharacterId, DesperationTier, MentalState, MoveRecord,
    MoveUsage, Position, StatModifiers,
};
pub use error::InvariantViolation;
pub use flags::{CombatFlags, MoodTags, Threshold, Thresholds};
pub use log::{EntryMeta, LogEntry, LogKind, Outcome};
pub use status::{StatusEffect, StatusEffects, StatusKind, StatusTick};

use crate::config::BattleConfig;

/// One of the two combatants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    #[default]
    First,
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Tactical phase marker of the battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    #[default]
    Positioning,
    Escalation,
    Climax,
    Stalemate,
}

/// Battlefield terrain.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Terrain {
    #[default]
    Open,
    Confined,
    Elevated,
    Aerial,
}

impl Terrain {
    /// Reposition success modifier in percent points.
    pub const fn reposition_modifier(&self) -> i32 {
        match self {
            Self::Open => 10,
            Self::Confined => -20,
            Self::Elevated => 0,
            Self::Aerial => 5,
        }
    }
}

/// Why a battle ended without a winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DrawReason {
    /// Hard turn ceiling reached.
    TurnLimit,
    /// Both combatants fell on the same turn.
    DoubleKnockout,
    /// The battle ended without any damage dealt.
    NoDamage,
}

/// Lifecycle of a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleStatus {
    #[default]
    Ongoing,
    Victory(Side),
    Draw(DrawReason),
}

/// Canonical snapshot of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at battle creation and never modified.
    pub seed: u64,
    /// Combatants indexed by [`Side::index`].
    pub participants: [Character; 2],
    /// Side taking the current turn.
    pub active: Side,
    /// Starts at 1 and increases by one per completed turn.
    pub turn: u32,
    pub phase: BattlePhase,
    pub terrain: Terrain,
    pub status: BattleStatus,
    /// Set by the stalemate heuristics; amplifies all damage.
    pub sudden_death: bool,
    /// Consecutive turns without damage.
    pub stalemate_counter: u32,
    /// Number of escalations triggered so far.
    pub escalation_cycles: u32,
    pub last_escalation_turn: Option<u32>,
    /// Lazily initialized by the pipeline.
    pub analytics: Option<BattleAnalytics>,
    pub log: Vec<LogEntry>,
}

impl BattleState {
    /// Creates a fresh battle. `first` takes the opening turn.
    pub fn new(first: Character, second: Character, terrain: Terrain, seed: u64) -> Self {
        Self {
            seed,
            participants: [first, second],
            active: Side::First,
            turn: 1,
            phase: BattlePhase::Positioning,
            terrain,
            status: BattleStatus::Ongoing,
            sudden_death: false,
            stalemate_counter: 0,
            escalation_cycles: 0,
            last_escalation_turn: None,
            analytics: None,
            log: Vec::new(),
        }
    }

    pub fn character(&self, side: Side) -> &Character {
        &self.participants[side.index()]
    }

    pub fn character_mut(&mut self, side: Side) -> &mut Character {
        &mut self.participants[side.index()]
    }

    /// Mutable access to `side` and its opponent at once.
    pub fn pair_mut(&mut self, side: Side) -> (&mut Character, &mut Character) {
        let [first, second] = &mut self.participants;
        match side {
            Side::First => (first, second),
            Side::Second => (second, first),
        }
    }

    pub fn attacker(&self) -> &Character {
        self.character(self.active)
    }

    pub fn defender(&self) -> &Character {
        self.character(self.active.opponent())
    }

    pub fn is_finished(&self) -> bool {
        self.status != BattleStatus::Ongoing
    }

    pub fn winner(&self) -> Option<Side> {
        match self.status {
            BattleStatus::Victory(side) => Some(side),
            _ => None,
        }
    }

    pub fn push_log(&mut self, entry: LogEntry) {
        self.log.push(entry);
    }

    /// Log entries appended at or after `start`.
    pub fn entries_since(&self, start: usize) -> &[LogEntry] {
        &self.log[start.min(self.log.len())..]
    }

    /// Folds unseen log entries into analytics, initializing them if needed.
    pub fn refresh_analytics(&mut self) -> &BattleAnalytics {
        let analytics = self.analytics.get_or_insert_with(BattleAnalytics::new);
        analytics.refresh(&self.log);
        analytics
    }

    pub fn total_damage(&self) -> u32 {
        self.analytics
            .as_ref()
            .map(|analytics| analytics.total_damage)
            .unwrap_or(0)
    }

    /// Knockout result, if either combatant is down.
    pub fn knockout(&self) -> Option<BattleStatus> {
        match (
            self.character(Side::First).is_defeated(),
            self.character(Side::Second).is_defeated(),
        ) {
            (true, true) => Some(BattleStatus::Draw(DrawReason::DoubleKnockout)),
            (true, false) => Some(BattleStatus::Victory(Side::Second)),
            (false, true) => Some(BattleStatus::Victory(Side::First)),
            (false, false) => None,
        }
    }

    /// Ends the battle.
    ///
    /// A battle that concludes without any damage dealt is a draw regardless
    /// of the nominal result.
    pub fn conclude(&mut self, status: BattleStatus) {
        if self.is_finished() {
            return;
        }

        self.refresh_analytics();
        let status = match status {
            BattleStatus::Victory(_) if self.total_damage() == 0 => {
                BattleStatus::Draw(DrawReason::NoDamage)
            }
            BattleStatus::Draw(DrawReason::TurnLimit) if self.total_damage() == 0 => {
                BattleStatus::Draw(DrawReason::NoDamage)
            }
            other => other,
        };

        let entry = match status {
            BattleStatus::Victory(side) => {
                let name = self.character(side).name.clone();
                LogEntry::by(self.turn, side, name.clone(), LogKind::Conclusion, "victory")
                    .with_target(side.opponent())
                    .with_outcome(Outcome::Victory)
                    .with_result(format!("{name} wins"))
            }
            BattleStatus::Draw(reason) => {
                let label: &'static str = reason.into();
                LogEntry::system(self.turn, LogKind::Conclusion, "draw")
                    .with_outcome(Outcome::Draw)
                    .with_result(format!("draw ({label})"))
            }
            BattleStatus::Ongoing => return,
        };

        tracing::info!(turn = self.turn, ?status, "battle concluded");
        self.status = status;
        self.push_log(entry);
        self.refresh_analytics();
    }

    /// Verifies the snapshot invariants against the snapshot it was derived from.
    pub fn check_invariants(&self, before: &BattleState) -> Result<(), InvariantViolation> {
        if self.turn < before.turn {
            return Err(InvariantViolation::TurnRegressed {
                before: before.turn,
                after: self.turn,
            });
        }

        for side in Side::BOTH {
            let now = self.character(side);
            let then = before.character(side);

            if now.health > BattleConfig::MAX_HEALTH {
                return Err(InvariantViolation::HealthOutOfBounds {
                    side,
                    health: now.health,
                    max: BattleConfig::MAX_HEALTH,
                });
            }
            if now.charge.progress > BattleConfig::FULL_CHARGE {
                return Err(InvariantViolation::ChargeOutOfBounds {
                    side,
                    progress: now.charge.progress,
                    max: BattleConfig::FULL_CHARGE,
                });
            }
            if now.mental.stability > 100 || now.mental.pride > 100 {
                return Err(InvariantViolation::MentalOutOfBounds {
                    side,
                    stability: now.mental.stability,
                    pride: now.mental.pride,
                });
            }
            if (then.thresholds.is_unhinged() && !now.thresholds.is_unhinged())
                || (then.thresholds.is_broken() && !now.thresholds.is_broken())
            {
                return Err(InvariantViolation::ThresholdCleared { side });
            }
        }

        Ok(())
    }

    /// SHA-256 digest of the bincode encoding of this snapshot.
    ///
    /// Two replays with the same seed and inputs produce identical digests.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}
