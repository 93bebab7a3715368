use bitflags::bitflags;

bitflags! {
    /// Ephemeral per-character combat markers.
    ///
    /// `USED_FINISHER` is set once per battle and never cleared by the pipeline.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CombatFlags: u8 {
        /// Next damaging hit against this character is amplified, then the flag is consumed.
        const EXPOSED           = 1 << 0;
        /// Outgoing damage is multiplied by the escalation factor.
        const FORCED_ESCALATION = 1 << 1;
        /// The character's finisher has been spent.
        const USED_FINISHER     = 1 << 2;
        /// The character already lost a turn to its current stun.
        const STUN_SPENT        = 1 << 3;
    }
}

bitflags! {
    /// Active mood tags, recomputed every turn from mental state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MoodTags: u8 {
        const CONFIDENT = 1 << 0;
        const RATTLED   = 1 << 1;
        const FURIOUS   = 1 << 2;
        const DESPERATE = 1 << 3;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    struct ThresholdBits: u8 {
        const UNHINGED = 1 << 0;
        const BROKEN   = 1 << 1;
    }
}

/// Irreversible mental thresholds.
///
/// Thresholds can only be marked; there is no way to clear one within a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Thresholds(ThresholdBits);

/// A single irreversible threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Threshold {
    Unhinged,
    Broken,
}

impl Threshold {
    const fn bits(self) -> ThresholdBits {
        match self {
            Self::Unhinged => ThresholdBits::UNHINGED,
            Self::Broken => ThresholdBits::BROKEN,
        }
    }
}

impl Thresholds {
    pub fn contains(&self, threshold: Threshold) -> bool {
        self.0.contains(threshold.bits())
    }

    /// Marks a threshold. Returns true if it was newly crossed.
    pub fn mark(&mut self, threshold: Threshold) -> bool {
        let newly = !self.contains(threshold);
        self.0.insert(threshold.bits());
        newly
    }

    pub fn is_unhinged(&self) -> bool {
        self.contains(Threshold::Unhinged)
    }

    pub fn is_broken(&self) -> bool {
        self.contains(Threshold::Broken)
    }
}
