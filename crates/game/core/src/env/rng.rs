//! RNG oracle for deterministic random number generation.
//!
//! Every roll in a battle (crits, reposition attempts, charge interrupts) is
//! derived from the battle seed, the turn, the acting side and a roll context.
//! Replaying the same inputs therefore reproduces the same battle.

use crate::state::Side;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a percentage in `0..100`.
    ///
    /// A roll succeeds against a chance `c` when `roll < c`.
    fn roll_percent(&self, seed: u64) -> u32 {
        self.next_u32(seed) % 100
    }

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: each call derives its output from the seed alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Independent roll streams within a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    Crit = 0,
    Reposition = 1,
    ChargeInterrupt = 2,
}

/// Compute a deterministic seed for one roll.
///
/// Mixes the battle seed with the turn, the acting side and the roll context
/// so that distinct rolls in the same turn stay independent.
pub fn compute_seed(battle_seed: u64, turn: u32, side: Side, context: RollContext) -> u64 {
    let mut hash = battle_seed;

    hash ^= (turn as u64).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (side.index() as u64 + 1).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64 + 1).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
