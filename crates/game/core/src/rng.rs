//! Random number sources for combat resolution.
//!
//! Every roll in the rules (dice, critical checks, fear checks, AI choices,
//! damage jitter) goes through [`RngSource`]. Given the same seed a
//! [`PcgRng`] produces the same sequence, so a combat can be replayed from its
//! seed and the list of player inputs.

use std::collections::VecDeque;

/// Source of uniformly distributed random numbers.
///
/// The trait is object safe so participants and resolvers can take
/// `&mut dyn RngSource`.
pub trait RngSource {
    /// Generate the next raw u32 value.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with N sides (1-N inclusive). A zero-sided die rolls 0.
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32() % sides) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32()) % span) as u32
    }

    /// Roll in [0, 100).
    fn roll_percent(&mut self) -> u32 {
        self.next_u32() % 100
    }

    /// Returns true with `percent` probability.
    fn chance(&mut self, percent: u32) -> bool {
        self.roll_percent() < percent
    }

    /// Pick an index in `0..len`. Returns `None` for an empty collection.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_u32() as usize % len)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.state = Self::pcg_step(seed.wrapping_add(Self::INCREMENT));
        rng
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Replays a fixed sequence of raw draws, then repeats the last one.
///
/// Used by tests and by tools that need to force a specific outcome.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
    last: u32,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: 0,
        }
    }

    /// A source that always yields `value`.
    pub fn constant(value: u32) -> Self {
        Self {
            values: VecDeque::new(),
            last: value,
        }
    }
}

impl RngSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if let Some(value) = self.values.pop_front() {
            self.last = value;
        }
        self.last
    }
}

/// Compute a deterministic seed from combat components.
///
/// * `base_seed` - Seed configured for the session
/// * `combat_index` - Number of combats started so far
/// * `round` - Round the seed is drawn for (0 at combat start)
/// * `context` - Extra discriminator for independent streams
pub fn compute_seed(base_seed: u64, combat_index: u64, round: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = base_seed;
    hash ^= combat_index.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (round as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
