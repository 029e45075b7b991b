//! Seeded dice for the resolver.
//!
//! Hit rolls, damage variance and flee checks draw from an [`RngOracle`]
//! handed to the engine through [`CombatEnv`](super::CombatEnv). There is no
//! ambient generator: given the same seed an oracle must return the same
//! value, so a whole encounter can be replayed from its seed.

/// Source of seeded randomness. Same seed in, same value out.
pub trait RngOracle: Send + Sync {
    /// Raw 32-bit output for `seed`.
    fn next_u32(&self, seed: u64) -> u32;

    /// A percentile roll in `1..=100`.
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// A value in `min..=max`. Collapses to `min` when the range is empty.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % range) as u32
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: each call steps once from the supplied seed, so the caller
/// controls the stream through [`compute_seed`].
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

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Oracle that ignores the seed and always yields the same raw value.
///
/// `FixedRng(0)` rolls a natural 1 on every d100, so every attack hits and
/// every flee succeeds; `FixedRng(99)` rolls 100 and fails everything short
/// of a guaranteed check. Useful for scripted scenarios and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Identifies independent rolls made while resolving a single action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollContext {
    Hit = 0,
    Variance = 1,
    Flee = 2,
}

/// Compute a deterministic seed from encounter state components.
///
/// * `encounter_seed` - Base seed fixed at initiate
/// * `nonce` - Number of actions resolved so far
/// * `actor_slot` - Index of the acting participant
/// * `context` - Which roll within the action
pub fn compute_seed(encounter_seed: u64, nonce: u64, actor_slot: u32, context: RollContext) -> u64 {
    let mut hash = encounter_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_slot as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step (SplitMix64 finalizer)
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
