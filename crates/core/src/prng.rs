//! Random sources for the point field.
//!
//! [`RandomSource`] is the seam through which every random decision flows
//! (initial placement, velocities, radii, colors and the per-draw sparkle
//! roll), so tests can substitute a scripted sequence. [`Xorshift64`] is the
//! default implementation: fast, seedable, and identical across platforms.

use serde::{Deserialize, Serialize};

/// A source of uniformly distributed values in [0, 1).
///
/// Only [`next_f64`](RandomSource::next_f64) is required; the derived
/// helpers map it onto the ranges the field needs.
pub trait RandomSource {
    /// Returns a uniformly distributed f64 in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Returns a uniformly distributed f64 in [min, max).
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns an integer uniformly distributed in [min, max] (inclusive).
    ///
    /// Computed as `min + floor(u * (max - min + 1))`, so a source that only
    /// ever yields values below 1 never exceeds `max`. The span is taken in
    /// f64 so the full `u32` range does not overflow.
    fn next_int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        let span = f64::from(max - min) + 1.0;
        let offset = (self.next_f64() * span).floor() as u32;
        min + offset.min(max - min)
    }

    /// Returns `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced with
/// a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for Xorshift64 {
    /// Upper 53 bits of `next_u64()` divided by 2^53.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
