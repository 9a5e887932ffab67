//! Random number sources
//!
//! Spawning draws all of its randomness through [`RandomSource`]. Every
//! `rand` generator implements it, so callers inject whichever generator they
//! like; [`SeededRng`] is the default and gives reproducible runs.

use rand::{Rng, SeedableRng};

/// Deterministic generator used by default
pub type SeededRng = rand_chacha::ChaCha8Rng;

/// Source of uniform random numbers
pub trait RandomSource {
    /// Uniform float in `[lo, hi)`; returns `lo` when the range is empty
    fn uniform_float(&mut self, lo: f32, hi: f32) -> f32;

    /// Uniform integer in `[lo, hi_exclusive)`; returns `lo` when the range is empty
    fn uniform_int(&mut self, lo: usize, hi_exclusive: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_float(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.gen_range(lo..hi)
        } else {
            lo
        }
    }

    fn uniform_int(&mut self, lo: usize, hi_exclusive: usize) -> usize {
        if hi_exclusive > lo {
            self.gen_range(lo..hi_exclusive)
        } else {
            lo
        }
    }
}

/// Create a generator with a fixed seed
pub fn seeded_rng(seed: u64) -> SeededRng {
    SeededRng::seed_from_u64(seed)
}

/// Create a generator seeded from the thread-local entropy source
pub fn entropy_rng() -> SeededRng {
    SeededRng::seed_from_u64(rand::random())
}
