//! Sources of randomness for maze generation

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Random choices made while carving a maze
pub trait RandomSource {
    /// Uniform integer in `[0, n)`, `n > 0`
    fn uniform_int(&mut self, n: usize) -> usize;

    /// Permute `items` in place, every order equally likely
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// [RandomSource] backed by a [rand] generator
pub struct RngSource<R> {
    random: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }
}

impl RngSource<StdRng> {
    /// Standard generator from a seed, or from system entropy without one
    pub fn seeded(seed: Option<u64>) -> Self {
        Self::new(if let Some(state) = seed {
            StdRng::seed_from_u64(state)
        } else {
            StdRng::from_entropy()
        })
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform_int(&mut self, n: usize) -> usize {
        self.random.gen_range(0..n)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        // Fisher-Yates
        items.shuffle(&mut self.random);
    }
}

/// Deterministic source: always the first choice, never reorders
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedSource;

impl RandomSource for FixedSource {
    fn uniform_int(&mut self, _n: usize) -> usize {
        0
    }

    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}
