//! Deterministic randomness for the mixing strategies.
//!
//! Strategies never touch a global generator. They draw from a [`MoshRng`],
//! which only has to produce uniform floats in [0, 1). The engine uses PCG32
//! seeded from the caller's seed, with a BLAKE3-derived stream per strategy so
//! the same seed gives unrelated streams to different strategies.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use wavmosh_spec::Strategy;

/// Source of uniform floats in [0, 1).
pub trait MoshRng {
    /// Next float in [0, 1).
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_unit() * n as f64) as usize).min(n - 1)
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}

impl MoshRng for Pcg32 {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl<R: MoshRng + ?Sized> MoshRng for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives the seed a strategy draws from.
///
/// BLAKE3 over the little-endian base seed followed by the strategy name,
/// truncated to the first four bytes.
pub fn derive_strategy_seed(base_seed: u32, strategy: Strategy) -> u32 {
    let name = strategy.as_str();
    let mut input = Vec::with_capacity(4 + name.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(name.as_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Creates the RNG for one strategy run.
pub fn create_strategy_rng(base_seed: u32, strategy: Strategy) -> Pcg32 {
    create_rng(derive_strategy_seed(base_seed, strategy))
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Drives strategies through exact decisions in tests.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRng {
    values: Vec<f64>,
    index: usize,
}

#[cfg(test)]
impl ScriptedRng {
    /// Creates a scripted source. An empty script always yields 0.0.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }

    /// Always yields the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
impl MoshRng for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        let value = if self.values.is_empty() {
            0.0
        } else {
            self.values[self.index % self.values.len()]
        };
        self.index += 1;
        value
    }
}
