//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and
//! provides the draws the engine needs: uniform probabilities for selection,
//! crossover and mutation decisions, and integer ranges for cut points and
//! random genotypes.
//!
//! ## Example
//!
//! ```rust
//! use bytega::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let cut_point: usize = rng.gen_range(1..8);
//!
//! assert!((1..8).contains(&cut_point));
//! assert!((0.0..1.0).contains(&rng.probability()));
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` that provides methods for generating
/// random numbers within a specified range.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a uniform value in `[0, 1)`.
    pub fn probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns `true` with probability `rate`.
    ///
    /// The draw must fall strictly below `rate`, so a rate of `0.0` never
    /// fires and a rate of `1.0` always does.
    pub fn chance(&mut self, rate: f64) -> bool {
        self.probability() < rate
    }

    /// Generates a random number in the given range.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.rng.gen_range(range)
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_range() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..1000 {
            assert!((0.0..1.0).contains(&rng.probability()));
        }
    }

    #[test]
    fn test_gen_range_is_inclusive_when_asked() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let draws: Vec<u8> = (0..2000).map(|_| rng.gen_range(0..=3)).collect();
        assert!(draws.iter().all(|&d| d <= 3));
        assert!(draws.contains(&3));
    }

    #[test]
    fn test_chance_bounds() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        for _ in 0..1000 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        // Both RNGs should generate the same sequence after cloning
        let nums1: Vec<f64> = (0..5).map(|_| rng1.probability()).collect();
        let nums2: Vec<f64> = (0..5).map(|_| rng2.probability()).collect();

        assert_eq!(nums1, nums2);
    }
}
