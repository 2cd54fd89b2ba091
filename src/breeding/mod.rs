//! # Breeding
//!
//! Genetic operators on 8-bit genotypes: single-point [`crossover`] of two
//! parents and independent bit-flip [`mutate`].
pub mod crossover;
pub mod mutation;

pub use crossover::{crossover, crossover_at};
pub use mutation::mutate;
