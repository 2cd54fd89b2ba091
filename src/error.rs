//! # Error Types
//!
//! This module defines the error type for the genetic algorithm engine.
//!
//! Only configuration problems and API misuse surface as errors. A fitness
//! expression that fails to evaluate never does: it degrades to a value of
//! zero at the offending point instead (see [`crate::expression`]).
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use bytega::error::{GeneticError, Result};
//!
//! fn check_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(GeneticError::Configuration(
//!             "Population size cannot be zero".to_string(),
//!         ));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(check_size(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use bytega::error::{GeneticError, OptionExt};
//!
//! fn fittest(scores: &[u32]) -> bytega::error::Result<u32> {
//!     scores.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//!
//! assert_eq!(fittest(&[3, 7, 5]).unwrap(), 7);
//! ```

use thiserror::Error;

/// Represents errors that can occur in the genetic algorithm engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness expression cannot be parsed.
    ///
    /// Only the strict [`Expression::parse`](crate::expression::Expression::parse)
    /// entry point reports this; evaluation itself never fails.
    #[error("Expression error at position {position}: {message}")]
    Expression { position: usize, message: String },

    /// Error that occurs when a bit-string is not a valid 8-bit genotype.
    #[error("Invalid genotype: {0}")]
    InvalidGenotype(String),

    /// Error that occurs when a run is stepped before a population exists.
    #[error("Evolution error: population has not been initialized")]
    NotInitialized,
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
