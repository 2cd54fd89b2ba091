//! # GaParameters
//!
//! The `GaParameters` struct holds the configuration of a run: population
//! size, crossover and mutation probabilities, number of generations, the
//! fitness expression, how many elites survive each generation, and how
//! chatty the run should be in its logs.
//!
//! ## Example
//!
//! ```rust
//! use bytega::evolution::options::{GaParameters, LogLevel};
//!
//! // Create a new GaParameters instance with custom parameters
//! let custom = GaParameters::new(30, 0.7, 0.01, 200, "x*(255-x)", 2);
//! assert!(custom.validate().is_ok());
//!
//! // Or through the builder
//! let built = GaParameters::builder()
//!     .population_size(50)
//!     .mutation_rate(0.05)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//! assert_eq!(built.population_size(), 50);
//!
//! // The defaults maximize (2*x/256)^2 - 5*x + 130
//! let defaults = GaParameters::default();
//! assert_eq!(defaults.population_size(), 18);
//! ```
//!
//! ## Validation
//!
//! [`GaParameters::validate`] rejects a zero population size, a zero
//! generation count, and probabilities outside `[0, 1]`. An elitism count
//! larger than the population is not an error: it is clamped by
//! [`GaParameters::effective_elitism`]. The expression is not validated
//! here; an expression that fails to parse simply scores every individual
//! the same.

use crate::error::{GeneticError, Result};
use crate::expression::DEFAULT_EXPRESSION;

const DEFAULT_POPULATION_SIZE: usize = 18;
const DEFAULT_CROSSOVER_RATE: f64 = 0.64;
const DEFAULT_MUTATION_RATE: f64 = 0.025;
const DEFAULT_MAX_GENERATIONS: usize = 100;

/// How much a run reports through `tracing` after each generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Population statistics at `debug` level every generation.
    Verbose,
    /// Best and average fitness at `info` level every generation.
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct GaParameters {
    population_size: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    max_generations: usize,
    function_expression: String,
    elitism: usize,
    log_level: LogLevel,
}

impl GaParameters {
    pub fn new(
        population_size: usize,
        crossover_rate: f64,
        mutation_rate: f64,
        max_generations: usize,
        function_expression: impl Into<String>,
        elitism: usize,
    ) -> Self {
        Self {
            population_size,
            crossover_rate,
            mutation_rate,
            max_generations,
            function_expression: function_expression.into(),
            elitism,
            log_level: LogLevel::None,
        }
    }

    /// Checks the parameters before a run starts.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] if the population size or the
    /// generation count is zero, or if a probability is outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.max_generations == 0 {
            return Err(GeneticError::Configuration(
                "Maximum number of generations cannot be zero".to_string(),
            ));
        }

        for (name, rate) in [
            ("Crossover rate", self.crossover_rate),
            ("Mutation rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(GeneticError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }

        Ok(())
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn function_expression(&self) -> &str {
        &self.function_expression
    }

    /// The elitism count as configured, possibly larger than the population.
    pub fn elitism(&self) -> usize {
        self.elitism
    }

    /// The number of elites actually carried over: `min(elitism, population_size)`.
    pub fn effective_elitism(&self) -> usize {
        self.elitism.min(self.population_size)
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the crossover probability.
    pub fn set_crossover_rate(&mut self, crossover_rate: f64) {
        self.crossover_rate = crossover_rate;
    }

    /// Sets the per-bit mutation probability.
    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    /// Sets the number of generations.
    pub fn set_max_generations(&mut self, max_generations: usize) {
        self.max_generations = max_generations;
    }

    /// Sets the fitness expression.
    pub fn set_function_expression(&mut self, function_expression: impl Into<String>) {
        self.function_expression = function_expression.into();
    }

    /// Sets the elitism count.
    pub fn set_elitism(&mut self, elitism: usize) {
        self.elitism = elitism;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Returns a builder for creating a `GaParameters` instance.
    ///
    /// Any value left unset takes its default.
    pub fn builder() -> GaParametersBuilder {
        GaParametersBuilder::default()
    }
}

impl Default for GaParameters {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            max_generations: DEFAULT_MAX_GENERATIONS,
            function_expression: DEFAULT_EXPRESSION.to_string(),
            elitism: 0,
            log_level: LogLevel::None,
        }
    }
}

/// Builder for `GaParameters`.
///
/// Provides a fluent interface for constructing `GaParameters` instances.
#[derive(Debug, Clone, Default)]
pub struct GaParametersBuilder {
    population_size: Option<usize>,
    crossover_rate: Option<f64>,
    mutation_rate: Option<f64>,
    max_generations: Option<usize>,
    function_expression: Option<String>,
    elitism: Option<usize>,
    log_level: Option<LogLevel>,
}

impl GaParametersBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    pub fn function_expression(mut self, value: impl Into<String>) -> Self {
        self.function_expression = Some(value.into());
        self
    }

    pub fn elitism(mut self, value: usize) -> Self {
        self.elitism = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Builds the `GaParameters` instance without validating it.
    pub fn build(self) -> GaParameters {
        let defaults = GaParameters::default();
        GaParameters {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            crossover_rate: self.crossover_rate.unwrap_or(defaults.crossover_rate),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            max_generations: self.max_generations.unwrap_or(defaults.max_generations),
            function_expression: self
                .function_expression
                .unwrap_or(defaults.function_expression),
            elitism: self.elitism.unwrap_or(defaults.elitism),
            log_level: self.log_level.unwrap_or(defaults.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = GaParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.crossover_rate(), 0.64);
        assert_eq!(params.mutation_rate(), 0.025);
        assert_eq!(params.max_generations(), 100);
        assert_eq!(params.function_expression(), DEFAULT_EXPRESSION);
        assert_eq!(params.elitism(), 0);
    }

    #[test]
    fn test_builder_overrides_only_what_is_set() {
        let params = GaParameters::builder().elitism(3).build();
        assert_eq!(params.elitism(), 3);
        assert_eq!(params.population_size(), 18);
    }

    #[test]
    fn test_zero_population_is_rejected() {
        let params = GaParameters::builder().population_size(0).build();
        match params.validate() {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"))
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_generations_is_rejected() {
        let params = GaParameters::builder().max_generations(0).build();
        assert!(matches!(params.validate(), Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_probabilities_out_of_range_are_rejected() {
        for rate in [-0.1, 1.5, f64::NAN] {
            let crossover = GaParameters::builder().crossover_rate(rate).build();
            assert!(crossover.validate().is_err(), "crossover {}", rate);
            let mutation = GaParameters::builder().mutation_rate(rate).build();
            assert!(mutation.validate().is_err(), "mutation {}", rate);
        }
        let edges = GaParameters::builder().crossover_rate(0.0).mutation_rate(1.0).build();
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn test_elitism_is_clamped_not_rejected() {
        let params = GaParameters::builder().population_size(4).elitism(10).build();
        assert!(params.validate().is_ok());
        assert_eq!(params.effective_elitism(), 4);
    }

    #[test]
    fn test_setters() {
        let mut params = GaParameters::default();
        params.set_function_expression("x");
        params.set_log_level(LogLevel::Verbose);
        params.set_population_size(7);
        assert_eq!(params.function_expression(), "x");
        assert_eq!(params.log_level(), LogLevel::Verbose);
        assert_eq!(params.population_size(), 7);
    }
}
