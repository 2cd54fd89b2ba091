//! # Fitness
//!
//! Raw fitness is the expression's value at a phenotype. Roulette selection
//! needs strictly positive weights, so the engine scores individuals with the
//! shifted fitness `raw - min + 1`, where `min` is the lowest raw value over
//! the whole domain `[0, 255]`. Every shifted score is therefore at least `1`.
//!
//! ```rust
//! use bytega::expression::Expression;
//! use bytega::fitness::FitnessFunction;
//!
//! let fitness = FitnessFunction::new(Expression::compile("x"));
//! assert_eq!(fitness.raw(100), 100.0);
//! assert_eq!(fitness.score(100), 101.0);
//! ```

use crate::caching::DomainCache;
use crate::encoding::DOMAIN_MAX;
use crate::expression::Expression;

/// Extremes of the raw fitness over the integer domain.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainBounds {
    pub min: f64,
    pub max: f64,
}

/// Evaluates `expression` at every integer in `[0, 255]` and returns the extremes.
///
/// Failed evaluations count as `0.0`, so an unparsable expression yields
/// `min == max == 0.0` rather than an error.
pub fn find_min_max(expression: &Expression) -> DomainBounds {
    let (min, max) = (0..=DOMAIN_MAX)
        .map(|x| expression.evaluate(f64::from(x)))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });
    tracing::debug!(expression = %expression, min, max, "computed domain bounds");
    DomainBounds { min, max }
}

/// A compiled expression together with the shift that makes its values positive.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessFunction {
    expression: Expression,
    bounds: DomainBounds,
}

impl FitnessFunction {
    /// Scans the domain of `expression` to establish its shift.
    pub fn new(expression: Expression) -> Self {
        let bounds = find_min_max(&expression);
        Self { expression, bounds }
    }

    /// Like [`FitnessFunction::new`], but takes the bounds from `cache`
    /// when it already holds them for this expression.
    pub fn with_cache(expression: Expression, cache: &mut DomainCache) -> Self {
        let bounds = cache.bounds(&expression);
        Self { expression, bounds }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn bounds(&self) -> DomainBounds {
        self.bounds
    }

    /// The expression's value at `x`.
    pub fn raw(&self, x: u8) -> f64 {
        self.expression.evaluate(f64::from(x))
    }

    /// The shifted fitness at `x`; never below `1.0`.
    pub fn score(&self, x: u8) -> f64 {
        shift(self.raw(x), self.bounds)
    }
}

impl Default for FitnessFunction {
    fn default() -> Self {
        Self::new(Expression::default())
    }
}

/// Shifts `raw` so the domain minimum scores `1.0`. Saturates at `f64::MAX`
/// when the landscape spans more than the finite range.
fn shift(raw: f64, bounds: DomainBounds) -> f64 {
    (raw - bounds.min + 1.0).min(f64::MAX)
}

/// The expression's value at `x`, or `0.0` when it cannot be evaluated.
pub fn raw_fitness(x: f64, expression: &str) -> f64 {
    crate::expression::evaluate(expression, x)
}

/// The shifted fitness of `x` under `expression`, using `cache` for the
/// domain minimum.
///
/// One-shot helper: the expression is recompiled on every call. Build a
/// [`FitnessFunction`] to score many values.
pub fn fitness(x: f64, expression: &str, cache: &mut DomainCache) -> f64 {
    let compiled = Expression::compile_once(expression);
    let bounds = cache.bounds(&compiled);
    shift(compiled.evaluate(x), bounds)
}
