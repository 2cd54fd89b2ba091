//! # Population
//!
//! A population is an ordered, normalized collection of [`Individual`]s. The
//! only way to build one is [`Population::normalized`] (or the free function
//! [`normalize`]), so every population carries normalized fitness values that
//! sum to one and can be used directly as roulette-wheel weights.
//!
//! ```rust
//! use bytega::encoding::Genotype;
//! use bytega::individual::Individual;
//! use bytega::population::Population;
//!
//! let population = Population::normalized(vec![
//!     Individual::with_score(Genotype::from_bits(1), 1.0),
//!     Individual::with_score(Genotype::from_bits(2), 3.0),
//! ]);
//!
//! assert_eq!(population[0].normalized_fitness(), 0.25);
//! assert_eq!(population.best().unwrap().x(), 2);
//! assert_eq!(population.average_fitness(), 2.0);
//! ```

use std::ops::Index;

use crate::error::{GeneticError, OptionExt, Result};
use crate::individual::Individual;

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

/// Summary statistics of a population's fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub best: Individual,
    pub worst: Individual,
    pub average: f64,
    /// Population variance of the fitness values.
    pub variance: f64,
}

impl Population {
    /// Assigns each individual its share of the total fitness.
    ///
    /// When there is no signal to discriminate on, either because the total is
    /// not positive or because every individual has exactly the same fitness,
    /// each individual gets `1 / len` instead. A total that overflows is
    /// recomputed on fitness scaled by the largest value; if that is not
    /// possible either, the shares are uniform as well.
    pub fn normalized(individuals: Vec<Individual>) -> Self {
        let len = individuals.len();
        let total: f64 = individuals.iter().map(Individual::fitness).sum();
        let uniform = individuals
            .first()
            .map_or(true, |first| individuals.iter().all(|i| i.fitness() == first.fitness()));

        let divisor = if total.is_finite() {
            Some(1.0)
        } else {
            let largest = individuals
                .iter()
                .map(Individual::fitness)
                .fold(f64::NEG_INFINITY, f64::max);
            (total == f64::INFINITY && largest.is_finite()).then_some(largest)
        };

        let individuals = match divisor {
            Some(divisor) if total > 0.0 && !uniform => {
                let total: f64 = individuals.iter().map(|i| i.fitness() / divisor).sum();
                individuals
                    .into_iter()
                    .map(|i| {
                        let share = i.fitness() / divisor / total;
                        i.with_normalized_fitness(share)
                    })
                    .collect()
            }
            _ => {
                let share = 1.0 / len as f64;
                individuals
                    .into_iter()
                    .map(|i| i.with_normalized_fitness(share))
                    .collect()
            }
        };

        Self { individuals }
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    /// The individual with the highest fitness; the first one wins ties.
    pub fn best(&self) -> Result<&Individual> {
        best(&self.individuals)
    }

    /// The individual with the lowest fitness; the first one wins ties.
    pub fn worst(&self) -> Result<&Individual> {
        worst(&self.individuals)
    }

    /// Mean fitness, or `0.0` for an empty population.
    pub fn average_fitness(&self) -> f64 {
        average_fitness(&self.individuals)
    }

    /// Best, worst, mean and variance of the fitness values.
    pub fn stats(&self) -> Result<PopulationStats> {
        let best = *self.best()?;
        let worst = *self.worst()?;
        let average = self.average_fitness();
        let variance = self
            .iter()
            .map(|i| (i.fitness() - average).powi(2))
            .sum::<f64>()
            / self.len() as f64;

        Ok(PopulationStats {
            best,
            worst,
            average,
            variance,
        })
    }
}

impl Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

/// Normalizes `individuals` into a [`Population`].
pub fn normalize(individuals: Vec<Individual>) -> Population {
    Population::normalized(individuals)
}

/// The individual with the highest fitness; the first one wins ties.
pub fn best(individuals: &[Individual]) -> Result<&Individual> {
    individuals
        .iter()
        .reduce(|best, i| if i.fitness() > best.fitness() { i } else { best })
        .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
}

/// The individual with the lowest fitness; the first one wins ties.
pub fn worst(individuals: &[Individual]) -> Result<&Individual> {
    individuals
        .iter()
        .reduce(|worst, i| if i.fitness() < worst.fitness() { i } else { worst })
        .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
}

/// Mean fitness, or `0.0` when there are no individuals.
pub fn average_fitness(individuals: &[Individual]) -> f64 {
    if individuals.is_empty() {
        return 0.0;
    }
    individuals.iter().map(Individual::fitness).sum::<f64>() / individuals.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Genotype;

    fn individuals(scores: &[f64]) -> Vec<Individual> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| Individual::with_score(Genotype::from_bits(i as u8), score))
            .collect()
    }

    #[test]
    fn test_normalized_shares() {
        let population = Population::normalized(individuals(&[1.0, 2.0, 3.0, 4.0]));
        let shares: Vec<f64> = population.iter().map(Individual::normalized_fitness).collect();
        assert_eq!(shares, vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_uniform_fitness_falls_back_to_equal_shares() {
        let population = Population::normalized(individuals(&[5.0, 5.0, 5.0, 5.0]));
        assert!(population.iter().all(|i| i.normalized_fitness() == 0.25));
    }

    #[test]
    fn test_non_positive_total_falls_back_to_equal_shares() {
        let population = Population::normalized(individuals(&[-3.0, 1.0, 2.0]));
        for individual in &population {
            assert_eq!(individual.normalized_fitness(), 1.0 / 3.0);
        }
    }

    #[test]
    fn test_overflowing_total_keeps_proportions() {
        let population = Population::normalized(individuals(&[f64::MAX, f64::MAX / 2.0, f64::MAX / 2.0]));
        let shares: Vec<f64> = population.iter().map(Individual::normalized_fitness).collect();
        assert_eq!(shares, vec![0.5, 0.25, 0.25]);
    }

    #[test]
    fn test_infinite_fitness_falls_back_to_equal_shares() {
        let population = Population::normalized(individuals(&[f64::INFINITY, 1.0]));
        assert!(population.iter().all(|i| i.normalized_fitness() == 0.5));
    }

    #[test]
    fn test_single_individual_gets_everything() {
        let population = Population::normalized(individuals(&[42.0]));
        assert_eq!(population[0].normalized_fitness(), 1.0);
    }

    #[test]
    fn test_empty_population() {
        let population = Population::normalized(Vec::new());
        assert!(population.is_empty());
        assert_eq!(population.average_fitness(), 0.0);
        assert_eq!(population.best(), Err(GeneticError::EmptyPopulation));
        assert_eq!(population.worst(), Err(GeneticError::EmptyPopulation));
        assert!(population.stats().is_err());
    }

    #[test]
    fn test_best_and_worst_prefer_first_on_ties() {
        let population = Population::normalized(individuals(&[2.0, 7.0, 1.0, 7.0, 1.0]));
        assert_eq!(population.best().unwrap().x(), 1);
        assert_eq!(population.worst().unwrap().x(), 2);
    }

    #[test]
    fn test_stats() {
        let population = Population::normalized(individuals(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]));
        let stats = population.stats().unwrap();
        assert_eq!(stats.best.fitness(), 9.0);
        assert_eq!(stats.worst.fitness(), 2.0);
        assert_eq!(stats.average, 5.0);
        assert_eq!(stats.variance, 4.0);
    }
}
