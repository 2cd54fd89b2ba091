use std::cmp::Ordering;

use crate::individual::Individual;
use crate::population::Population;

/// A selection strategy that keeps the fittest individuals.
///
/// The population is copied and sorted by descending fitness with a stable
/// sort, so individuals with equal fitness keep their original order, and
/// the first `count` are returned unchanged. Asking for more individuals than
/// exist returns the whole population.
///
/// # Examples
///
/// ```
/// use bytega::encoding::Genotype;
/// use bytega::individual::Individual;
/// use bytega::population::Population;
/// use bytega::selection::ElitistSelection;
///
/// let population = Population::normalized(vec![
///     Individual::with_score(Genotype::from_bits(1), 0.5),
///     Individual::with_score(Genotype::from_bits(2), 0.8),
///     Individual::with_score(Genotype::from_bits(3), 0.3),
/// ]);
///
/// let elites = ElitistSelection::new().select(&population, 2);
/// assert_eq!(elites.len(), 2);
/// assert_eq!(elites[0].x(), 2);
/// assert_eq!(elites[1].x(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ElitistSelection;

impl ElitistSelection {
    pub fn new() -> Self {
        Self
    }

    pub fn select(&self, population: &Population, count: usize) -> Vec<Individual> {
        if count == 0 {
            return Vec::new();
        }

        let mut sorted = population.individuals().to_vec();
        sorted.sort_by(|a, b| {
            b.fitness().partial_cmp(&a.fitness()).unwrap_or_else(|| {
                // NaN sorts after every number
                if b.fitness().is_nan() {
                    Ordering::Less
                } else if a.fitness().is_nan() {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
        });
        sorted.truncate(count);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Genotype;

    fn population(scores: &[f64]) -> Population {
        Population::normalized(
            scores
                .iter()
                .enumerate()
                .map(|(i, &score)| Individual::with_score(Genotype::from_bits(i as u8), score))
                .collect(),
        )
    }

    #[test]
    fn test_selects_fittest_in_descending_order() {
        let population = population(&[0.5, 0.8, 0.3, 0.9, 0.1]);
        let elites = ElitistSelection::new().select(&population, 3);
        let xs: Vec<u8> = elites.iter().map(Individual::x).collect();
        assert_eq!(xs, vec![3, 1, 0]);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let population = population(&[2.0, 5.0, 5.0, 1.0]);
        let elites = ElitistSelection::new().select(&population, 2);
        assert_eq!(elites[0].x(), 1);
        assert_eq!(elites[1].x(), 2);
    }

    #[test]
    fn test_count_is_clamped() {
        let population = population(&[1.0, 2.0]);
        assert_eq!(ElitistSelection::new().select(&population, 10).len(), 2);
        assert!(ElitistSelection::new().select(&population, 0).is_empty());
    }

    #[test]
    fn test_elites_are_unchanged_copies() {
        let population = population(&[1.0, 3.0]);
        let elites = ElitistSelection::new().select(&population, 1);
        assert_eq!(elites[0], population[1]);
    }
}
