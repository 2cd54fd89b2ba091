use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// A selection strategy that picks individuals through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection)
/// picks an individual with probability equal to its normalized fitness.
/// Draws are independent, so the same individual can be picked any number
/// of times.
///
/// # Examples
///
/// ```
/// use bytega::encoding::Genotype;
/// use bytega::individual::Individual;
/// use bytega::population::Population;
/// use bytega::rng::RandomNumberGenerator;
/// use bytega::selection::RouletteWheelSelection;
///
/// let population = Population::normalized(vec![
///     Individual::with_score(Genotype::from_bits(1), 1.0),
///     Individual::with_score(Genotype::from_bits(2), 3.0),
/// ]);
///
/// let selection = RouletteWheelSelection::new();
/// // The first quarter of the wheel belongs to the first individual.
/// assert_eq!(selection.spin(&population, 0.2).unwrap().x(), 1);
/// assert_eq!(selection.spin(&population, 0.3).unwrap().x(), 2);
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// assert!(selection.select(&population, &mut rng).is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }

    /// Spins the wheel with a fresh uniform draw in `[0, 1)`.
    pub fn select<'a>(
        &self,
        population: &'a Population,
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a Individual> {
        let r = rng.probability();
        let selected = self.spin(population, r)?;
        tracing::trace!(r, x = selected.x(), "roulette selection");
        Ok(selected)
    }

    /// Returns the first individual whose cumulative normalized fitness
    /// reaches `r`.
    ///
    /// If rounding leaves the cumulative sum just short of `r`, the last
    /// individual is returned, so selection on a non-empty population never
    /// fails.
    pub fn spin<'a>(&self, population: &'a Population, r: f64) -> Result<&'a Individual> {
        let individuals = population.individuals();
        let last = individuals.last().ok_or(GeneticError::EmptyPopulation)?;

        match Self::position(individuals, r) {
            Some(idx) => Ok(&individuals[idx]),
            None => {
                tracing::debug!(r, "cumulative fitness fell short of the draw, taking the last individual");
                Ok(last)
            }
        }
    }

    fn position(individuals: &[Individual], r: f64) -> Option<usize> {
        let mut cumulative = 0.0;
        for (i, individual) in individuals.iter().enumerate() {
            cumulative += individual.normalized_fitness();
            if r <= cumulative {
                return Some(i);
            }
        }
        None
    }
}

/// Picks one parent from `population` by roulette wheel selection.
pub fn select_parent<'a>(
    population: &'a Population,
    rng: &mut RandomNumberGenerator,
) -> Result<&'a Individual> {
    RouletteWheelSelection::new().select(population, rng)
}
