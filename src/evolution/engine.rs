//! The generation step: elitism, roulette selection, crossover and mutation.

use super::options::GaParameters;
use crate::{
    breeding::{crossover, mutate},
    encoding::random_genotype,
    error::Result,
    fitness::FitnessFunction,
    individual::Individual,
    population::Population,
    rng::RandomNumberGenerator,
    selection::{ElitistSelection, RouletteWheelSelection},
};

/// Creates `size` random individuals and normalizes them into a population.
pub fn initialize(
    size: usize,
    fitness: &FitnessFunction,
    rng: &mut RandomNumberGenerator,
) -> Population {
    let individuals = (0..size)
        .map(|_| Individual::new(random_genotype(rng), fitness))
        .collect();
    Population::normalized(individuals)
}

/// Produces the next generation from `population`.
///
/// The top `min(elitism, population_size)` individuals are copied over
/// unchanged. The rest of the new population is filled two children at a
/// time: two parents are drawn by roulette selection (with replacement),
/// crossed over, and each child genotype is mutated and scored. When only one
/// slot is left, the second child is dropped. The result is normalized and
/// always holds exactly `population_size` individuals.
///
/// # Errors
///
/// Returns [`GeneticError::EmptyPopulation`](crate::error::GeneticError::EmptyPopulation)
/// if offspring are needed but `population` is empty.
pub fn advance_generation(
    population: &Population,
    params: &GaParameters,
    fitness: &FitnessFunction,
    rng: &mut RandomNumberGenerator,
) -> Result<Population> {
    let target = params.population_size();
    let mut next = Vec::with_capacity(target);

    next.extend(ElitistSelection::new().select(population, params.effective_elitism()));

    let roulette = RouletteWheelSelection::new();
    while next.len() < target {
        let parent_a = roulette.select(population, rng)?;
        let parent_b = roulette.select(population, rng)?;

        let (child_a, child_b) = crossover(parent_a, parent_b, params.crossover_rate(), rng);
        let child_a = mutate(child_a, params.mutation_rate(), rng);
        let child_b = mutate(child_b, params.mutation_rate(), rng);

        next.push(Individual::new(child_a, fitness));
        if next.len() < target {
            next.push(Individual::new(child_b, fitness));
        }
    }

    Ok(Population::normalized(next))
}
