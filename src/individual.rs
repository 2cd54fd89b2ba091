use crate::encoding::{decode, Genotype};
use crate::fitness::FitnessFunction;

/// A scored candidate solution.
///
/// Individuals are plain values: the genotype, the phenotype `x` it decodes
/// to, its shifted fitness and its share of the population's total fitness.
/// They are never changed after creation; normalization produces new values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Individual {
    genotype: Genotype,
    x: u8,
    fitness: f64,
    normalized_fitness: f64,
}

impl Individual {
    /// Decodes and scores `genotype`. The normalized fitness starts at zero
    /// until the individual is placed in a [`Population`](crate::population::Population).
    pub fn new(genotype: Genotype, fitness: &FitnessFunction) -> Self {
        let x = decode(genotype);
        Self {
            genotype,
            x,
            fitness: fitness.score(x),
            normalized_fitness: 0.0,
        }
    }

    pub fn genotype(&self) -> Genotype {
        self.genotype
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn normalized_fitness(&self) -> f64 {
        self.normalized_fitness
    }

    pub(crate) fn with_normalized_fitness(self, normalized_fitness: f64) -> Self {
        Self {
            normalized_fitness,
            ..self
        }
    }

    /// Builds an individual around a fitness computed elsewhere.
    pub fn with_score(genotype: Genotype, fitness: f64) -> Self {
        Self {
            genotype,
            x: decode(genotype),
            fitness,
            normalized_fitness: 0.0,
        }
    }
}
