use super::{
    builder::EvolutionLauncherBuilder,
    engine,
    options::{GaParameters, LogLevel},
};
use crate::{
    caching::DomainCache,
    error::{GeneticError, OptionExt, Result},
    expression::Expression,
    fitness::FitnessFunction,
    individual::Individual,
    population::Population,
    rng::RandomNumberGenerator,
};

/// Whether a run currently has a population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
}

/// The outcome of initializing or advancing a run by one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// Generation number; the initial population is generation `0`.
    pub generation: usize,
    pub population: Population,
    /// The fittest individual of this generation.
    pub best: Individual,
    pub avg_fitness: f64,
    pub max_fitness: f64,
}

/// One point of a run's fitness history.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    pub generation: usize,
    pub max_fitness: f64,
    pub avg_fitness: f64,
}

/// Drives a single run of the genetic algorithm.
///
/// The launcher owns everything a run needs: the parameters, the compiled
/// fitness function, the domain cache it was compiled with, the random number
/// generator, the current population and the per-generation history. Separate
/// launchers share nothing, so runs with different expressions never disturb
/// each other.
///
/// # Example
///
/// ```rust
/// use bytega::evolution::{EvolutionLauncher, GaParameters};
///
/// let params = GaParameters::builder()
///     .function_expression("x*(255-x)")
///     .max_generations(20)
///     .elitism(1)
///     .build();
///
/// let mut launcher = EvolutionLauncher::builder()
///     .with_parameters(params)
///     .with_seed(42)
///     .build()
///     .unwrap();
///
/// launcher.initialize().unwrap();
/// let last = launcher.evolve().unwrap().unwrap();
///
/// assert_eq!(last.generation, 20);
/// assert!(launcher.is_finished());
/// assert_eq!(launcher.history().len(), 21);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionLauncher {
    params: GaParameters,
    fitness: FitnessFunction,
    cache: DomainCache,
    rng: RandomNumberGenerator,
    population: Option<Population>,
    generation: usize,
    history: Vec<GenerationSummary>,
}

impl EvolutionLauncher {
    /// Creates a launcher with an entropy-seeded generator and an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] if `params` do not validate.
    pub fn new(params: GaParameters) -> Result<Self> {
        Self::from_parts(params, RandomNumberGenerator::new(), DomainCache::new())
    }

    /// Returns a builder for configuring the generator and cache as well.
    pub fn builder() -> EvolutionLauncherBuilder {
        EvolutionLauncherBuilder::new()
    }

    pub(crate) fn from_parts(
        params: GaParameters,
        rng: RandomNumberGenerator,
        mut cache: DomainCache,
    ) -> Result<Self> {
        params.validate()?;
        let fitness = FitnessFunction::with_cache(
            Expression::compile(params.function_expression()),
            &mut cache,
        );

        Ok(Self {
            params,
            fitness,
            cache,
            rng,
            population: None,
            generation: 0,
            history: Vec::new(),
        })
    }

    /// Creates a fresh random population as generation `0`.
    ///
    /// Any previous population and history are discarded.
    pub fn initialize(&mut self) -> Result<GenerationResult> {
        let population =
            engine::initialize(self.params.population_size(), &self.fitness, &mut self.rng);
        self.generation = 0;
        self.history.clear();
        tracing::debug!(
            population_size = population.len(),
            expression = %self.fitness.expression(),
            "population initialized"
        );
        self.record(population)
    }

    /// Advances the run by one generation.
    ///
    /// Returns `Ok(None)` once `max_generations` generations have been produced.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::NotInitialized`] if [`initialize`](Self::initialize)
    /// has not been called since construction or the last [`reset`](Self::reset).
    pub fn step(&mut self) -> Result<Option<GenerationResult>> {
        let population = self
            .population
            .as_ref()
            .ok_or_else_genetic(|| GeneticError::NotInitialized)?;

        if self.is_finished() {
            tracing::debug!(generation = self.generation, "maximum generation reached");
            return Ok(None);
        }

        let next =
            engine::advance_generation(population, &self.params, &self.fitness, &mut self.rng)?;
        self.generation += 1;
        self.record(next).map(Some)
    }

    /// Steps until `max_generations` is reached and returns the last result,
    /// or `None` if the run was already finished.
    pub fn evolve(&mut self) -> Result<Option<GenerationResult>> {
        self.evolve_with(|_| {})
    }

    /// Like [`evolve`](Self::evolve), calling `observer` after every generation.
    ///
    /// The engine never waits between generations; a host that wants to
    /// animate progress can pace itself inside the observer.
    pub fn evolve_with<F>(&mut self, mut observer: F) -> Result<Option<GenerationResult>>
    where
        F: FnMut(&GenerationResult),
    {
        let mut last = None;
        while let Some(result) = self.step()? {
            observer(&result);
            last = Some(result);
        }
        Ok(last)
    }

    /// Drops the population and history; the run becomes uninitialized.
    pub fn reset(&mut self) {
        self.population = None;
        self.generation = 0;
        self.history.clear();
        tracing::debug!("run reset");
    }

    /// Replaces the parameters of the run.
    ///
    /// A changed expression invalidates the domain cache and recompiles the
    /// fitness function; the current population keeps the scores it was
    /// created with and later generations are scored with the new expression.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] if `params` do not validate; the
    /// previous parameters are kept in that case.
    pub fn set_parameters(&mut self, params: GaParameters) -> Result<()> {
        params.validate()?;
        if params.function_expression() != self.params.function_expression() {
            self.cache.reset();
            self.fitness = FitnessFunction::with_cache(
                Expression::compile(params.function_expression()),
                &mut self.cache,
            );
        }
        self.params = params;
        Ok(())
    }

    fn record(&mut self, population: Population) -> Result<GenerationResult> {
        let best = *population.best()?;
        let avg_fitness = population.average_fitness();
        let summary = GenerationSummary {
            generation: self.generation,
            max_fitness: best.fitness(),
            avg_fitness,
        };

        match self.params.log_level() {
            LogLevel::Minimal => tracing::info!(
                generation = summary.generation,
                best_x = best.x(),
                max_fitness = summary.max_fitness,
                avg_fitness,
                "generation complete"
            ),
            LogLevel::Verbose => {
                let stats = population.stats()?;
                tracing::debug!(
                    generation = summary.generation,
                    best_x = stats.best.x(),
                    max_fitness = stats.best.fitness(),
                    worst_x = stats.worst.x(),
                    min_fitness = stats.worst.fitness(),
                    avg_fitness = stats.average,
                    variance = stats.variance,
                    "generation complete"
                );
                for individual in &population {
                    tracing::debug!(
                        generation = summary.generation,
                        genotype = %individual.genotype(),
                        x = individual.x(),
                        fitness = individual.fitness(),
                        normalized_fitness = individual.normalized_fitness(),
                        "individual"
                    );
                }
            }
            LogLevel::None => {}
        }

        self.history.push(summary);
        self.population = Some(population.clone());

        Ok(GenerationResult {
            generation: self.generation,
            population,
            best,
            avg_fitness,
            max_fitness: best.fitness(),
        })
    }

    pub fn state(&self) -> EngineState {
        if self.population.is_some() {
            EngineState::Ready
        } else {
            EngineState::Uninitialized
        }
    }

    /// The number of generations produced since initialization.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns `true` once `max_generations` generations have been produced.
    pub fn is_finished(&self) -> bool {
        self.population.is_some() && self.generation >= self.params.max_generations()
    }

    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    /// The fittest individual of the current generation.
    pub fn best(&self) -> Option<&Individual> {
        self.population.as_ref().and_then(|p| p.best().ok())
    }

    /// Best and average fitness of every generation since initialization.
    pub fn history(&self) -> &[GenerationSummary] {
        &self.history
    }

    pub fn parameters(&self) -> &GaParameters {
        &self.params
    }

    pub fn fitness_function(&self) -> &FitnessFunction {
        &self.fitness
    }

    /// Consumes the launcher, handing back its domain cache for reuse.
    pub fn into_cache(self) -> DomainCache {
        self.cache
    }
}
