use crate::{
    caching::DomainCache,
    error::{GeneticError, Result},
    rng::RandomNumberGenerator,
};

use super::{EvolutionLauncher, GaParameters};

/// Builder for [`EvolutionLauncher`].
///
/// Parameters are required. The generator defaults to one seeded from system
/// entropy and the cache to an empty one.
#[derive(Debug, Clone, Default)]
pub struct EvolutionLauncherBuilder {
    parameters: Option<GaParameters>,
    rng: Option<RandomNumberGenerator>,
    cache: Option<DomainCache>,
}

impl EvolutionLauncherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(mut self, parameters: GaParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Uses a generator seeded with `seed`, making the run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(RandomNumberGenerator::from_seed(seed));
        self
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Starts the run with a cache that may already hold the bounds of its
    /// expression, for example one returned by [`EvolutionLauncher::into_cache`].
    pub fn with_cache(mut self, cache: DomainCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<EvolutionLauncher> {
        let parameters = self.parameters.ok_or_else(|| {
            GeneticError::Configuration("Parameters not specified".to_string())
        })?;

        EvolutionLauncher::from_parts(
            parameters,
            self.rng.unwrap_or_default(),
            self.cache.unwrap_or_default(),
        )
    }
}
