pub mod breeding;
pub mod caching;
pub mod encoding;
pub mod error;
pub mod evolution;
pub mod expression;
pub mod fitness;
pub mod individual;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionLauncher, GaParameters};
pub use individual::Individual;
pub use population::Population;
