pub mod builder;
pub mod engine;
pub mod launcher;
pub mod options;

pub use builder::EvolutionLauncherBuilder;
pub use engine::{advance_generation, initialize};
pub use launcher::{EngineState, EvolutionLauncher, GenerationResult, GenerationSummary};
pub use options::{GaParameters, GaParametersBuilder, LogLevel};
