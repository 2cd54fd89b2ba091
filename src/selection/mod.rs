pub mod elitist;
pub mod roulette;

pub use elitist::ElitistSelection;
pub use roulette::{select_parent, RouletteWheelSelection};
