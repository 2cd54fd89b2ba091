use crate::encoding::{Genotype, GENOTYPE_BITS};
use crate::rng::RandomNumberGenerator;

/// Bit-flip mutation: each bit is inverted independently with probability `rate`.
pub fn mutate(genotype: Genotype, rate: f64, rng: &mut RandomNumberGenerator) -> Genotype {
    (0..GENOTYPE_BITS).fold(genotype, |mutated, position| {
        if rng.chance(rate) {
            mutated.flipped(position)
        } else {
            mutated
        }
    })
}
