use crate::encoding::{Genotype, GENOTYPE_BITS};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Single-point crossover.
///
/// With probability `rate` a cut point is drawn uniformly from `1..=7` and the
/// parents' bit-strings are spliced there. Otherwise the children are copies
/// of the parents' genotypes.
pub fn crossover(
    parent_a: &Individual,
    parent_b: &Individual,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> (Genotype, Genotype) {
    if !rng.chance(rate) {
        return (parent_a.genotype(), parent_b.genotype());
    }

    let point = rng.gen_range(1..GENOTYPE_BITS);
    crossover_at(parent_a.genotype(), parent_b.genotype(), point)
}

/// Splices two genotypes at `point`: the first child takes the leading
/// `point` bits of `a` and the rest of `b`, the second child the reverse.
///
/// ```rust
/// use bytega::breeding::crossover_at;
///
/// let (a, b) = crossover_at("11110000".parse().unwrap(), "00001111".parse().unwrap(), 4);
/// assert_eq!(a.to_string(), "11111111");
/// assert_eq!(b.to_string(), "00000000");
/// ```
pub fn crossover_at(a: Genotype, b: Genotype, point: usize) -> (Genotype, Genotype) {
    let head = head_mask(point);
    (
        Genotype::from_bits((a.bits() & head) | (b.bits() & !head)),
        Genotype::from_bits((b.bits() & head) | (a.bits() & !head)),
    )
}

/// Mask selecting the leading `point` bits.
fn head_mask(point: usize) -> u8 {
    match point {
        0 => 0,
        p if p >= GENOTYPE_BITS => u8::MAX,
        p => u8::MAX << (GENOTYPE_BITS - p),
    }
}
