use bytega::{
    breeding::crossover_at,
    encoding::{decode, encode, Genotype},
    evolution::{advance_generation, initialize, GaParameters},
    expression::Expression,
    fitness::FitnessFunction,
    individual::Individual,
    population::Population,
    rng::RandomNumberGenerator,
};
use proptest::prelude::*;

fn population(scores: &[f64]) -> Population {
    Population::normalized(
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| Individual::with_score(Genotype::from_bits(i as u8), score))
            .collect(),
    )
}

proptest! {
    #[test]
    fn bit_string_round_trip(bits in "[01]{8}") {
        let genotype: Genotype = bits.parse().unwrap();
        prop_assert_eq!(encode(f64::from(decode(genotype))).to_string(), bits);
    }

    #[test]
    fn integer_round_trip(n in 0u8..=255) {
        prop_assert_eq!(decode(encode(f64::from(n))), n);
    }

    #[test]
    fn encode_is_total(value in any::<f64>()) {
        let x = decode(encode(value));
        if value.is_finite() && (0.0..256.0).contains(&value) {
            prop_assert_eq!(f64::from(x), value.floor());
        }
    }

    #[test]
    fn normalized_fitness_sums_to_one(scores in prop::collection::vec(1.0f64..1000.0, 2..64)) {
        let population = population(&scores);
        let sum: f64 = population.iter().map(Individual::normalized_fitness).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
        prop_assert!(population.iter().all(|i| (0.0..=1.0).contains(&i.normalized_fitness())));
    }

    #[test]
    fn uniform_fitness_gives_equal_shares(score in 1.0f64..1000.0, len in 1usize..64) {
        let population = population(&vec![score; len]);
        for individual in population.iter() {
            prop_assert_eq!(individual.normalized_fitness(), 1.0 / len as f64);
        }
    }

    #[test]
    fn non_positive_total_gives_equal_shares(scores in prop::collection::vec(-1000.0f64..0.0, 1..64)) {
        let population = population(&scores);
        for individual in population.iter() {
            prop_assert_eq!(individual.normalized_fitness(), 1.0 / scores.len() as f64);
        }
    }

    #[test]
    fn crossover_preserves_bits(a in any::<u8>(), b in any::<u8>(), point in 1usize..8) {
        let (a, b) = (Genotype::from_bits(a), Genotype::from_bits(b));
        let (c, d) = crossover_at(a, b, point);
        // Every position holds one bit from each parent across the two children.
        prop_assert_eq!(c.bits() ^ d.bits(), a.bits() ^ b.bits());
        prop_assert_eq!(c.bits() & d.bits(), a.bits() & b.bits());
    }

    #[test]
    fn advance_generation_keeps_population_size(
        size in 1usize..40,
        elitism in 0usize..50,
        crossover_rate in 0.0f64..=1.0,
        mutation_rate in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let params = GaParameters::builder()
            .population_size(size)
            .elitism(elitism)
            .crossover_rate(crossover_rate)
            .mutation_rate(mutation_rate)
            .build();
        let fitness = FitnessFunction::new(Expression::compile("sin(x / 10) * x"));
        let mut rng = RandomNumberGenerator::from_seed(seed);

        let population = initialize(size, &fitness, &mut rng);
        let next = advance_generation(&population, &params, &fitness, &mut rng).unwrap();
        prop_assert_eq!(next.len(), size);
        let sum: f64 = next.iter().map(Individual::normalized_fitness).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }
}
