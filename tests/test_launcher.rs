use bytega::{
    error::GeneticError,
    evolution::{EngineState, EvolutionLauncher, GaParameters, LogLevel},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_full_run_with_verbose_logging() {
    init_tracing();

    let params = GaParameters::builder()
        .population_size(11)
        .max_generations(25)
        .elitism(1)
        .log_level(LogLevel::Verbose)
        .function_expression("100 - abs(x - 77)")
        .build();
    let mut launcher = EvolutionLauncher::builder()
        .with_parameters(params)
        .with_seed(17)
        .build()
        .unwrap();

    let initial = launcher.initialize().unwrap();
    let last = launcher.evolve().unwrap().unwrap();

    assert_eq!(last.generation, 25);
    assert_eq!(last.population.len(), 11);
    assert!(last.max_fitness >= initial.max_fitness);

    // With one elite the best fitness never drops between generations.
    let maxima: Vec<f64> = launcher.history().iter().map(|s| s.max_fitness).collect();
    assert!(maxima.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_minimal_logging_run() {
    init_tracing();

    let params = GaParameters::builder()
        .max_generations(5)
        .log_level(LogLevel::Minimal)
        .build();
    let mut launcher = EvolutionLauncher::new(params).unwrap();
    launcher.initialize().unwrap();

    let mut count = 0;
    launcher.evolve_with(|_| count += 1).unwrap();
    assert_eq!(count, 5);
    assert_eq!(launcher.state(), EngineState::Ready);
}

#[test]
fn test_step_before_initialize() {
    let mut launcher = EvolutionLauncher::new(GaParameters::default()).unwrap();
    assert_eq!(launcher.step(), Err(GeneticError::NotInitialized));
    assert!(matches!(launcher.evolve(), Err(GeneticError::NotInitialized)));
}

#[test]
fn test_invalid_configuration_surfaces_before_run() {
    let params = GaParameters::builder().crossover_rate(1.2).build();
    match EvolutionLauncher::new(params) {
        Err(GeneticError::Configuration(msg)) => assert!(msg.contains("Crossover rate")),
        other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_separate_runs_do_not_share_expression_state() {
    let mut a = EvolutionLauncher::builder()
        .with_parameters(GaParameters::builder().function_expression("x").build())
        .with_seed(1)
        .build()
        .unwrap();
    let b = EvolutionLauncher::builder()
        .with_parameters(GaParameters::builder().function_expression("-x").build())
        .with_seed(1)
        .build()
        .unwrap();

    let result = a.initialize().unwrap();
    for individual in result.population.iter() {
        assert_eq!(individual.fitness(), f64::from(individual.x()) + 1.0);
    }
    assert_eq!(b.fitness_function().bounds().min, -255.0);
    assert_eq!(a.fitness_function().bounds().min, 0.0);
}

#[cfg(feature = "serde")]
#[test]
fn test_parameters_from_json() {
    let params: GaParameters = serde_json::from_str(
        r#"{ "population_size": 30, "function_expression": "x*x", "log_level": "Minimal" }"#,
    )
    .unwrap();

    assert_eq!(params.population_size(), 30);
    assert_eq!(params.function_expression(), "x*x");
    assert_eq!(params.log_level(), LogLevel::Minimal);
    assert_eq!(params.crossover_rate(), 0.64);

    let json = serde_json::to_string(&params).unwrap();
    let back: GaParameters = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}
