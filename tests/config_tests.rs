use connect4_search::{config::BestChildCriteria, MCTSConfig, MinimaxConfig, SearchError};
use std::time::Duration;

#[test]
fn test_config_builder_methods() {
    // Test that all builder methods correctly set their respective values
    let config = MCTSConfig::default()
        .with_exploration_constant(2.0)
        .with_max_iterations(5000)
        .with_time_budget(Duration::from_secs(30))
        .with_best_child_criteria(BestChildCriteria::MostSimulations)
        .with_seed(99);

    assert_eq!(config.exploration_constant, 2.0);
    assert_eq!(config.max_iterations, Some(5000));
    assert_eq!(config.time_budget, Duration::from_secs(30));
    assert_eq!(config.best_child_criteria, BestChildCriteria::MostSimulations);
    assert_eq!(config.seed, Some(99));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_default_values() {
    let config = MCTSConfig::default();

    // Default exploration constant should be sqrt(2)
    assert!((config.exploration_constant - 1.414).abs() < 0.001);
    assert_eq!(config.time_budget, Duration::from_secs(2));
    assert_eq!(config.max_iterations, None);
    assert_eq!(config.best_child_criteria, BestChildCriteria::MostWins);
    assert_eq!(config.seed, None);
    assert!(config.validate().is_ok());

    assert_eq!(MinimaxConfig::default().depth, 7);
    assert_eq!(MinimaxConfig::default().with_depth(3).depth, 3);
}

#[test]
fn test_config_validation() {
    for constant in [-0.5, f64::NAN, f64::INFINITY] {
        let config = MCTSConfig::default().with_exploration_constant(constant);
        assert!(matches!(config.validate(), Err(SearchError::InvalidConfiguration(_))));
    }

    let unbounded = MCTSConfig::default().with_time_budget(Duration::ZERO);
    assert!(matches!(unbounded.validate(), Err(SearchError::InvalidConfiguration(_))));

    // An iteration limit alone is enough
    let capped = unbounded.with_max_iterations(10);
    assert!(capped.validate().is_ok());

    // Zero exploration is pure exploitation, still valid
    assert!(MCTSConfig::default().with_exploration_constant(0.0).validate().is_ok());
}
