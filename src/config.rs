//! Configuration options for the search strategies
//!
//! This module defines the parameters that control the behavior of the
//! MCTS driver and the alpha-beta searcher.

use std::time::Duration;

use crate::{Result, SearchError};

/// Criteria for selecting the best child after search is complete
///
/// This determines how the final move is selected among the root's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BestChildCriteria {
    /// Select the child with the most recorded wins
    ///
    /// This is the default. Wins are tallied for the player who made the
    /// move leading into the child.
    #[default]
    MostWins,

    /// Select the child with the most simulations
    ///
    /// More conservative: relies on how often UCB1 chose to revisit a move.
    MostSimulations,
}

/// Configuration for the MCTS algorithm
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use connect4_search::{MCTSConfig, config::BestChildCriteria};
/// use std::time::Duration;
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.5)
///     .with_time_budget(Duration::from_millis(500))
///     .with_max_iterations(10_000)
///     .with_best_child_criteria(BestChildCriteria::MostSimulations)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant for UCB1
    ///
    /// Higher values favor exploration of less-visited nodes.
    /// The standard value is sqrt(2).
    pub exploration_constant: f64,

    /// Wall-clock budget of one search
    ///
    /// Checked between iterations; an iteration in progress always completes.
    pub time_budget: Duration,

    /// Maximum number of iterations to run
    ///
    /// If set, the search stops after this many iterations even if there is
    /// still time available.
    pub max_iterations: Option<usize>,

    /// Criteria for selecting the best child after search
    pub best_child_criteria: BestChildCriteria,

    /// Seed for the random source, `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: std::f64::consts::SQRT_2,
            time_budget: Duration::from_secs(2),
            max_iterations: None,
            best_child_criteria: BestChildCriteria::MostWins,
            seed: None,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the wall-clock budget of one search
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Sets the maximum number of iterations
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Seeds the random source for reproducible searches
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration describes a search that can run
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }

        if self.time_budget.is_zero() && self.max_iterations.is_none() {
            return Err(SearchError::InvalidConfiguration(
                "either a time budget or an iteration limit is required".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration for the alpha-beta searcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimaxConfig {
    /// Number of plies searched before the heuristic is applied
    pub depth: usize,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        MinimaxConfig { depth: 7 }
    }
}

impl MinimaxConfig {
    /// Sets the search depth
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}
