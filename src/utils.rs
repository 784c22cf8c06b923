//! Utility functions for the MCTS algorithm

/// Safely calculates the win rate from wins and simulations
///
/// Returns 0.0 if no simulations have occurred.
pub fn win_rate(wins: u64, simulations: u64) -> f64 {
    if simulations == 0 {
        return 0.0;
    }
    wins as f64 / simulations as f64
}

/// Calculates the exploration term for UCB1
///
/// This is the term that encourages exploration of less-simulated nodes.
pub fn exploration_term(
    parent_simulations: u64,
    simulations: u64,
    exploration_constant: f64,
) -> f64 {
    if simulations == 0 {
        return f64::INFINITY;
    }

    exploration_constant * ((parent_simulations as f64).ln() / simulations as f64).sqrt()
}

/// Calculates the UCB1 value of a node with at least one simulation
///
/// ```text
/// UCB1 = wins / simulations + c * sqrt(ln(parent_simulations) / simulations)
/// ```
pub fn ucb1_value(
    wins: u64,
    simulations: u64,
    parent_simulations: u64,
    exploration_constant: f64,
) -> f64 {
    win_rate(wins, simulations)
        + exploration_term(parent_simulations, simulations, exploration_constant)
}
