//! Backpropagation policies for the MCTS algorithm
//!
//! Backpropagation policies determine how to update node statistics
//! after a simulation.

use crate::{board::Player, tree::MCTSNode};

/// Trait for policies that backpropagate simulation results
pub trait BackpropagationPolicy {
    /// Updates statistics for a node based on the winner of a simulation
    fn update_stats(&self, node: &mut MCTSNode, winner: Option<Player>);
}

/// Standard backpropagation policy
///
/// Every node on the path counts one more simulation. A node counts a win
/// when the simulation had a winner other than the node's player to move:
/// that winner is the player who made the move into the node, and the
/// parent ranks its children by exactly this tally. Draws count no win.
#[derive(Debug, Clone)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl BackpropagationPolicy for StandardPolicy {
    fn update_stats(&self, node: &mut MCTSNode, winner: Option<Player>) {
        let won = winner.map_or(false, |w| w != node.player);
        node.record_simulation(won);
    }
}

// Implement BackpropagationPolicy for Box<dyn BackpropagationPolicy>
impl BackpropagationPolicy for Box<dyn BackpropagationPolicy> {
    fn update_stats(&self, node: &mut MCTSNode, winner: Option<Player>) {
        (**self).update_stats(node, winner)
    }
}
