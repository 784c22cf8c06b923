//! Selection policies for the MCTS algorithm
//!
//! Selection policies determine which child to descend into during the
//! selection phase of MCTS, balancing exploration and exploitation.

use rand::RngCore;

use crate::tree::{NodeId, SearchTree};

/// Trait for policies that select nodes to explore
pub trait SelectionPolicy {
    /// Selects the child of `node` to descend into
    ///
    /// Returns `None` if the node has no expanded children.
    fn select_child(
        &self,
        tree: &SearchTree,
        node: NodeId,
        rng: &mut dyn RngCore,
    ) -> Option<NodeId>;
}

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// This is the classic selection policy for MCTS:
///
/// ```text
/// UCB1 = wins / simulations + exploration_constant * sqrt(ln(parent_simulations) / simulations)
/// ```
///
/// Children that have never been simulated score a random integer in
/// `[-5, 5]` instead of infinity, see [`SearchTree::ucb1`].
///
/// The commonly used value for the exploration constant is sqrt(2),
/// which is the default in this implementation.
#[derive(Debug, Clone)]
pub struct UCB1Policy {
    /// Exploration constant that controls the balance between exploration and exploitation.
    /// Higher values favor exploration of less-simulated nodes.
    pub exploration_constant: f64,
}

impl UCB1Policy {
    /// Creates a new UCB1 policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCB1Policy {
            exploration_constant,
        }
    }
}

impl Default for UCB1Policy {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}

impl SelectionPolicy for UCB1Policy {
    fn select_child(
        &self,
        tree: &SearchTree,
        node: NodeId,
        rng: &mut dyn RngCore,
    ) -> Option<NodeId> {
        let mut best_value = f64::NEG_INFINITY;
        let mut best_child = None;

        for (_, child) in tree.node(node).expanded_children() {
            let ucb_value = tree.ucb1(child, self.exploration_constant, rng);

            if best_child.is_none() || ucb_value > best_value {
                best_value = ucb_value;
                best_child = Some(child);
            }
        }

        best_child
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl SelectionPolicy for Box<dyn SelectionPolicy> {
    fn select_child(
        &self,
        tree: &SearchTree,
        node: NodeId,
        rng: &mut dyn RngCore,
    ) -> Option<NodeId> {
        (**self).select_child(tree, node, rng)
    }
}
