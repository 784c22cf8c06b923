//! Expansion policies determine which unexpanded move to choose
//! when expanding a leaf node.

use rand::{seq::SliceRandom, RngCore};

use crate::{board::Move, tree::MCTSNode};

/// Trait for policies that select which move to expand
pub trait ExpansionPolicy {
    /// Selects one of the node's unexpanded moves, `None` if there is none
    fn select_move_to_expand(&self, node: &MCTSNode, rng: &mut dyn RngCore) -> Option<Move>;
}

/// Random expansion policy
///
/// Selects an unexpanded move uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomExpansionPolicy;

impl RandomExpansionPolicy {
    /// Creates a new random expansion policy
    pub fn new() -> Self {
        RandomExpansionPolicy
    }
}

impl Default for RandomExpansionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpansionPolicy for RandomExpansionPolicy {
    fn select_move_to_expand(&self, node: &MCTSNode, rng: &mut dyn RngCore) -> Option<Move> {
        node.unexpanded_moves().choose(rng).copied()
    }
}

// Implement ExpansionPolicy for Box<dyn ExpansionPolicy>
impl ExpansionPolicy for Box<dyn ExpansionPolicy> {
    fn select_move_to_expand(&self, node: &MCTSNode, rng: &mut dyn RngCore) -> Option<Move> {
        (**self).select_move_to_expand(node, rng)
    }
}
