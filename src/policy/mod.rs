//! Policies for the different phases of the MCTS algorithm
//!
//! - Selection policies: How to choose which nodes to explore
//! - Expansion policies: Which unexpanded move to add to the tree
//! - Simulation policies: How to play out games from a node
//! - Backpropagation policies: How to update node statistics

pub mod backpropagation;
pub mod expansion;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, StandardPolicy};
pub use expansion::{ExpansionPolicy, RandomExpansionPolicy};
pub use selection::{SelectionPolicy, UCB1Policy};
pub use simulation::{RandomPolicy, SimulationPolicy};
