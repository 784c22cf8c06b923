//! # connect4-search
//!
//! Move search for Connect Four: a depth-bounded alpha-beta minimax search
//! with a positional heuristic, and a Monte Carlo Tree Search (MCTS) engine
//! whose tree is carried over from one turn to the next.
//!
//! ## Features
//!
//! - Rules engine with symmetric win detection and open-line counting
//! - Alpha-beta minimax preferring the quickest forced win
//! - MCTS with UCB1 selection, random rollouts and pluggable policies
//! - Arena-backed search tree with root relocation between turns
//! - Seedable randomness for reproducible searches
//!
//! ## Basic Usage
//!
//! ```
//! use connect4_search::{Board, MCTSConfig, Player, MCTS};
//!
//! // Player One has three pieces stacked in column 0 and is to move
//! let board = Board::from_moves(&[0, 1, 0, 1, 0, 2]).unwrap();
//!
//! let config = MCTSConfig::default()
//!     .with_max_iterations(2_000)
//!     .with_seed(42);
//!
//! let mut mcts = MCTS::new(board, Player::One, config);
//! let best = mcts.search()?;
//! println!("{}", mcts.get_statistics().summary());
//! assert_eq!(best.column, 0);
//! # Ok::<(), connect4_search::SearchError>(())
//! ```
//!
//! ## How It Works
//!
//! MCTS consists of four main phases:
//!
//! 1. **Selection**: Starting from the root, descend through fully expanded
//!    nodes, choosing the child with the highest UCB1 value.
//!
//! 2. **Expansion**: Add one child for a random untried move of the selected
//!    node, unless the move into that node already won the game.
//!
//! 3. **Simulation**: From the new node, play random moves until someone
//!    connects four or the board is full.
//!
//! 4. **Backpropagation**: Update simulation and win counts on the path back
//!    to the root.
//!
//! The [`agent`] module wraps both searches behind a single move-generation
//! interface for a game loop.

pub mod agent;
pub mod board;
pub mod config;
pub mod heuristic;
pub mod mcts;
pub mod minimax;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod utils;

pub use agent::{MctsAgent, MinimaxAgent, MoveGenerator, RandomAgent, SavedState};
pub use board::{Board, Move, Outcome, Player};
pub use config::{MCTSConfig, MinimaxConfig};
pub use mcts::MCTS;
pub use minimax::AlphaBeta;
pub use policy::{BackpropagationPolicy, ExpansionPolicy, SelectionPolicy, SimulationPolicy};
pub use stats::SearchStatistics;
pub use tree::{MCTSNode, NodeId, SearchTree};

/// Error types for the search engine
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A piece was dropped into a full or nonexistent column
    #[error("Invalid move: column {column} is full or out of range")]
    InvalidMove {
        /// The offending column
        column: usize,
    },

    /// No legal moves are available from the current position
    #[error("No legal moves available from current position")]
    NoLegalMoves,

    /// The move into the search root already won the game
    #[error("Game is already over: {winner:?} has connected four")]
    GameOver {
        /// The player who made the winning move
        winner: Player,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Board text could not be parsed
    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
