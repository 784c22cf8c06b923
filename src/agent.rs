//! Move generators for a turn-based game loop
//!
//! A game loop asks a [`MoveGenerator`] for the next column, handing it the
//! current board, the player to move and whatever [`SavedState`] the same
//! generator returned on its previous turn. The saved state is how the MCTS
//! generator keeps its tree from one turn to the next.
//!
//! ```
//! use connect4_search::agent::{MinimaxAgent, MoveGenerator, SavedState};
//! use connect4_search::board::{Board, Player};
//! use connect4_search::config::MinimaxConfig;
//!
//! let mut agent = MinimaxAgent::new(MinimaxConfig::default().with_depth(2));
//! let (action, state) = agent
//!     .generate_move(&Board::new(), Player::One, SavedState::Absent)
//!     .unwrap();
//! assert!(action.column < 7);
//! assert!(matches!(state, SavedState::Minimax));
//! ```

use log::{debug, warn};
use rand::{rngs::StdRng, seq::SliceRandom, RngCore, SeedableRng};

use crate::{
    board::{Board, Move, Player},
    config::{MCTSConfig, MinimaxConfig},
    mcts::MCTS,
    minimax::AlphaBeta,
    Result, SearchError,
};

/// Search state carried between two turns of the same seat
#[derive(Debug, Default)]
pub enum SavedState {
    /// No state yet (first turn) or a strategy that keeps none
    #[default]
    Absent,
    /// Marker returned by the alpha-beta generator, which keeps no state
    Minimax,
    /// The MCTS driver, rooted at the position after this seat's last move
    Mcts(Box<MCTS>),
}

/// Produces the next move for a seat
pub trait MoveGenerator {
    /// Chooses a column for `player` on `board`
    ///
    /// `saved` is the state this generator returned on its previous call for
    /// the same seat (or [`SavedState::Absent`] on the first call).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoLegalMoves`] if the board is full.
    /// The MCTS generator returns [`SearchError::GameOver`] when its saved
    /// tree is rooted at a position that is already won.
    fn generate_move(
        &mut self,
        board: &Board,
        player: Player,
        saved: SavedState,
    ) -> Result<(Move, SavedState)>;
}

/// Alpha-beta minimax move generator
#[derive(Debug, Clone, Default)]
pub struct MinimaxAgent {
    searcher: AlphaBeta,
}

impl MinimaxAgent {
    /// Creates a generator searching to the configured depth
    pub fn new(config: MinimaxConfig) -> Self {
        MinimaxAgent {
            searcher: AlphaBeta::new(config),
        }
    }
}

impl MoveGenerator for MinimaxAgent {
    fn generate_move(
        &mut self,
        board: &Board,
        player: Player,
        _saved: SavedState,
    ) -> Result<(Move, SavedState)> {
        let (_, action) = self.searcher.search(board, player)?;
        Ok((action, SavedState::Minimax))
    }
}

/// Monte Carlo Tree Search move generator with tree reuse
#[derive(Debug, Clone, Default)]
pub struct MctsAgent {
    config: MCTSConfig,
}

impl MctsAgent {
    /// Creates a generator using the given search configuration
    pub fn new(config: MCTSConfig) -> Self {
        MctsAgent { config }
    }

    /// Recovers the previous tree if it contains the current position
    fn reuse_tree(&self, board: &Board, player: Player, saved: SavedState) -> MCTS {
        match saved {
            SavedState::Mcts(mut mcts) => {
                if mcts.sync_to(board, player) {
                    debug!("reusing search tree with {} nodes", mcts.tree().len());
                    return *mcts;
                }
                debug!("opponent reply not in search tree, starting a fresh tree");
            }
            SavedState::Minimax => {
                warn!("saved state belongs to the minimax generator, starting a fresh tree");
            }
            SavedState::Absent => {}
        }

        MCTS::new(*board, player, self.config.clone())
    }
}

impl MoveGenerator for MctsAgent {
    fn generate_move(
        &mut self,
        board: &Board,
        player: Player,
        saved: SavedState,
    ) -> Result<(Move, SavedState)> {
        if board.is_full() {
            return Err(SearchError::NoLegalMoves);
        }

        let mut mcts = self.reuse_tree(board, player, saved);
        let action = mcts.search()?;
        debug!("MCTS chose column {}: {}", action, mcts.get_statistics().summary());

        // The chosen child always exists: best_action expands the whole root
        mcts.advance(action);
        Ok((action, SavedState::Mcts(Box::new(mcts))))
    }
}

/// Plays a uniformly random legal move
pub struct RandomAgent {
    rng: Box<dyn RngCore>,
}

impl RandomAgent {
    /// Creates a generator seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a generator drawing from `rng`
    pub fn with_rng<R: RngCore + 'static>(rng: R) -> Self {
        RandomAgent { rng: Box::new(rng) }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGenerator for RandomAgent {
    fn generate_move(
        &mut self,
        board: &Board,
        _player: Player,
        saved: SavedState,
    ) -> Result<(Move, SavedState)> {
        let action = board
            .legal_moves()
            .choose(&mut *self.rng)
            .copied()
            .ok_or(SearchError::NoLegalMoves)?;
        Ok((action, saved))
    }
}
