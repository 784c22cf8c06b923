//! Depth-bounded minimax search with alpha-beta pruning
//!
//! Two mutually recursive procedures, [`AlphaBeta::search_max`] and
//! [`AlphaBeta::search_min`], walk the game tree in ascending column order.
//! The search stops at a fixed ply depth where positions are scored with the
//! [`heuristic`](crate::heuristic) evaluator, or earlier when a move wins on
//! the spot.
//!
//! # Example
//!
//! ```
//! use connect4_search::board::{Board, Move, Player};
//! use connect4_search::config::MinimaxConfig;
//! use connect4_search::heuristic::WIN_SCORE;
//! use connect4_search::minimax::AlphaBeta;
//!
//! // Player One has three pieces stacked in column 0
//! let board = Board::from_moves(&[0, 1, 0, 1, 0, 2]).unwrap();
//!
//! let mut searcher = AlphaBeta::new(MinimaxConfig::default().with_depth(3));
//! let (score, best) = searcher.search(&board, Player::One).unwrap();
//! assert_eq!(best, Move::new(0));
//! assert_eq!(score, WIN_SCORE * 3);
//! ```

use std::time::{Duration, Instant};

use log::debug;

use crate::{
    board::{Board, Move, Player},
    config::MinimaxConfig,
    heuristic::{self, Perspective, WIN_SCORE},
    Result, SearchError,
};

/// Bound used for the initial alpha-beta window
pub const INFINITY: i64 = i64::MAX;

/// Counters gathered during one alpha-beta search
#[derive(Debug, Clone, Default)]
pub struct MinimaxStatistics {
    /// Number of positions expanded by `search_max`/`search_min`
    pub nodes: u64,
    /// Number of times the remaining columns of a node were pruned
    pub cutoffs: u64,
    /// Wall-clock time of the last search
    pub total_time: Duration,
}

impl MinimaxStatistics {
    /// Returns a one-line summary of the statistics
    pub fn summary(&self) -> String {
        format!(
            "nodes: {}, cutoffs: {}, time: {:.3} s",
            self.nodes,
            self.cutoffs,
            self.total_time.as_secs_f64()
        )
    }
}

/// Alpha-beta minimax searcher
#[derive(Debug, Clone)]
pub struct AlphaBeta {
    config: MinimaxConfig,
    statistics: MinimaxStatistics,
}

impl AlphaBeta {
    /// Creates a searcher with the given configuration
    pub fn new(config: MinimaxConfig) -> Self {
        AlphaBeta {
            config,
            statistics: MinimaxStatistics::default(),
        }
    }

    /// Returns the configuration of this searcher
    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Returns the statistics of the last search
    pub fn get_statistics(&self) -> &MinimaxStatistics {
        &self.statistics
    }

    /// Searches the position for `player` to the configured depth
    ///
    /// Returns the score of the position for `player` and the column to play.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoLegalMoves`] if the board is full.
    pub fn search(&mut self, board: &Board, player: Player) -> Result<(i64, Move)> {
        self.statistics = MinimaxStatistics::default();
        let start = Instant::now();

        let (score, best) = self.search_max(board, player, self.config.depth, -INFINITY, INFINITY)?;
        self.statistics.total_time = start.elapsed();

        let best = best.ok_or(SearchError::NoLegalMoves)?;
        debug!(
            "alpha-beta depth {} chose column {} (score {}, {})",
            self.config.depth,
            best,
            score,
            self.statistics.summary()
        );
        Ok((score, best))
    }

    /// Maximizing step: `player` is to move and wants the highest score
    ///
    /// Returns the score and the chosen column, `None` when the board is full.
    pub fn search_max(
        &mut self,
        board: &Board,
        player: Player,
        depth: usize,
        mut alpha: i64,
        beta: i64,
    ) -> Result<(i64, Option<Move>)> {
        self.statistics.nodes += 1;

        let moves = board.legal_moves();
        if moves.is_empty() {
            return Ok((0, None));
        }

        if depth == 0 {
            return Self::evaluate_leaves(board, player, &moves, Perspective::Maximizing);
        }

        if let Some(winning) = Self::immediate_win(board, player, &moves)? {
            return Ok((WIN_SCORE * depth as i64, Some(winning)));
        }

        let mut best_score = -INFINITY;
        let mut best_move = None;

        for (i, &action) in moves.iter().enumerate() {
            let child = board.apply_move(action, player)?;
            let (score, _) = self.search_min(&child, player.other(), depth - 1, alpha, beta)?;
            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(action);
            }

            alpha = alpha.max(best_score);
            if alpha >= beta {
                if i + 1 < moves.len() {
                    self.statistics.cutoffs += 1;
                }
                break;
            }
        }

        Ok((best_score, best_move))
    }

    /// Minimizing step: `player` is to move and wants the lowest score
    pub fn search_min(
        &mut self,
        board: &Board,
        player: Player,
        depth: usize,
        alpha: i64,
        mut beta: i64,
    ) -> Result<(i64, Option<Move>)> {
        self.statistics.nodes += 1;

        let moves = board.legal_moves();
        if moves.is_empty() {
            return Ok((0, None));
        }

        if depth == 0 {
            return Self::evaluate_leaves(board, player, &moves, Perspective::Minimizing);
        }

        if let Some(winning) = Self::immediate_win(board, player, &moves)? {
            return Ok((-WIN_SCORE * depth as i64, Some(winning)));
        }

        let mut best_score = INFINITY;
        let mut best_move = None;

        for (i, &action) in moves.iter().enumerate() {
            let child = board.apply_move(action, player)?;
            let (score, _) = self.search_max(&child, player.other(), depth - 1, alpha, beta)?;
            if best_move.is_none() || score < best_score {
                best_score = score;
                best_move = Some(action);
            }

            beta = beta.min(best_score);
            if alpha >= beta {
                if i + 1 < moves.len() {
                    self.statistics.cutoffs += 1;
                }
                break;
            }
        }

        Ok((best_score, best_move))
    }

    /// Returns the first legal move that wins on the spot for `player`
    fn immediate_win(board: &Board, player: Player, moves: &[Move]) -> Result<Option<Move>> {
        for &action in moves {
            if board.apply_move(action, player)?.is_win(player, action) {
                return Ok(Some(action));
            }
        }
        Ok(None)
    }

    /// Scores every move at the horizon and keeps the best one for `perspective`
    ///
    /// Ties keep the lowest column.
    fn evaluate_leaves(
        board: &Board,
        player: Player,
        moves: &[Move],
        perspective: Perspective,
    ) -> Result<(i64, Option<Move>)> {
        let mut best: Option<(i64, Move)> = None;

        for &action in moves {
            let child = board.apply_move(action, player)?;
            let score = heuristic::score(&child, player, perspective, action);

            let better = match (best, perspective) {
                (None, _) => true,
                (Some((current, _)), Perspective::Maximizing) => score > current,
                (Some((current, _)), Perspective::Minimizing) => score < current,
            };
            if better {
                best = Some((score, action));
            }
        }

        Ok(match best {
            Some((score, action)) => (score, Some(action)),
            None => (0, None),
        })
    }
}

impl Default for AlphaBeta {
    fn default() -> Self {
        Self::new(MinimaxConfig::default())
    }
}
