//! Positional heuristic used at the leaves of the minimax search

use crate::board::{Board, Move, Player};

/// Score of a won position
pub const WIN_SCORE: i64 = 1_000_000;

/// Weight of an open three (three pieces and one empty cell in a window)
pub const THREE_WEIGHT: i64 = 100;

/// Weight of an open two (two pieces and two empty cells in a window)
pub const TWO_WEIGHT: i64 = 10;

/// Which side of the minimax search a score is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    /// Scores are reported as-is
    Maximizing,
    /// Scores are negated
    Minimizing,
}

impl Perspective {
    /// Returns +1 for the maximizer and -1 for the minimizer
    pub fn sign(self) -> i64 {
        match self {
            Perspective::Maximizing => 1,
            Perspective::Minimizing => -1,
        }
    }
}

/// Scores `board` for the player who just played `last_move`
///
/// A winning move scores `WIN_SCORE`. Otherwise open threes and open twos
/// through the played piece are weighted so that a single three outweighs
/// any realistic number of twos. The result is signed by `perspective`.
pub fn score(board: &Board, player: Player, perspective: Perspective, last_move: Move) -> i64 {
    if board.is_win(player, last_move) {
        return WIN_SCORE * perspective.sign();
    }

    let threes = board.count_partial_runs(player, last_move, 3) as i64;
    let twos = board.count_partial_runs(player, last_move, 2) as i64;

    (threes * THREE_WEIGHT + twos * TWO_WEIGHT) * perspective.sign()
}
