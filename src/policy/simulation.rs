//! Simulation policies for the MCTS algorithm
//!
//! Simulation policies play a game out from a given position to estimate
//! who is likely to win from it.

use rand::{seq::SliceRandom, RngCore};

use crate::{
    board::{Board, Player},
    Result,
};

/// Trait for policies that simulate games
pub trait SimulationPolicy {
    /// Plays from `board` with `to_move` moving first until the game ends
    ///
    /// Returns the winner, or `None` if the board filled up without one.
    fn simulate(
        &self,
        board: &Board,
        to_move: Player,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Player>>;
}

/// Random simulation policy
///
/// This policy plays uniformly random legal moves until someone connects
/// four or the board is full.
#[derive(Debug, Clone)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationPolicy for RandomPolicy {
    fn simulate(
        &self,
        board: &Board,
        to_move: Player,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Player>> {
        let mut board = *board;
        let mut player = to_move;

        loop {
            let moves = board.legal_moves();
            let Some(&action) = moves.choose(&mut *rng) else {
                return Ok(None);
            };

            board = board.apply_move(action, player)?;
            if board.is_win(player, action) {
                return Ok(Some(player));
            }
            player = player.other();
        }
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl SimulationPolicy for Box<dyn SimulationPolicy> {
    fn simulate(
        &self,
        board: &Board,
        to_move: Player,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Player>> {
        (**self).simulate(board, to_move, rng)
    }
}
