//! Self-play demo: alpha-beta minimax against MCTS
//!
//! Each seat keeps the state its generator returned on the previous turn,
//! which lets the MCTS seat carry its tree through the game.
//!
//! Run with `RUST_LOG=debug` to see search statistics for every move.

use std::time::Duration;

use connect4_search::{
    Board, MCTSConfig, MctsAgent, MinimaxAgent, MinimaxConfig, MoveGenerator, Outcome, Player,
    SavedState,
};

fn main() {
    // Initialize logging
    env_logger::init();

    println!("Connect Four: minimax (X) vs MCTS (O)");
    println!("=====================================");
    println!();

    let mut seats: [(&str, Box<dyn MoveGenerator>); 2] = [
        (
            "minimax",
            Box::new(MinimaxAgent::new(MinimaxConfig::default().with_depth(5))),
        ),
        (
            "MCTS",
            Box::new(MctsAgent::new(
                MCTSConfig::default().with_time_budget(Duration::from_millis(500)),
            )),
        ),
    ];
    let mut states = [SavedState::Absent, SavedState::Absent];

    let mut board = Board::new();
    let mut player = Player::One;
    let mut turn = 0;

    let outcome = loop {
        let seat = turn % 2;
        let (name, generator) = &mut seats[seat];
        let saved = std::mem::take(&mut states[seat]);

        let (action, state) = match generator.generate_move(&board, player, saved) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("{} failed to move: {}", name, e);
                return;
            }
        };
        states[seat] = state;

        board = match board.apply_move(action, player) {
            Ok(next) => next,
            Err(e) => {
                eprintln!("{} played an illegal move: {}", name, e);
                return;
            }
        };
        println!("{} plays column {}", name, action);
        println!("{}", board);
        println!();

        match board.outcome(player, action) {
            Outcome::InProgress => {
                player = player.other();
                turn += 1;
            }
            finished => break finished,
        }
    };

    match outcome {
        Outcome::Win(Player::One) => println!("Minimax wins!"),
        Outcome::Win(Player::Two) => println!("MCTS wins!"),
        _ => println!("It's a draw!"),
    }
}
