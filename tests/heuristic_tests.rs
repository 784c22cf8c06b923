use connect4_search::{
    board::{Board, Move, Player},
    heuristic::{score, Perspective, THREE_WEIGHT, TWO_WEIGHT, WIN_SCORE},
};

#[test]
fn test_winning_move_scores_extreme() {
    let board = Board::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();

    assert_eq!(score(&board, Player::One, Perspective::Maximizing, Move::new(0)), WIN_SCORE);
    assert_eq!(score(&board, Player::One, Perspective::Minimizing, Move::new(0)), -WIN_SCORE);
}

#[test]
fn test_open_three_and_two_are_weighted() {
    // X X X in the bottom row, the last piece in column 2
    let board = Board::from_moves(&[0, 0, 1, 1, 2]).unwrap();

    let expected = THREE_WEIGHT + TWO_WEIGHT;
    assert_eq!(score(&board, Player::One, Perspective::Maximizing, Move::new(2)), expected);
    assert_eq!(score(&board, Player::One, Perspective::Minimizing, Move::new(2)), -expected);
}

#[test]
fn test_three_outweighs_two() {
    assert!(THREE_WEIGHT > TWO_WEIGHT);
    assert!(TWO_WEIGHT > 0);
    assert!(WIN_SCORE > THREE_WEIGHT * 16);
}

#[test]
fn test_lone_piece_scores_zero() {
    let board = Board::from_moves(&[3]).unwrap();
    assert_eq!(score(&board, Player::One, Perspective::Maximizing, Move::new(3)), 0);
}

#[test]
fn test_blocked_lines_score_zero() {
    // X X X O in the bottom row
    let board = Board::from_moves(&[0, 3, 1, 0, 2]).unwrap();
    assert_eq!(board.get(0, 3), Some(Player::Two));

    let value = score(&board, Player::One, Perspective::Maximizing, Move::new(2));
    // Only the vertical and diagonal windows through column 2 stay open, each with one piece
    assert_eq!(value, 0);
}
