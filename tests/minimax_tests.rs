use connect4_search::{
    board::{Board, Move, Player, COLS, ROWS},
    config::MinimaxConfig,
    heuristic::{self, Perspective, WIN_SCORE},
    minimax::{AlphaBeta, INFINITY},
    SearchError,
};

// Full-width minimax with the same leaf and immediate-win rules, no pruning
fn reference_max(board: &Board, player: Player, depth: usize) -> i64 {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return 0;
    }

    let children: Vec<(Move, Board)> = moves
        .iter()
        .map(|&m| (m, board.apply_move(m, player).unwrap()))
        .collect();

    if depth == 0 {
        return children
            .iter()
            .map(|(m, child)| heuristic::score(child, player, Perspective::Maximizing, *m))
            .max()
            .unwrap();
    }
    if children.iter().any(|(m, child)| child.is_win(player, *m)) {
        return WIN_SCORE * depth as i64;
    }

    children
        .iter()
        .map(|(_, child)| reference_min(child, player.other(), depth - 1))
        .max()
        .unwrap()
}

fn reference_min(board: &Board, player: Player, depth: usize) -> i64 {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return 0;
    }

    let children: Vec<(Move, Board)> = moves
        .iter()
        .map(|&m| (m, board.apply_move(m, player).unwrap()))
        .collect();

    if depth == 0 {
        return children
            .iter()
            .map(|(m, child)| heuristic::score(child, player, Perspective::Minimizing, *m))
            .min()
            .unwrap();
    }
    if children.iter().any(|(m, child)| child.is_win(player, *m)) {
        return -WIN_SCORE * depth as i64;
    }

    children
        .iter()
        .map(|(_, child)| reference_max(child, player.other(), depth - 1))
        .min()
        .unwrap()
}

fn searcher(depth: usize) -> AlphaBeta {
    AlphaBeta::new(MinimaxConfig::default().with_depth(depth))
}

fn full_board() -> Board {
    let mut text = String::from("|=============|\n");
    for row in (0..ROWS).rev() {
        let cells: Vec<String> = (0..COLS)
            .map(|col| if (row / 2 + col) % 2 == 0 { "X" } else { "O" }.to_string())
            .collect();
        text.push_str(&format!("|{}|\n", cells.join(" ")));
    }
    text.push_str("|=============|\n|0 1 2 3 4 5 6|");
    text.parse().unwrap()
}

#[test]
fn test_immediate_win_scores_by_depth() {
    // Player One has three pieces stacked in column 0
    let board = Board::from_moves(&[0, 1, 0, 1, 0, 2]).unwrap();

    for depth in 1..=4 {
        let mut ab = searcher(depth);
        let (score, best) = ab.search(&board, Player::One).unwrap();
        assert_eq!(best, Move::new(0), "depth {}", depth);
        assert_eq!(score, WIN_SCORE * depth as i64, "depth {}", depth);
    }
}

#[test]
fn test_minimizer_takes_immediate_win() {
    // Player Two has three pieces stacked in column 1 and is to move
    let board = Board::from_moves(&[0, 1, 0, 1, 2, 1, 6]).unwrap();

    let mut ab = searcher(3);
    let (score, best) = ab.search_min(&board, Player::Two, 3, -INFINITY, INFINITY).unwrap();
    assert_eq!(best, Some(Move::new(1)));
    assert_eq!(score, -WIN_SCORE * 3);
}

#[test]
fn test_blocks_opponent_threat() {
    // Player Two threatens to complete column 0; Player One is to move
    let board = Board::from_moves(&[1, 0, 2, 0, 6, 0]).unwrap();

    for depth in 2..=4 {
        let mut ab = searcher(depth);
        let (_, best) = ab.search(&board, Player::One).unwrap();
        assert_eq!(best, Move::new(0), "depth {}", depth);
    }
}

#[test]
fn test_leaf_ties_resolve_to_lowest_column() {
    let mut ab = searcher(0);
    let (score, best) = ab.search(&Board::new(), Player::One).unwrap();
    assert_eq!(score, 0);
    assert_eq!(best, Move::new(0));
}

#[test]
fn test_plays_the_only_open_column() {
    let full = full_board();
    for col in 0..COLS {
        // Reopen the top cell of one column by rebuilding the board without it
        let mut text = full.to_string();
        let top_line_start = "|=============|\n".len();
        let offset = top_line_start + 1 + 2 * col;
        text.replace_range(offset..offset + 1, " ");
        let board: Board = text.parse().unwrap();

        let mut ab = searcher(3);
        let (_, best) = ab.search(&board, Player::One).unwrap();
        assert_eq!(best, Move::new(col));
    }
}

#[test]
fn test_full_board_is_a_draw_without_move() {
    let board = full_board();
    let mut ab = searcher(3);

    assert_eq!(ab.search_max(&board, Player::One, 3, -INFINITY, INFINITY).unwrap(), (0, None));
    assert_eq!(ab.search_min(&board, Player::Two, 3, -INFINITY, INFINITY).unwrap(), (0, None));
    assert_eq!(ab.search(&board, Player::One), Err(SearchError::NoLegalMoves));
}

#[test]
fn test_pruning_matches_full_width_minimax() {
    let openings: [&[usize]; 6] = [
        &[],
        &[3, 3, 4],
        &[3, 2, 4, 4, 5],
        &[0, 1, 2, 3, 4, 5, 6, 0, 1],
        &[3, 3, 3, 4, 2, 2, 4, 1],
        &[6, 5, 5, 4, 4, 3, 4, 3, 3],
    ];

    for opening in openings {
        let board = Board::from_moves(opening).unwrap();
        let to_move = if opening.len() % 2 == 0 { Player::One } else { Player::Two };

        for depth in 0..=3 {
            let mut ab = searcher(depth);
            let (score, best) = ab
                .search_max(&board, to_move, depth, -INFINITY, INFINITY)
                .unwrap();
            assert_eq!(
                score,
                reference_max(&board, to_move, depth),
                "{:?} at depth {}",
                opening,
                depth
            );
            assert!(best.map_or(false, |m| board.is_legal(m)));

            let (score, _) = ab
                .search_min(&board, to_move, depth, -INFINITY, INFINITY)
                .unwrap();
            assert_eq!(
                score,
                reference_min(&board, to_move, depth),
                "{:?} at depth {}",
                opening,
                depth
            );
        }
    }
}

#[test]
fn test_statistics_are_collected() {
    let board = Board::from_moves(&[3, 3, 4]).unwrap();
    let mut ab = searcher(4);
    ab.search(&board, Player::Two).unwrap();

    let stats = ab.get_statistics();
    assert!(stats.nodes > 1);
    assert!(stats.summary().contains("nodes"));
}
