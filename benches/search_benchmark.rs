#[macro_use]
extern crate criterion;

use connect4_search::{
    board::{Board, Move, Player},
    config::MinimaxConfig,
    minimax::AlphaBeta,
    MCTSConfig, MCTS,
};
use criterion::{black_box, BenchmarkId, Criterion};
use std::time::Duration;

// A mid-game position with pieces in every column
fn midgame() -> Board {
    Board::from_moves(&[3, 3, 2, 4, 4, 2, 5, 1, 0, 6, 3, 3]).expect("valid opening")
}

fn bench_rules(c: &mut Criterion) {
    let board = midgame();

    c.bench_function("is_win", |b| {
        b.iter(|| {
            for column in 0..7 {
                black_box(board.is_win(Player::One, black_box(Move::new(column))));
            }
        })
    });

    c.bench_function("count_partial_runs", |b| {
        b.iter(|| black_box(board.count_partial_runs(Player::One, Move::new(3), black_box(2))))
    });
}

fn bench_alpha_beta(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_beta");
    let board = midgame();

    for depth in [3, 5, 7] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut searcher = AlphaBeta::new(MinimaxConfig::default().with_depth(depth));
                black_box(searcher.search(&board, Player::One))
            })
        });
    }

    group.finish();
}

fn bench_mcts_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search");
    group.measurement_time(Duration::from_secs(10));

    for &iter_count in &[100, 1000, 5000] {
        let config = MCTSConfig::default()
            .with_max_iterations(iter_count)
            .with_seed(1);

        group.bench_with_input(
            BenchmarkId::new("iterations", iter_count),
            &iter_count,
            |b, &_| {
                b.iter(|| {
                    let mut mcts = MCTS::new(Board::new(), Player::One, config.clone());
                    black_box(mcts.search())
                })
            },
        );
    }

    // Sequential searches on one driver, relocating the root after each move
    group.bench_function("sequential_searches_with_reuse", |b| {
        let config = MCTSConfig::default().with_max_iterations(500).with_seed(2);
        b.iter(|| {
            let mut mcts = MCTS::new(Board::new(), Player::One, config.clone());
            for _ in 0..5 {
                let Ok(action) = mcts.search() else { break };
                if !mcts.advance(action) {
                    break;
                }
            }
            black_box(mcts.tree().len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_rules, bench_alpha_beta, bench_mcts_search);
criterion_main!(benches);
