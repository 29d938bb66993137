use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use plus2048_core::{is_terminal, resolve_move, spawn_tile, Board, Direction, Session};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut boards = Vec::new();
    // Empty and two-tile starts
    boards.push(Board::empty(4));
    let mut board = Board::empty(4);
    spawn_tile(&mut board, &mut rng);
    spawn_tile(&mut board, &mut rng);
    boards.push(board.clone());
    // Derive a variety of densities deterministically
    let seq = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];
    for i in 0..20 {
        let result = resolve_move(&board, seq[i % seq.len()]);
        if result.moved {
            board = result.board;
            spawn_tile(&mut board, &mut rng);
        }
        boards.push(board.clone());
    }
    boards
}

fn bench_resolve(c: &mut Criterion) {
    for (name, direction) in [
        ("resolve/left", Direction::Left),
        ("resolve/right", Direction::Right),
        ("resolve/up", Direction::Up),
        ("resolve/down", Direction::Down),
    ] {
        c.bench_function(name, |bch| {
            let boards = corpus();
            bch.iter(|| {
                let mut acc = 0u64;
                for board in &boards {
                    let result = resolve_move(board, direction);
                    acc ^= result.score_gained as u64 ^ result.moved as u64;
                }
                black_box(acc)
            })
        });
    }
}

fn bench_spawn(c: &mut Criterion) {
    c.bench_function("spawn/fill_board", |bch| {
        bch.iter_batched(
            || (Board::empty(4), SmallRng::seed_from_u64(7)),
            |(mut board, mut rng)| {
                for _ in 0..16 {
                    spawn_tile(&mut board, &mut rng);
                }
                black_box(board)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_queries(c: &mut Criterion) {
    c.bench_function("query/is_terminal", |bch| {
        let boards = corpus();
        bch.iter(|| {
            let mut acc = 0u64;
            for board in &boards {
                acc ^= is_terminal(board) as u64;
            }
            black_box(acc)
        })
    });
    c.bench_function("query/count_empty", |bch| {
        let boards = corpus();
        bch.iter(|| {
            let mut acc = 0u64;
            for board in &boards {
                acc ^= board.count_empty() as u64;
            }
            black_box(acc)
        })
    });
}

fn bench_session(c: &mut Criterion) {
    c.bench_function("session/move_undo_cycle", |bch| {
        bch.iter_batched(
            || Session::new(4, 9).unwrap(),
            |mut session| {
                let seq = [
                    Direction::Left,
                    Direction::Up,
                    Direction::Right,
                    Direction::Down,
                ];
                for (i, &direction) in seq.iter().cycle().take(32).enumerate() {
                    if session.apply_move(direction).is_some() {
                        session.finish_animation();
                        if i % 4 == 0 {
                            session.undo();
                        }
                    }
                }
                black_box(session.score())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(move_ops, bench_resolve, bench_spawn, bench_queries, bench_session);
criterion_main!(move_ops);
