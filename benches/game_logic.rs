use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gameboy_tetris::core::{base_shape, draw_into, Board, DrawList, GameState};
use gameboy_tetris::types::{ColorId, Command, PieceKind};

fn started(seed: u32) -> GameState {
    let mut state = GameState::new(seed);
    state.apply(Command::Start);
    state
}

fn bench_tick(c: &mut Criterion) {
    let mut state = started(12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if !state.is_running() {
                state.apply(Command::Restart);
                state.apply(Command::Start);
            }
            state.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(ColorId(1)));
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = Board::new();
    let shape = base_shape(PieceKind::T);

    c.bench_function("collides", |b| {
        b.iter(|| board.collides(black_box(&shape), black_box(3), black_box(10)))
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = started(12345);
    let mut right = true;

    c.bench_function("try_move", |b| {
        b.iter(|| {
            let command = if right { Command::MoveRight } else { Command::MoveLeft };
            if !state.apply(command) {
                right = !right;
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut state = started(12345);

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            state.apply(black_box(Command::Rotate));
        })
    });
}

fn bench_draw_list(c: &mut Criterion) {
    let mut state = started(12345);
    for _ in 0..6 {
        state.apply(Command::HardDrop);
    }
    let snapshot = state.snapshot();
    let mut ops = DrawList::with_capacity(256);

    c.bench_function("draw_into", |b| {
        b.iter(|| {
            draw_into(black_box(&snapshot), &mut ops);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_collides,
    bench_try_move,
    bench_try_rotate,
    bench_draw_list
);
criterion_main!(benches);
