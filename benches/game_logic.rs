use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jam_tetris::core::{
    Board, Game, GameConfig, GameSnapshot, Round, RoundParams, SimpleRng,
};
use jam_tetris::term::{FrameBuffer, GameView, Viewport};
use jam_tetris::types::{FrameInput, PlayInput};

fn playing_game() -> Game {
    let mut game = Game::with_seed(12345);
    let confirm = FrameInput {
        confirm: true,
        ..FrameInput::default()
    };
    game.tick(&confirm);
    game.tick(&confirm);
    game
}

fn bench_round_update(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut rng = SimpleRng::new(12345);
    let mut round = Round::new(&config, &mut rng);
    round.init(0, RoundParams::default(), &mut rng);
    let input = PlayInput {
        move_down: true,
        ..PlayInput::default()
    };

    c.bench_function("round_update_soft_drop", |b| {
        b.iter(|| {
            let out = round.update(black_box(input), 0, &mut rng);
            if out.dead {
                round.init(0, RoundParams::default(), &mut rng);
            }
        })
    });
}

fn bench_game_tick(c: &mut Criterion) {
    let mut game = playing_game();
    let idle = FrameInput::default();

    c.bench_function("game_tick_idle", |b| {
        b.iter(|| {
            game.tick(black_box(&idle));
        })
    });
}

fn bench_remove_rows(c: &mut Criterion) {
    c.bench_function("remove_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new(10, 21);
            for y in 17..21 {
                for x in 0..10 {
                    board.set(x, y, 1);
                }
            }
            let rows = board.full_rows_in(17, 20);
            board.remove_rows(black_box(&rows));
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let game = playing_game();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            game.snapshot_into(black_box(&mut snap));
        })
    });
}

fn bench_render_into(c: &mut Criterion) {
    let game = playing_game();
    let snap = game.snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_into_80x24", |b| {
        b.iter(|| {
            view.render_into(black_box(&snap), Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_round_update,
    bench_game_tick,
    bench_remove_rows,
    bench_snapshot_into,
    bench_render_into
);
criterion_main!(benches);
