use jam_tetris::core::{Game, GameConfig, GameState, SequenceRng};
use jam_tetris::term::{encode_diff_into, FrameBuffer, GameView, Viewport};
use jam_tetris::types::FrameInput;

fn confirm() -> FrameInput {
    FrameInput {
        confirm: true,
        ..FrameInput::default()
    }
}

#[test]
fn term_view_follows_game_states() {
    let mut game = Game::new(GameConfig::default(), SequenceRng::new(vec![2]));
    let view = GameView::default();
    let vp = Viewport::new(60, 24);

    let fb = view.render(&game.snapshot(), vp);
    assert!(fb.contains_text("CONTROLS"));

    game.tick(&confirm());
    let fb = view.render(&game.snapshot(), vp);
    assert!(fb.contains_text("> PLAY <"));

    game.tick(&confirm());
    assert_eq!(game.state(), GameState::Play);
    let fb = view.render(&game.snapshot(), vp);
    assert!(fb.contains_text("SCORE"));
    assert!(fb.contains_text("NEXT"));
    assert!(fb.contains_text("1/11"));
}

#[test]
fn term_view_renders_well_border() {
    let game = Game::with_seed(1);
    let mut snap = game.snapshot();
    snap.state = GameState::Play;
    let view = GameView::default();

    // Board 10x18 at 2x1 plus border is 22x20; the side panel is 16 wide with a
    // 2 column gap.
    let fb = view.render(&snap, Viewport::new(40, 20));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 19).unwrap().ch, '└');
    assert_eq!(fb.get(21, 19).unwrap().ch, '┘');
}

#[test]
fn term_view_frame_diff_is_empty_when_nothing_moves() {
    let mut game = Game::with_seed(5);
    game.tick(&confirm());
    let view = GameView::default();
    let vp = Viewport::new(60, 24);

    let mut a = FrameBuffer::new(0, 0);
    let mut b = FrameBuffer::new(0, 0);
    view.render_into(&game.snapshot(), vp, &mut a);
    view.render_into(&game.snapshot(), vp, &mut b);
    assert_eq!(a, b);

    let mut same = Vec::new();
    encode_diff_into(&a, &b, &mut same).unwrap();

    // Moving the title selection changes only a few runs.
    let down = FrameInput {
        down: true,
        ..FrameInput::default()
    };
    game.tick(&down);
    view.render_into(&game.snapshot(), vp, &mut b);
    let mut changed = Vec::new();
    encode_diff_into(&a, &b, &mut changed).unwrap();
    assert!(changed.len() > same.len());
}
