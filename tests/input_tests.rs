//! Keyboard sampling tests: key events in, frame input out.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jam_tetris::input::{handle_key_event, InputHandler, Key, KeyLayout};
use jam_tetris::types::{FrameInput, PlayInput};

fn press(ih: &mut InputHandler, layout: KeyLayout, code: KeyCode, now: Instant) {
    if let Some(key) = handle_key_event(layout, KeyEvent::new(code, KeyModifiers::NONE)) {
        ih.handle_key_press_at(key, now);
    }
}

#[test]
fn test_held_arrow_becomes_play_movement() {
    let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
    let t0 = Instant::now();
    press(&mut ih, KeyLayout::Arrows, KeyCode::Left, t0);
    press(&mut ih, KeyLayout::Arrows, KeyCode::Down, t0);

    let play = ih.frame_at(t0).play();
    assert_eq!(
        play,
        PlayInput {
            move_down: true,
            move_left: true,
            ..PlayInput::default()
        }
    );

    // Still held on later frames, but the menu edge is gone.
    let frame = ih.frame_at(t0 + Duration::from_millis(16));
    assert!(frame.play().move_left);
    assert!(!frame.menu().left);
}

#[test]
fn test_rotation_keys_per_layout() {
    let t0 = Instant::now();

    let mut ih = InputHandler::new();
    press(&mut ih, KeyLayout::Arrows, KeyCode::Up, t0);
    press(&mut ih, KeyLayout::Arrows, KeyCode::Char('x'), t0);
    let play = ih.frame_at(t0).play();
    assert!(play.rotate_left);
    assert!(play.rotate_right);

    let mut ih = InputHandler::new();
    press(&mut ih, KeyLayout::Wasd, KeyCode::Char('w'), t0);
    press(&mut ih, KeyLayout::Wasd, KeyCode::Char('e'), t0);
    press(&mut ih, KeyLayout::Wasd, KeyCode::Char(' '), t0);
    let play = ih.frame_at(t0).play();
    assert!(play.rotate_left && play.rotate_right && play.hold);
}

#[test]
fn test_menu_confirm_is_a_single_frame_edge() {
    let mut ih = InputHandler::new();
    let t0 = Instant::now();
    press(&mut ih, KeyLayout::Wasd, KeyCode::Char('f'), t0);

    assert!(ih.frame_at(t0).menu().confirm);
    assert_eq!(ih.frame_at(t0), FrameInput::default());
}

#[test]
fn test_release_event_stops_movement() {
    let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
    let t0 = Instant::now();
    ih.handle_key_press_at(Key::Right, t0);
    assert!(ih.frame_at(t0).held_right);

    ih.handle_key_release(Key::Right);
    assert!(!ih.frame_at(t0).held_right);
}
