//! Frame input sampler for terminal environments.
//!
//! Collects key presses and releases between two frames and turns them into
//! one [`FrameInput`]: held state for down/left/right, edge flags for
//! everything else. Supports terminals that do not emit key release events by
//! using a timeout.

use std::time::{Duration, Instant};

use crate::map::Key;
use crate::types::FrameInput;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// A key that stays down until released or timed out.
#[derive(Debug, Clone, Copy)]
struct Held {
    down: bool,
    last_seen: Instant,
}

impl Held {
    fn new(now: Instant) -> Self {
        Self {
            down: false,
            last_seen: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputHandler {
    down: Held,
    left: Held,
    right: Held,
    pressed: FrameInput,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            down: Held::new(now),
            left: Held::new(now),
            right: Held::new(now),
            pressed: FrameInput::default(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Record a key press (or terminal auto-repeat).
    pub fn handle_key_press(&mut self, key: Key) {
        self.handle_key_press_at(key, Instant::now());
    }

    pub fn handle_key_press_at(&mut self, key: Key, now: Instant) {
        match key {
            Key::Up => self.pressed.up = true,
            Key::Down => {
                self.pressed.down = true;
                self.down = Held {
                    down: true,
                    last_seen: now,
                };
            }
            Key::Left => {
                self.pressed.left = true;
                self.left = Held {
                    down: true,
                    last_seen: now,
                };
            }
            Key::Right => {
                self.pressed.right = true;
                self.right = Held {
                    down: true,
                    last_seen: now,
                };
            }
            Key::Confirm => self.pressed.confirm = true,
            Key::Rotate => self.pressed.rotate = true,
            Key::Hold => self.pressed.hold = true,
        }
    }

    /// Terminal auto-repeat: keeps a held key alive without a new edge.
    pub fn handle_key_repeat_at(&mut self, key: Key, now: Instant) {
        match key {
            Key::Down => self.down.last_seen = now,
            Key::Left => self.left.last_seen = now,
            Key::Right => self.right.last_seen = now,
            _ => {}
        }
    }

    pub fn handle_key_release(&mut self, key: Key) {
        match key {
            Key::Down => self.down.down = false,
            Key::Left => self.left.down = false,
            Key::Right => self.right.down = false,
            _ => {}
        }
    }

    /// Input for the next frame. Clears the edge flags.
    pub fn frame(&mut self) -> FrameInput {
        self.frame_at(Instant::now())
    }

    pub fn frame_at(&mut self, now: Instant) -> FrameInput {
        // Auto-release when terminal does not emit release events.
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        for held in [&mut self.down, &mut self.left, &mut self.right] {
            if held.down && now.saturating_duration_since(held.last_seen) > timeout {
                held.down = false;
            }
        }

        let mut input = std::mem::take(&mut self.pressed);
        input.held_down = self.down.down;
        input.held_left = self.left.down;
        input.held_right = self.right.down;
        input
    }

    pub fn reset(&mut self) {
        *self = Self::new().with_key_release_timeout_ms(self.key_release_timeout_ms);
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_edge_once_and_held_until_release() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        let t0 = Instant::now();

        ih.handle_key_press_at(Key::Left, t0);
        let f = ih.frame_at(t0);
        assert!(f.left);
        assert!(f.held_left);

        let f = ih.frame_at(t0);
        assert!(!f.left, "edge flags last one frame");
        assert!(f.held_left);

        ih.handle_key_release(Key::Left);
        let f = ih.frame_at(t0);
        assert!(!f.held_left);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);
        let t0 = Instant::now();

        ih.handle_key_press_at(Key::Down, t0);
        assert!(ih.frame_at(t0 + Duration::from_millis(50)).held_down);
        assert!(!ih.frame_at(t0 + Duration::from_millis(51)).held_down);
    }

    #[test]
    fn test_repeat_keeps_key_held_without_edge() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);
        let t0 = Instant::now();

        ih.handle_key_press_at(Key::Right, t0);
        ih.frame_at(t0);
        ih.handle_key_repeat_at(Key::Right, t0 + Duration::from_millis(40));
        let f = ih.frame_at(t0 + Duration::from_millis(80));
        assert!(f.held_right);
        assert!(!f.right);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);
        let t0 = Instant::now();

        ih.handle_key_press_at(Key::Left, t0);
        ih.handle_key_press_at(Key::Up, t0 + Duration::from_millis(40));
        let f = ih.frame_at(t0 + Duration::from_millis(60));
        assert!(f.up);
        assert!(!f.held_left);
    }

    #[test]
    fn test_menu_keys_are_edges_only() {
        let mut ih = InputHandler::new();
        ih.handle_key_press(Key::Confirm);
        ih.handle_key_press(Key::Rotate);
        ih.handle_key_press(Key::Hold);
        let f = ih.frame();
        assert!(f.confirm && f.rotate && f.hold);
        assert_eq!(ih.frame(), FrameInput::default());
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        let ih = InputHandler::new();
        assert!(ih.key_release_timeout_ms() > 0);
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        ih.handle_key_press(Key::Left);
        ih.handle_key_press(Key::Down);
        ih.reset();
        assert_eq!(ih.frame(), FrameInput::default());
        assert_eq!(ih.key_release_timeout_ms(), 10_000);
    }
}
