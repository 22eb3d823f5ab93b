//! Key mapping from terminal events to game keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Logical keys the game listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    /// Secondary rotation (clockwise).
    Rotate,
    Hold,
}

/// Physical key layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyLayout {
    /// Arrow keys (plus vim keys), Enter, `x` to rotate, Space to hold.
    #[default]
    Arrows,
    /// `wasd`, Enter, `e` to rotate, Space to hold.
    Wasd,
}

impl KeyLayout {
    /// Parse a layout name (case-insensitive). `default` means arrows.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" | "arrows" => Some(KeyLayout::Arrows),
            "wasd" => Some(KeyLayout::Wasd),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyLayout::Arrows => "arrows",
            KeyLayout::Wasd => "wasd",
        }
    }
}

/// Map a key code to a game key for `layout`.
pub fn map_key(layout: KeyLayout, code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Enter => return Some(Key::Confirm),
        KeyCode::Char(' ') => return Some(Key::Hold),
        KeyCode::Up => return Some(Key::Up),
        KeyCode::Down => return Some(Key::Down),
        KeyCode::Left => return Some(Key::Left),
        KeyCode::Right => return Some(Key::Right),
        _ => {}
    }

    let KeyCode::Char(ch) = code else {
        return None;
    };
    let ch = ch.to_ascii_lowercase();
    match layout {
        KeyLayout::Arrows => match ch {
            'k' => Some(Key::Up),
            'j' => Some(Key::Down),
            'h' => Some(Key::Left),
            'l' => Some(Key::Right),
            'x' => Some(Key::Rotate),
            'c' => Some(Key::Hold),
            _ => None,
        },
        KeyLayout::Wasd => match ch {
            'w' => Some(Key::Up),
            's' => Some(Key::Down),
            'a' => Some(Key::Left),
            'd' => Some(Key::Right),
            'e' => Some(Key::Rotate),
            'f' => Some(Key::Confirm),
            _ => None,
        },
    }
}

/// Map a full key event, ignoring anything with Ctrl/Alt held.
pub fn handle_key_event(layout: KeyLayout, key: KeyEvent) -> Option<Key> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    map_key(layout, key.code)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
