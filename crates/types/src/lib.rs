//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Visible height**: 18 rows
//! - **Invisible rows**: 3 rows above the visible area, where pieces spawn
//! - **Spawn position**: (3, 1) for every piece
//!
//! # Frame Timing
//!
//! The simulation is frame based: every timing value is a number of ticks of
//! `TICK_MS` milliseconds.
//!
//! | Constant | Ticks | Description |
//! |----------|-------|-------------|
//! | `MANUAL_DOWN_FRAMES` | 4 | Soft drop repeat interval |
//! | `LR_REPEAT_FRAMES` | 6 | Horizontal auto-repeat interval |
//! | `LR_FIRST_MOVE_FRAMES` | 15 | Delay before horizontal auto-repeat starts |
//! | `LINE_CLEAR_STEP_FRAMES` | 8 | Length of one line clear animation step |
//! | `LINE_CLEAR_STEPS` | 8 | Step at which marked rows are removed |
//!
//! # Examples
//!
//! ```
//! use jam_tetris_types::{PieceKind, Sound, SoundSet, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.style(), 6);
//!
//! let mut sounds = SoundSet::new();
//! sounds.insert(Sound::Rotation);
//! assert!(sounds.contains(Sound::Rotation));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Rows shown to the player
pub const VISIBLE_ROWS: usize = 18;

/// Rows hidden above the visible area
pub const INVISIBLE_ROWS: usize = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Soft drop repeat interval in ticks.
pub const MANUAL_DOWN_FRAMES: u32 = 4;

/// Horizontal auto-repeat interval in ticks.
pub const LR_REPEAT_FRAMES: u32 = 6;

/// Ticks a horizontal key must be held before auto-repeat starts.
pub const LR_FIRST_MOVE_FRAMES: u32 = 15;

/// Ticks per line clear animation step.
pub const LINE_CLEAR_STEP_FRAMES: u32 = 8;

/// Animation step at which the marked rows are physically removed.
pub const LINE_CLEAR_STEPS: u32 = 8;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// A cell on the game board: 0 when empty, otherwise the style of the piece
/// that filled it.
pub type Cell = u8;

/// Style of an empty cell. Must stay 0.
pub const EMPTY_STYLE: Cell = 0;

/// Style used while a completed row is breaking. Never written to the board.
pub const BREAK_STYLE: Cell = 8;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    J,
    L,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in random-draw order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Kind for a draw in `0..7`. Out-of-range values wrap.
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 7) as usize]
    }

    /// Board style id written when this kind locks (1..=7).
    pub fn style(&self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use jam_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Sound events emitted by the simulation.
///
/// The core never plays audio; callers route these to whatever audio backend
/// they have (or ignore them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Rotation,
    LeftRight,
    TouchGround,
    LinesVanishing,
    LinesFalling,
    MenuMove,
    MenuConfirm,
    Coin,
    Buy,
    Death,
    MenuReject,
    Rocket,
}

impl Sound {
    pub const ALL: [Sound; 12] = [
        Sound::Rotation,
        Sound::LeftRight,
        Sound::TouchGround,
        Sound::LinesVanishing,
        Sound::LinesFalling,
        Sound::MenuMove,
        Sound::MenuConfirm,
        Sound::Coin,
        Sound::Buy,
        Sound::Death,
        Sound::MenuReject,
        Sound::Rocket,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sound::Rotation => "rotation",
            Sound::LeftRight => "leftRight",
            Sound::TouchGround => "touchGround",
            Sound::LinesVanishing => "linesVanishing",
            Sound::LinesFalling => "linesFalling",
            Sound::MenuMove => "menuMove",
            Sound::MenuConfirm => "menuConfirm",
            Sound::Coin => "coin",
            Sound::Buy => "buy",
            Sound::Death => "death",
            Sound::MenuReject => "menuReject",
            Sound::Rocket => "rocket",
        }
    }
}

/// Set of sounds requested during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SoundSet(u16);

impl SoundSet {
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, sound: Sound) {
        self.0 |= sound.bit();
    }

    /// Insert `sound` when `cond` holds.
    pub fn insert_if(&mut self, sound: Sound, cond: bool) {
        if cond {
            self.insert(sound);
        }
    }

    pub fn contains(&self, sound: Sound) -> bool {
        self.0 & sound.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn extend(&mut self, other: SoundSet) {
        self.0 |= other.0;
    }

    pub fn iter(&self) -> impl Iterator<Item = Sound> + '_ {
        Sound::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

impl From<Sound> for SoundSet {
    fn from(sound: Sound) -> Self {
        let mut set = Self::new();
        set.insert(sound);
        set
    }
}

/// Input intents sampled once per frame.
///
/// `held_*` fields are level triggered (key currently down); the other fields
/// are edge triggered (key pressed since the previous frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub held_down: bool,
    pub held_left: bool,
    pub held_right: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
    /// Secondary rotation key (rotates right).
    pub rotate: bool,
    pub hold: bool,
}

impl FrameInput {
    /// Intents consumed by the play field.
    pub fn play(&self) -> PlayInput {
        PlayInput {
            move_down: self.held_down,
            move_left: self.held_left,
            move_right: self.held_right,
            rotate_left: self.up,
            rotate_right: self.rotate,
            hold: self.hold,
        }
    }

    /// Intents consumed by menus.
    pub fn menu(&self) -> MenuInput {
        MenuInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            confirm: self.confirm,
        }
    }
}

/// Play field intents for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayInput {
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub hold: bool,
}

/// Menu navigation events for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
}

impl MenuInput {
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Difficulty dimensions the player raises between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    GoalLines,
    Speed,
    HiddenLines,
    DeathLines,
}

impl Track {
    pub const ALL: [Track; 4] = [
        Track::GoalLines,
        Track::Speed,
        Track::HiddenLines,
        Track::DeathLines,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Track::GoalLines => "goalLines",
            Track::Speed => "speed",
            Track::HiddenLines => "hiddenLines",
            Track::DeathLines => "deathLines",
        }
    }
}

/// Permanent upgrades sold in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upgrade {
    Life,
    Hold,
    AutoDownReset,
    HideMove,
}

impl Upgrade {
    pub const ALL: [Upgrade; 4] = [
        Upgrade::Life,
        Upgrade::Hold,
        Upgrade::AutoDownReset,
        Upgrade::HideMove,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Upgrade::Life => "life",
            Upgrade::Hold => "hold",
            Upgrade::AutoDownReset => "autoDownReset",
            Upgrade::HideMove => "hideMove",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_styles_are_distinct_and_avoid_reserved_values() {
        let mut seen = Vec::new();
        for kind in PieceKind::ALL {
            let style = kind.style();
            assert_ne!(style, EMPTY_STYLE);
            assert_ne!(style, BREAK_STYLE);
            assert!(!seen.contains(&style), "duplicate style {}", style);
            seen.push(style);
        }
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(PieceKind::from_index(0), PieceKind::I);
        assert_eq!(PieceKind::from_index(6), PieceKind::Z);
        assert_eq!(PieceKind::from_index(7), PieceKind::I);
    }

    #[test]
    fn sound_set_tracks_members() {
        let mut set = SoundSet::new();
        assert!(set.is_empty());

        set.insert(Sound::Coin);
        set.insert_if(Sound::Buy, false);
        set.insert_if(Sound::Death, true);

        assert!(set.contains(Sound::Coin));
        assert!(!set.contains(Sound::Buy));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Sound::Coin, Sound::Death]);

        let mut other = SoundSet::from(Sound::Rocket);
        other.extend(set);
        assert!(other.contains(Sound::Rocket));
        assert!(other.contains(Sound::Coin));
    }

    #[test]
    fn frame_input_routes_keys() {
        let input = FrameInput {
            held_left: true,
            up: true,
            rotate: true,
            confirm: true,
            ..Default::default()
        };

        let play = input.play();
        assert!(play.move_left);
        assert!(play.rotate_left);
        assert!(play.rotate_right);
        assert!(!play.move_down);

        let menu = input.menu();
        assert!(menu.up);
        assert!(menu.confirm);
        assert!(!menu.left);
        assert!(menu.any_direction());
    }
}
