//! Terminal rendering for the game.
//!
//! A small game-oriented rendering layer: a [`GameView`] paints a
//! [`core::GameSnapshot`] into a [`FrameBuffer`], and the
//! [`TerminalRenderer`] flushes only what changed since the previous frame.
//!
//! Board cells are drawn 2 columns wide to compensate for the glyph aspect
//! ratio of most terminals.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use jam_tetris_core as core;
pub use jam_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
