//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework. It maps `crossterm` key
//! events into game [`Key`]s and samples them once per frame into a
//! [`FrameInput`](types::FrameInput), including terminals without key-release
//! events.

pub mod handler;
pub mod map;

pub use jam_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, map_key, should_quit, Key, KeyLayout};
