//! Jam Tetris (workspace facade crate).
//!
//! Re-exports the member crates under short names
//! (`jam_tetris::{core,input,term,types}`) and hosts the runner
//! [`settings`].

pub mod settings;

pub use jam_tetris_core as core;
pub use jam_tetris_input as input;
pub use jam_tetris_term as term;
pub use jam_tetris_types as types;
