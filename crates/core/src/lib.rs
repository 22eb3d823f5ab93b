//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on rendering, input devices, audio or I/O:
//! frontends feed a [`FrameInput`](types::FrameInput) per frame and get back
//! a [`SoundSet`](types::SoundSet) plus a [`GameSnapshot`] to draw.
//!
//! # Module Structure
//!
//! - [`config`]: immutable configuration (board size, timings, tables, prices)
//! - [`pieces`]: tetromino masks, one 4x4 grid per rotation state
//! - [`board`]: flat grid with collision checks and row removal
//! - [`round`]: falling piece, gravity, soft drop, locking and line clears
//! - [`balancing`]: difficulty tracks chosen between rounds
//! - [`shop`]: upgrades bought with coins
//! - [`money`]: score to coin conversion with flying coin animations
//! - [`fog`]: rows hidden at the bottom of the play area
//! - [`game`]: top-level state machine tying everything together
//! - [`rng`]: injectable random sources
//! - [`snapshot`]: read-only frame data for renderers
//!
//! # Example
//!
//! ```
//! use jam_tetris_core::{Game, GameState};
//! use jam_tetris_core::types::FrameInput;
//!
//! let mut game = Game::with_seed(12345);
//! let confirm = FrameInput { confirm: true, ..FrameInput::default() };
//!
//! game.tick(&confirm); // controls -> title
//! game.tick(&confirm); // title -> play
//! assert_eq!(game.state(), GameState::Play);
//!
//! let idle = FrameInput::default();
//! for _ in 0..60 {
//!     game.tick(&idle);
//! }
//! assert!(game.round().active().y > 1);
//! ```
//!
//! # Timing
//!
//! The game is frame based: call [`Game::tick`] once every
//! [`TICK_MS`](types::TICK_MS) milliseconds.

pub mod balancing;
pub mod board;
pub mod config;
pub mod fog;
pub mod game;
pub mod money;
pub mod pieces;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod shop;
pub mod snapshot;

pub use jam_tetris_types as types;

// Re-export commonly used types for convenience
pub use balancing::Balancing;
pub use board::Board;
pub use config::{GameConfig, Point};
pub use fog::Fog;
pub use game::{Game, GameState, TitleChoice};
pub use money::{Coin, MoneyHandler};
pub use pieces::{cells, get_shape};
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use round::{LineClear, Piece, Round, RoundParams, TickOutcome};
pub use scoring::calculate_line_score;
pub use shop::Shop;
pub use snapshot::{ActiveSnapshot, CoinSnapshot, GameSnapshot};
