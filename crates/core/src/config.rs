//! Config module - immutable game configuration
//!
//! Every engine receives a `&GameConfig` (or the values it needs) at
//! construction, so tests can shrink the board or shorten timings without
//! touching process-wide state. `GameConfig::default()` is the shipped game.

use crate::types::{
    BOARD_WIDTH, INVISIBLE_ROWS, LINE_CLEAR_STEPS, LINE_CLEAR_STEP_FRAMES, LR_FIRST_MOVE_FRAMES,
    LR_REPEAT_FRAMES, MANUAL_DOWN_FRAMES, VISIBLE_ROWS,
};

/// Screen-space point used by coin animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: usize,
    pub visible_rows: usize,
    pub invisible_rows: usize,
    /// Anchor of a freshly spawned piece's 4x4 box.
    pub spawn_x: i16,
    pub spawn_y: i16,

    pub manual_down_frames: u32,
    pub lr_repeat_frames: u32,
    pub lr_first_move_frames: u32,
    pub line_clear_step_frames: u32,
    pub line_clear_steps: u32,

    /// Number of choices offered between rounds.
    pub num_choices: usize,
    /// Ticks a choice carousel rotation lasts.
    pub choice_transition_frames: u32,
    /// Reaching this level wins the game.
    pub goal_level: u32,

    pub goal_lines_table: Vec<u32>,
    pub speed_table: Vec<u32>,
    pub max_goal_lines_level: u32,
    pub max_speed_level: u32,
    pub max_hidden_lines_level: u32,
    pub max_death_lines_level: u32,
    pub hidden_lines_factor: u32,

    pub life_prices: Vec<u32>,
    pub hold_prices: Vec<u32>,
    pub auto_down_reset_prices: Vec<u32>,
    pub hide_move_prices: Vec<u32>,

    pub score_to_money: u32,
    pub score_units_per_frame: u32,
    /// Rate increases by one each time this many hundreds have been converted.
    pub score_count_step: u32,
    pub coin_frames: u32,
    /// Logical screen the coin positions are expressed in.
    pub screen_size: Point,
    pub coin_origin: Point,
    pub coin_target: Point,

    pub fog_frames_per_line: u32,
    pub fog_hold_frames: u32,
    pub fog_decrease_factor: u32,

    /// Length of the celebration cycle on the win screen.
    pub won_cycle_frames: u32,
    pub won_rocket_frame: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            visible_rows: VISIBLE_ROWS,
            invisible_rows: INVISIBLE_ROWS,
            spawn_x: 3,
            spawn_y: 1,

            manual_down_frames: MANUAL_DOWN_FRAMES,
            lr_repeat_frames: LR_REPEAT_FRAMES,
            lr_first_move_frames: LR_FIRST_MOVE_FRAMES,
            line_clear_step_frames: LINE_CLEAR_STEP_FRAMES,
            line_clear_steps: LINE_CLEAR_STEPS,

            num_choices: 3,
            choice_transition_frames: 15,
            goal_level: 11,

            goal_lines_table: vec![1, 15, 20],
            speed_table: vec![45, 30, 20, 10, 5],
            max_goal_lines_level: 2,
            max_speed_level: 4,
            max_hidden_lines_level: 9,
            max_death_lines_level: 8,
            hidden_lines_factor: 2,

            life_prices: vec![10, 50, 150],
            hold_prices: vec![150],
            auto_down_reset_prices: vec![300],
            hide_move_prices: vec![20, 75, 250],

            score_to_money: 100,
            score_units_per_frame: 5,
            score_count_step: 3,
            coin_frames: 30,
            screen_size: Point::new(208.0, 144.0),
            coin_origin: Point::new(196.0, 12.0),
            coin_target: Point::new(104.0, 108.0),

            fog_frames_per_line: 60,
            fog_hold_frames: 20,
            fog_decrease_factor: 4,

            won_cycle_frames: 32,
            won_rocket_frame: 16,
        }
    }
}

impl GameConfig {
    /// Total board height including the invisible rows.
    pub fn height(&self) -> usize {
        self.visible_rows + self.invisible_rows
    }
}
