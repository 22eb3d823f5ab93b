//! Round module - the play field simulation
//!
//! A [`Round`] owns the board, the falling piece and the queued piece, and
//! advances them one frame per [`Round::update`] call:
//!
//! 1. A running line clear animation swallows the frame; when it ends the
//!    marked rows are removed, the clear is scored and the next piece spawns.
//! 2. Rotation (left wins when both are requested), then hold.
//! 3. Horizontal movement with a first-move delay followed by auto-repeat.
//! 4. Gravity and soft drop share a single move-down attempt. A failed attempt
//!    locks the piece and scans the rows it covered for complete lines.
//!
//! After every lock the spawn check looks at the invisible rows plus the
//! configured death lines: anything there ends the round (or costs a life).

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::config::GameConfig;
use crate::pieces::{cells, rotate_left, rotate_right};
use crate::rng::RandomSource;
use crate::scoring::calculate_line_score;
use crate::types::{Cell, PieceKind, PlayInput, Sound, SoundSet, BREAK_STYLE, EMPTY_STYLE};

/// A piece placed on the board: kind, rotation index and the anchor of its
/// 4x4 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i16,
    pub y: i16,
}

impl Piece {
    pub fn new(kind: PieceKind, x: i16, y: i16) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }

    /// Absolute board coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> {
        let (x, y) = (self.x, self.y);
        cells(self.kind, self.rotation).map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Check if all cells are inside the board and on empty cells
    pub fn is_valid(&self, board: &Board) -> bool {
        self.cells().all(|(x, y)| board.is_valid(x, y))
    }
}

/// Per-round values pulled from balancing and the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundParams {
    /// Ticks between two gravity steps.
    pub speed: u32,
    pub death_lines: usize,
    pub hold_enabled: bool,
    /// Successful rotations restart the gravity counter.
    pub auto_down_reset: bool,
    /// Lives granted on a fresh game.
    pub lives: u32,
}

impl Default for RoundParams {
    fn default() -> Self {
        Self {
            speed: 45,
            death_lines: 1,
            hold_enabled: false,
            auto_down_reset: false,
            lives: 0,
        }
    }
}

/// Line clear animation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    /// Row range covered by the piece that completed the lines.
    pub top: usize,
    pub bottom: usize,
    /// Completed rows, top to bottom.
    pub rows: ArrayVec<usize, 4>,
    /// Starts at 1; odd steps show the rows breaking.
    pub step: u32,
    pub frame: u32,
}

impl LineClear {
    pub fn is_marked(&self, y: usize) -> bool {
        self.rows.contains(&y)
    }

    /// Whether marked rows are drawn with the break style this frame.
    pub fn breaking(&self) -> bool {
        self.step % 2 == 1
    }
}

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub dead: bool,
    pub score_delta: u32,
    pub sounds: SoundSet,
}

#[derive(Debug, Clone)]
pub struct Round {
    board: Board,
    active: Piece,
    next: PieceKind,
    held: Option<PieceKind>,
    hold_used: bool,

    spawn_x: i16,
    spawn_y: i16,
    invisible_rows: usize,

    auto_down_frame: u32,
    auto_down_limit: u32,
    manual_down_frame: u32,
    manual_down_limit: u32,
    lr_move_frame: u32,
    lr_move_limit: u32,
    lr_first_move_frame: u32,
    lr_first_move_limit: u32,
    manual_move_allowed: bool,

    line_clear: Option<LineClear>,
    line_clear_step_frames: u32,
    line_clear_steps: u32,

    lines: u32,
    drop_length: u32,
    score: u32,
    death_lines: usize,
    lives: u32,
    hold_enabled: bool,
    auto_down_reset: bool,
    dead: bool,
}

impl Round {
    /// Create an empty round with a freshly drawn piece pair.
    pub fn new(config: &GameConfig, rng: &mut impl RandomSource) -> Self {
        let active = Piece::new(draw_kind(rng), config.spawn_x, config.spawn_y);
        let next = draw_kind(rng);
        let params = RoundParams::default();

        Self {
            board: Board::new(config.width, config.height()),
            active,
            next,
            held: None,
            hold_used: false,
            spawn_x: config.spawn_x,
            spawn_y: config.spawn_y,
            invisible_rows: config.invisible_rows,
            auto_down_frame: 0,
            auto_down_limit: params.speed,
            manual_down_frame: 0,
            manual_down_limit: config.manual_down_frames.max(1),
            lr_move_frame: 0,
            lr_move_limit: config.lr_repeat_frames.max(1),
            lr_first_move_frame: 0,
            lr_first_move_limit: config.lr_first_move_frames,
            manual_move_allowed: true,
            line_clear: None,
            line_clear_step_frames: config.line_clear_step_frames.max(1),
            line_clear_steps: config.line_clear_steps,
            lines: 0,
            drop_length: 0,
            score: 0,
            death_lines: params.death_lines,
            lives: params.lives,
            hold_enabled: params.hold_enabled,
            auto_down_reset: params.auto_down_reset,
            dead: false,
        }
    }

    /// Prepare the round for `level`.
    ///
    /// Level 0 starts a new game: empty board, new piece pair, zero score and
    /// the lives granted by `params`. Later levels keep the board, the pieces,
    /// the score and the remaining lives.
    pub fn init(&mut self, level: u32, params: RoundParams, rng: &mut impl RandomSource) {
        if level == 0 {
            self.board.clear();
            self.active = Piece::new(draw_kind(rng), self.spawn_x, self.spawn_y);
            self.next = draw_kind(rng);
            self.held = None;
            self.score = 0;
            self.lives = params.lives;
        }

        self.auto_down_frame = 0;
        self.auto_down_limit = params.speed.max(1);
        self.manual_down_frame = 0;
        self.lr_move_frame = 0;
        self.lr_first_move_frame = 0;
        self.manual_move_allowed = true;
        self.lines = 0;
        self.drop_length = 0;
        self.death_lines = params.death_lines;
        self.hold_enabled = params.hold_enabled;
        self.auto_down_reset = params.auto_down_reset;
        self.hold_used = false;
        self.line_clear = None;
        self.dead = false;
    }

    /// Advance the play field by one frame.
    pub fn update(
        &mut self,
        input: PlayInput,
        level: u32,
        rng: &mut impl RandomSource,
    ) -> TickOutcome {
        let mut out = TickOutcome::default();
        if self.dead {
            out.dead = true;
            return out;
        }

        if let Some(mut clear) = self.line_clear.take() {
            clear.frame += 1;
            if clear.frame >= self.line_clear_step_frames {
                clear.step += 1;
                clear.frame = 0;
            }
            if clear.step < self.line_clear_steps {
                self.line_clear = Some(clear);
                return out;
            }

            out.sounds.insert(Sound::LinesFalling);
            let removed = self.board.remove_rows(&clear.rows);
            out.score_delta += calculate_line_score(removed, level);
            self.lines += removed as u32;
            self.spawn_next(rng, &mut out);
            self.score = self.score.saturating_add(out.score_delta);
            return out;
        }

        // Rotation
        let rotated = if input.rotate_left {
            self.try_rotate(rotate_left(self.active.rotation))
        } else if input.rotate_right {
            self.try_rotate(rotate_right(self.active.rotation))
        } else {
            false
        };
        if rotated {
            out.sounds.insert(Sound::Rotation);
            if self.auto_down_reset {
                self.auto_down_frame = 0;
            }
        }

        if input.hold && self.try_hold(rng) {
            out.sounds.insert(Sound::Rotation);
        }

        // Horizontal movement
        let mut may_rearm = false;
        let mut x_move: i16 = 0;
        if input.move_left {
            x_move -= 1;
        }
        if input.move_right {
            x_move += 1;
        }
        if !input.move_left && !input.move_right {
            may_rearm = true;
            self.lr_move_frame = 0;
            self.lr_first_move_frame = 0;
        }
        if !self.manual_move_allowed {
            x_move = 0;
        }
        if x_move != 0 {
            let waiting_first_delay = self.lr_first_move_frame > 0
                && self.lr_first_move_frame < self.lr_first_move_limit;
            if self.lr_move_frame > 0 || waiting_first_delay {
                x_move = 0;
            }
            self.lr_move_frame += 1;
            if self.lr_move_frame >= self.lr_move_limit {
                self.lr_move_frame = 0;
            }
            if self.lr_first_move_frame < self.lr_first_move_limit {
                self.lr_first_move_frame += 1;
            }
        }

        // Gravity
        let mut auto_down = false;
        self.auto_down_frame += 1;
        if self.auto_down_frame >= self.auto_down_limit {
            auto_down = true;
            self.auto_down_frame = 0;
        }

        // Soft drop
        let mut manual_down = false;
        if !input.move_down {
            self.manual_down_frame = 0;
            self.manual_move_allowed = self.manual_move_allowed || may_rearm;
            self.drop_length = 0;
        }
        if input.move_down && self.manual_move_allowed {
            manual_down = self.manual_down_frame == 0;
            self.manual_down_frame += 1;
            if self.manual_down_frame >= self.manual_down_limit {
                self.manual_down_frame = 0;
            }
        }

        if x_move != 0 && self.try_move(x_move, 0) {
            out.sounds.insert(Sound::LeftRight);
        }

        if auto_down || manual_down {
            if self.try_move(0, 1) {
                if manual_down {
                    self.drop_length += 1;
                }
            } else {
                self.lock(rng, &mut out);
            }
        }

        self.score = self.score.saturating_add(out.score_delta);
        out
    }

    /// Move the active piece if the target position is free.
    pub(crate) fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        let moved = Piece {
            x: self.active.x + dx,
            y: self.active.y + dy,
            ..self.active
        };
        if moved.is_valid(&self.board) {
            self.active = moved;
            return true;
        }
        false
    }

    /// Switch the active piece to `rotation` if it fits. No wall kicks.
    pub(crate) fn try_rotate(&mut self, rotation: u8) -> bool {
        let rotated = Piece {
            rotation,
            ..self.active
        };
        if rotated.is_valid(&self.board) {
            self.active = rotated;
            return true;
        }
        false
    }

    /// Swap the active piece with the held one (or with the queued one when
    /// nothing is held), keeping its anchor. Allowed once per spawned piece.
    fn try_hold(&mut self, rng: &mut impl RandomSource) -> bool {
        if !self.hold_enabled || self.hold_used {
            return false;
        }

        let replacement = self.held.unwrap_or(self.next);
        let candidate = Piece::new(replacement, self.active.x, self.active.y);
        if !candidate.is_valid(&self.board) {
            return false;
        }

        if self.held.is_none() {
            self.next = draw_kind(rng);
        }
        self.held = Some(self.active.kind);
        self.active = candidate;
        self.hold_used = true;
        true
    }

    /// Write the active piece into the board and start a line clear if it
    /// completed rows; otherwise bring in the next piece.
    fn lock(&mut self, rng: &mut impl RandomSource, out: &mut TickOutcome) {
        out.sounds.insert(Sound::TouchGround);

        let style = self.active.kind.style();
        let mut top = usize::MAX;
        let mut bottom = 0usize;
        for (x, y) in self.active.cells() {
            self.board.set(x, y, style);
            top = top.min(y as usize);
            bottom = bottom.max(y as usize);
        }

        out.score_delta += self.drop_length;
        self.drop_length = 0;

        let rows = self.board.full_rows_in(top, bottom);
        if !rows.is_empty() {
            self.line_clear = Some(LineClear {
                top,
                bottom,
                rows,
                step: 1,
                frame: 0,
            });
            out.sounds.insert(Sound::LinesVanishing);
            return;
        }

        self.spawn_next(rng, out);
    }

    /// Promote the queued piece, draw a new one and run the lose check.
    fn spawn_next(&mut self, rng: &mut impl RandomSource, out: &mut TickOutcome) {
        let mut lost = self.lost();

        self.active = Piece::new(self.next, self.spawn_x, self.spawn_y);
        self.next = draw_kind(rng);
        self.manual_move_allowed = false;
        self.hold_used = false;

        // Spawns placed below the checked rows are only caught here.
        lost = lost || !self.active.is_valid(&self.board);
        if !lost {
            return;
        }

        out.sounds.insert(Sound::Death);
        if self.lives > 0 {
            self.lives -= 1;
            self.board.clear();
        } else {
            self.dead = true;
            out.dead = true;
        }
    }

    /// Whether anything sits in the invisible rows or the death lines.
    pub fn lost(&self) -> bool {
        self.board
            .any_filled_above(self.invisible_rows + self.death_lines)
    }

    /// Cell as it should be displayed, including the line clear animation.
    pub fn display_cell(&self, x: i16, y: i16) -> Cell {
        let cell = self.board.get(x, y).unwrap_or(EMPTY_STYLE);
        if cell == EMPTY_STYLE {
            return cell;
        }
        match &self.line_clear {
            Some(clear) if clear.breaking() && clear.is_marked(y as usize) => {
                if clear.step + 1 == self.line_clear_steps {
                    EMPTY_STYLE
                } else {
                    BREAK_STYLE
                }
            }
            _ => cell,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Piece {
        self.active
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn line_clear(&self) -> Option<&LineClear> {
        self.line_clear.as_ref()
    }

    pub fn in_animation(&self) -> bool {
        self.line_clear.is_some()
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn dead(&self) -> bool {
        self.dead
    }

    pub fn death_lines(&self) -> usize {
        self.death_lines
    }

    pub fn invisible_rows(&self) -> usize {
        self.invisible_rows
    }

    pub fn hold_enabled(&self) -> bool {
        self.hold_enabled
    }
}

fn draw_kind(rng: &mut impl RandomSource) -> PieceKind {
    PieceKind::from_index(rng.next_below(PieceKind::ALL.len() as u32))
}
