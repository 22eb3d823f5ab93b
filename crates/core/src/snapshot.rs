//! Snapshot module - read-only view of a game for renderers
//!
//! A [`GameSnapshot`] holds everything a frontend needs to draw one frame.
//! [`Game::snapshot_into`] refills an existing snapshot so a render loop can
//! reuse its buffers every frame.

use crate::game::{Game, GameState, TitleChoice};
use crate::rng::RandomSource;
use crate::round::Piece;
use crate::types::{Cell, PieceKind, Track, Upgrade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i16,
    pub y: i16,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// A coin in flight. Coordinates are fractions of the screen size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinSnapshot {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    /// Flight progress in `[0, 1]`.
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub state: GameState,
    pub title_choice: TitleChoice,

    pub width: usize,
    pub visible_rows: usize,
    pub invisible_rows: usize,
    /// Display styles of the visible rows, row-major.
    pub cells: Vec<Cell>,
    /// Active piece in board coordinates; `None` during a line clear.
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub held: Option<PieceKind>,
    pub hold_enabled: bool,

    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub goal_lines: u32,
    pub goal_level: u32,
    pub lives: u32,
    pub death_lines: usize,
    pub fog_lines: usize,
    pub fog_covered: f32,

    pub choices: Vec<Option<Track>>,
    pub choice_cursor: usize,
    pub choice_spin: f32,
    pub track_levels: [u32; 4],

    /// `None` when "continue" is highlighted.
    pub shop_selected: Option<Upgrade>,
    pub shop_prices: [Option<u32>; 4],
    pub shop_levels: [usize; 4],

    pub money: u32,
    pub display_money: u32,
    pub coins: Vec<CoinSnapshot>,
    pub won_frame: u32,
}

impl GameSnapshot {
    /// Display style at visible row `y`.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells
            .get(y * self.width + x)
            .copied()
            .unwrap_or_default()
    }

    pub fn playing(&self) -> bool {
        self.state == GameState::Play
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            state: GameState::Controls,
            title_choice: TitleChoice::Play,
            width: 0,
            visible_rows: 0,
            invisible_rows: 0,
            cells: Vec::new(),
            active: None,
            next: PieceKind::I,
            held: None,
            hold_enabled: false,
            score: 0,
            level: 0,
            lines: 0,
            goal_lines: 0,
            goal_level: 0,
            lives: 0,
            death_lines: 0,
            fog_lines: 0,
            fog_covered: 0.0,
            choices: Vec::new(),
            choice_cursor: 0,
            choice_spin: 0.0,
            track_levels: [0; 4],
            shop_selected: None,
            shop_prices: [None; 4],
            shop_levels: [0; 4],
            money: 0,
            display_money: 0,
            coins: Vec::new(),
            won_frame: 0,
        }
    }
}

impl<R: RandomSource> Game<R> {
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Overwrite `out` with the current frame, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let round = self.round();
        let board = round.board();
        let invisible = round.invisible_rows();

        out.state = self.state();
        out.title_choice = self.title_choice();

        out.width = board.width();
        out.invisible_rows = invisible;
        out.visible_rows = board.height().saturating_sub(invisible);
        out.cells.clear();
        for y in invisible..board.height() {
            for x in 0..board.width() {
                out.cells.push(round.display_cell(x as i16, y as i16));
            }
        }
        out.active = if round.in_animation() {
            None
        } else {
            Some(round.active().into())
        };
        out.next = round.next();
        out.held = round.held();
        out.hold_enabled = round.hold_enabled();

        // While converting, the score display drains into the wallet.
        out.score = match self.state() {
            GameState::Lost => self.money().queued(),
            _ => round.score(),
        };
        out.level = self.level();
        out.lines = round.lines();
        out.goal_lines = self.balancing().goal_lines();
        out.goal_level = self.config().goal_level;
        out.lives = round.lives();
        out.death_lines = round.death_lines();
        out.fog_lines = self.fog().hidden_lines();
        out.fog_covered = self.fog().covered();

        let balancing = self.balancing();
        out.choices.clear();
        out.choices.extend_from_slice(balancing.choices());
        out.choice_cursor = balancing.cursor();
        out.choice_spin = balancing.transition_progress();
        out.track_levels = balancing.levels();

        let shop = self.shop();
        out.shop_selected = shop.selected();
        for upgrade in Upgrade::ALL {
            out.shop_prices[upgrade.index()] = shop.price(upgrade);
            out.shop_levels[upgrade.index()] = shop.level(upgrade);
        }

        let money = self.money();
        let screen = self.config().screen_size;
        out.money = money.money();
        out.display_money = money.display_money();
        out.coins.clear();
        out.coins.extend(money.coins().map(|coin| {
            let pos = coin.position();
            CoinSnapshot {
                x: pos.x / screen.x.max(1.0),
                y: pos.y / screen.y.max(1.0),
                scale: coin.scale(),
                progress: coin.progress(),
            }
        }));
        out.won_frame = self.won_frame();
    }
}
