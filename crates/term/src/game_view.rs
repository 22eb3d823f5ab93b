//! GameView: paints a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{cells, GameSnapshot, GameState, TitleChoice};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Track, Upgrade, BREAK_STYLE, EMPTY_STYLE};

const BLACK: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const DEATH_BG: Rgb = Rgb::new(70, 25, 30);
const FOG_FG: Rgb = Rgb::new(150, 150, 165);
const COIN_FG: Rgb = Rgb::new(250, 200, 60);

const PANEL_W: u16 = 16;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

/// Placement of the play field inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Well {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        match snap.state {
            GameState::Controls => self.draw_controls(fb, viewport),
            GameState::Title => self.draw_title(fb, snap, viewport),
            GameState::Credits => self.draw_credits(fb, viewport),
            GameState::Play => {
                self.draw_play_field(fb, snap, viewport);
            }
            GameState::Balance => {
                let well = self.draw_play_field(fb, snap, viewport);
                self.draw_balance(fb, snap, well);
            }
            GameState::Lost => {
                let well = self.draw_play_field(fb, snap, viewport);
                self.draw_lost(fb, snap, viewport, well);
            }
            GameState::Improve => self.draw_improve(fb, snap, viewport),
            GameState::Won => self.draw_won(fb, snap, viewport),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn well(&self, snap: &GameSnapshot, viewport: Viewport) -> Well {
        let w = (snap.width as u16) * self.cell_w + 2;
        let h = (snap.visible_rows as u16) * self.cell_h + 2;
        let total_w = w + 2 + PANEL_W;
        Well {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    fn draw_play_field(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) -> Well {
        let well = self.well(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        fb.draw_box(well.x, well.y, well.w, well.h, border);

        for y in 0..snap.visible_rows {
            let bg = if y < snap.death_lines { DEATH_BG } else { WELL_BG };
            for x in 0..snap.width {
                let cell = snap.cell(x, y);
                if cell == EMPTY_STYLE {
                    let dot = CellStyle::new(Rgb::new(90, 90, 100), bg).dim();
                    self.fill_cell(fb, well, x as u16, y as u16, '·', dot);
                } else {
                    self.fill_cell(fb, well, x as u16, y as u16, '█', block_style(cell, bg));
                }
            }
        }

        if let Some(active) = snap.active {
            let invisible = snap.invisible_rows as i16;
            for (dx, dy) in cells(active.kind, active.rotation) {
                let x = active.x + dx;
                let y = active.y + dy - invisible;
                if x < 0 || y < 0 || x >= snap.width as i16 || y >= snap.visible_rows as i16 {
                    continue;
                }
                let bg = if (y as usize) < snap.death_lines { DEATH_BG } else { WELL_BG };
                let style = block_style(active.kind.style(), bg).bold();
                self.fill_cell(fb, well, x as u16, y as u16, '█', style);
            }
        }

        self.draw_fog(fb, snap, well);
        self.draw_side_panel(fb, snap, viewport, well);
        well
    }

    /// Fog rises from the bottom of the well; a partially covered row is
    /// drawn with a light shade.
    fn draw_fog(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, well: Well) {
        let rows = snap.visible_rows;
        let covered = snap.fog_covered.clamp(0.0, rows as f32);
        let full = covered.floor() as usize;
        let style = CellStyle::new(FOG_FG, Rgb::new(60, 60, 72));

        for y in rows - full..rows {
            for x in 0..snap.width {
                self.fill_cell(fb, well, x as u16, y as u16, '▓', style);
            }
        }
        if covered.fract() > 0.0 && full < rows {
            let y = rows - full - 1;
            for x in 0..snap.width {
                self.fill_cell(fb, well, x as u16, y as u16, '░', style);
            }
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, well: Well, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = well.x + 1 + x * self.cell_w;
        let py = well.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, well: Well) {
        let x = well.x.saturating_add(well.w).saturating_add(2);
        if x >= viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = well.y;
        let mut field = |fb: &mut FrameBuffer, name: &str, text: &str| {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y.saturating_add(1), text, value);
            y = y.saturating_add(3);
        };

        field(fb, "SCORE", &snap.score.to_string());
        field(fb, "LEVEL", &format!("{}/{}", snap.level + 1, snap.goal_level));
        field(fb, "LINES", &format!("{}/{}", snap.lines, snap.goal_lines));
        field(fb, "LIVES", &snap.lives.to_string());

        fb.put_str(x, y, "NEXT", label);
        draw_mini_piece(fb, x, y.saturating_add(1), snap.next);
        y = y.saturating_add(4);

        if snap.hold_enabled {
            fb.put_str(x, y, "HOLD", label);
            match snap.held {
                Some(kind) => draw_mini_piece(fb, x, y.saturating_add(1), kind),
                None => fb.put_str(x, y.saturating_add(1), "-", value),
            }
        }
    }

    fn draw_controls(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let lines = [
            "CONTROLS",
            "",
            "left / right   move",
            "down           soft drop",
            "up             rotate left",
            "x              rotate right",
            "space          hold",
            "enter          confirm",
            "q              quit",
            "",
            "press enter",
        ];
        draw_centered_lines(fb, viewport, &lines);
    }

    fn draw_title(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let top = viewport.height.saturating_sub(6) / 2;
        let title = CellStyle::new(Rgb::new(120, 220, 240), BLACK).bold();
        fb.put_str_centered(0, viewport.width, top, "JAM TETRIS", title);

        let entries = [(TitleChoice::Play, "PLAY"), (TitleChoice::Credits, "CREDITS")];
        for (i, (choice, text)) in entries.into_iter().enumerate() {
            let row = top + 3 + i as u16 * 2;
            if choice == snap.title_choice {
                let sel = CellStyle::new(BLACK, Rgb::new(220, 220, 220)).bold();
                fb.put_str_centered(0, viewport.width, row, &format!("> {text} <"), sel);
            } else {
                fb.put_str_centered(0, viewport.width, row, text, CellStyle::default());
            }
        }
    }

    fn draw_credits(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let lines = [
            "CREDITS",
            "",
            "a game jam falling block game",
            "terminal edition",
            "",
            "press enter",
        ];
        draw_centered_lines(fb, viewport, &lines);
    }

    fn draw_balance(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, well: Well) {
        let x = well.x + 1;
        let w = well.w.saturating_sub(2);
        let top = (well.y + well.h / 2).saturating_sub(4);
        let panel = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(20, 20, 60));
        fb.fill_rect(x, top, w, 9, ' ', panel);
        fb.put_str_centered(x, w, top + 1, "LEVEL UP", panel.bold());
        fb.put_str_centered(x, w, top + 2, "pick a trade-off", panel.dim());

        let offered = snap.choices.iter().filter(|c| c.is_some()).count();
        for (i, choice) in snap.choices.iter().enumerate() {
            let row = top + 4 + i as u16;
            let text = match choice {
                Some(track) => format!("{} {}", track_label(*track), snap.track_levels[track.index()] + 1),
                None => "-".to_string(),
            };
            let selected = offered > 0 && i == snap.choice_cursor && snap.choice_spin == 0.0;
            let style = if selected {
                CellStyle::new(BLACK, Rgb::new(240, 220, 80)).bold()
            } else {
                panel
            };
            fb.put_str_centered(x, w, row, &text, style);
        }
        let hint = if offered == 0 { "enter" } else { "< >  enter" };
        fb.put_str_centered(x, w, top + 8, hint, panel.dim());
    }

    fn draw_lost(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, well: Well) {
        let x = well.x + 1;
        let w = well.w.saturating_sub(2);
        let mid = well.y + well.h / 2;
        let panel = CellStyle::new(Rgb::new(240, 240, 240), Rgb::new(60, 20, 20));
        fb.fill_rect(x, mid.saturating_sub(2), w, 5, ' ', panel);
        fb.put_str_centered(x, w, mid.saturating_sub(1), "GAME OVER", panel.bold());
        let money = CellStyle::new(COIN_FG, Rgb::new(60, 20, 20)).bold();
        fb.put_str_centered(x, w, mid + 1, &format!("$ {}", snap.display_money), money);

        let coin = CellStyle::new(COIN_FG, BLACK).bold();
        for c in &snap.coins {
            let cx = (c.x * viewport.width as f32) as i32;
            let cy = (c.y * viewport.height as f32) as i32;
            if cx < 0 || cy < 0 {
                continue;
            }
            let ch = if c.scale >= 0.75 { '●' } else { '•' };
            fb.put_char(cx as u16, cy as u16, ch, coin);
        }
    }

    fn draw_improve(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let w = 34u16.min(viewport.width);
        let x = viewport.width.saturating_sub(w) / 2;
        let top = viewport.height.saturating_sub(12) / 2;
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        fb.draw_box(x, top, w, 12, border);

        let title = CellStyle::new(Rgb::new(220, 220, 220), BLACK).bold();
        fb.put_str_centered(x, w, top + 1, "SHOP", title);
        let money = CellStyle::new(COIN_FG, BLACK).bold();
        fb.put_str_centered(x, w, top + 2, &format!("$ {}", snap.money), money);

        for upgrade in Upgrade::ALL {
            let i = upgrade.index();
            let row = top + 4 + i as u16;
            let price = match snap.shop_prices[i] {
                Some(price) => format!("{price:>4}"),
                None => " max".to_string(),
            };
            let text = format!("{:<14} {:>2}  {}", upgrade_label(upgrade), snap.shop_levels[i], price);
            let style = if snap.shop_selected == Some(upgrade) {
                CellStyle::new(BLACK, Rgb::new(220, 220, 220)).bold()
            } else if snap.shop_prices[i].is_none() {
                CellStyle::default().dim()
            } else {
                CellStyle::default()
            };
            fb.put_str(x + 2, row, &text, style);
        }

        let cont = if snap.shop_selected.is_none() {
            CellStyle::new(BLACK, Rgb::new(220, 220, 220)).bold()
        } else {
            CellStyle::default()
        };
        fb.put_str_centered(x, w, top + 9, "CONTINUE", cont);
    }

    fn draw_won(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let mid = viewport.height / 2;
        let style = CellStyle::new(Rgb::new(120, 240, 140), BLACK).bold();
        fb.put_str_centered(0, viewport.width, mid.saturating_sub(3), "YOU WON", style);

        // Lift-off at frame 16, back on the ground when the cycle wraps.
        let lift = match snap.won_frame {
            f @ 16.. => ((f - 16) / 4 + 1) as u16,
            _ => 0,
        };
        let rocket = CellStyle::new(Rgb::new(240, 240, 240), BLACK);
        let base = mid.saturating_add(4).saturating_sub(lift);
        fb.put_str_centered(0, viewport.width, base.saturating_sub(2), "/\\", rocket);
        fb.put_str_centered(0, viewport.width, base.saturating_sub(1), "||", rocket);
        if lift > 0 {
            let flame = CellStyle::new(Rgb::new(250, 140, 40), BLACK);
            fb.put_str_centered(0, viewport.width, base, "^^", flame);
        }
        let ground = CellStyle::new(Rgb::new(120, 90, 60), BLACK);
        fb.put_str_centered(0, viewport.width, mid.saturating_add(5), "==========", ground);
    }
}

fn draw_centered_lines(fb: &mut FrameBuffer, viewport: Viewport, lines: &[&str]) {
    let top = viewport.height.saturating_sub(lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        let style = if i == 0 {
            CellStyle::default().bold()
        } else {
            CellStyle::default()
        };
        fb.put_str_centered(0, viewport.width, top + i as u16, line, style);
    }
}

/// 4x2 preview using the spawn rotation.
fn draw_mini_piece(fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
    let style = block_style(kind.style(), BLACK);
    let min_y = cells(kind, 0).map(|(_, dy)| dy).min().unwrap_or(0);
    for (dx, dy) in cells(kind, 0) {
        let px = x + (dx as u16) * 2;
        let py = y + (dy - min_y) as u16;
        fb.put_str(px, py, "██", style);
    }
}

fn block_style(cell: u8, bg: Rgb) -> CellStyle {
    let fg = match cell {
        1 => Rgb::new(80, 220, 220),
        2 => Rgb::new(240, 220, 80),
        3 => Rgb::new(80, 120, 220),
        4 => Rgb::new(255, 165, 0),
        5 => Rgb::new(100, 220, 120),
        6 => Rgb::new(200, 120, 220),
        7 => Rgb::new(220, 80, 80),
        BREAK_STYLE => Rgb::new(255, 255, 255),
        _ => Rgb::new(128, 128, 128),
    };
    CellStyle::new(fg, bg)
}

fn track_label(track: Track) -> &'static str {
    match track {
        Track::GoalLines => "more lines",
        Track::Speed => "faster",
        Track::HiddenLines => "more fog",
        Track::DeathLines => "lower ceiling",
    }
}

fn upgrade_label(upgrade: Upgrade) -> &'static str {
    match upgrade {
        Upgrade::Life => "extra life",
        Upgrade::Hold => "hold",
        Upgrade::AutoDownReset => "spin reset",
        Upgrade::HideMove => "fog protection",
    }
}
