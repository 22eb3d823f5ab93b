//! Fog module - hides the bottom rows of the play area
//!
//! Without protection the fog simply covers `hidden_lines` rows. Each level of
//! protection lets it recede after a short hold, one row at a time, by up to
//! `decrease_factor` rows per level before it creeps back up.

use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fog {
    hidden_lines: usize,
    current: usize,
    protection: u32,
    frame: u32,
    decreasing: bool,

    frames_per_line: u32,
    hold_frames: u32,
    decrease_factor: u32,
}

impl Fog {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            hidden_lines: 0,
            current: 0,
            protection: 0,
            frame: 0,
            decreasing: false,
            frames_per_line: config.fog_frames_per_line.max(1),
            hold_frames: config.fog_hold_frames,
            decrease_factor: config.fog_decrease_factor,
        }
    }

    /// Start a round with `hidden_lines` covered rows.
    pub fn reset(&mut self, hidden_lines: usize, protection: u32) {
        self.hidden_lines = hidden_lines;
        self.current = hidden_lines;
        self.protection = protection;
        self.frame = 0;
        self.decreasing = false;
    }

    pub fn update(&mut self) {
        if self.protection == 0 {
            return;
        }

        self.frame += 1;
        if !self.decreasing && self.current >= self.hidden_lines {
            if self.frame >= self.hold_frames {
                self.frame = 0;
                self.decreasing = true;
            }
            return;
        }

        if self.frame < self.frames_per_line {
            return;
        }
        self.frame = 0;
        if self.decreasing {
            self.current = self.current.saturating_sub(1);
            if self.current <= self.lowest() {
                self.decreasing = false;
            }
        } else {
            self.current += 1;
        }
    }

    /// Fewest rows the fog recedes to.
    fn lowest(&self) -> usize {
        let recede = (self.decrease_factor * self.protection) as usize;
        self.hidden_lines.saturating_sub(recede)
    }

    /// Rows currently covered.
    pub fn hidden_lines(&self) -> usize {
        self.current
    }

    /// Rows covered at the start of the round.
    pub fn target_lines(&self) -> usize {
        self.hidden_lines
    }

    pub fn decreasing(&self) -> bool {
        self.decreasing
    }

    /// Covered rows including the fraction of the row currently moving.
    pub fn covered(&self) -> f32 {
        let partial = self.frame as f32 / self.frames_per_line as f32;
        let current = self.current as f32;
        if self.decreasing && self.current > 0 {
            current - partial
        } else if !self.decreasing && self.current < self.hidden_lines {
            current + partial
        } else {
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(fog: &mut Fog, frames: u32) {
        for _ in 0..frames {
            fog.update();
        }
    }

    #[test]
    fn test_no_protection_is_static() {
        let mut fog = Fog::new(&GameConfig::default());
        fog.reset(6, 0);
        run(&mut fog, 1000);
        assert_eq!(fog.hidden_lines(), 6);
        assert_eq!(fog.covered(), 6.0);
    }

    #[test]
    fn test_holds_then_recedes_then_grows_back() {
        let mut fog = Fog::new(&GameConfig::default());
        fog.reset(6, 1);
        assert_eq!(fog.target_lines(), 6);

        run(&mut fog, 19);
        assert!(!fog.decreasing());
        run(&mut fog, 1);
        assert!(fog.decreasing());
        assert_eq!(fog.hidden_lines(), 6);

        run(&mut fog, 30);
        assert_eq!(fog.covered(), 5.5);

        run(&mut fog, 30);
        assert_eq!(fog.hidden_lines(), 5);
        run(&mut fog, 180);
        assert_eq!(fog.hidden_lines(), 2, "recedes by four rows per level");
        assert_eq!(fog.target_lines(), 6);
        assert!(!fog.decreasing());

        run(&mut fog, 60);
        assert_eq!(fog.hidden_lines(), 3);
        run(&mut fog, 180);
        assert_eq!(fog.hidden_lines(), 6);
        assert!(!fog.decreasing(), "holds again once back to full");
    }

    #[test]
    fn test_never_recedes_below_zero() {
        let mut fog = Fog::new(&GameConfig::default());
        fog.reset(2, 3);
        run(&mut fog, 20 + 120);
        assert_eq!(fog.hidden_lines(), 0);
        assert!(!fog.decreasing());
        run(&mut fog, 60);
        assert_eq!(fog.hidden_lines(), 1);
    }
}
