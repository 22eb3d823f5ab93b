//! Balancing module - difficulty choices offered between rounds
//!
//! Each cleared round lets the player raise one of four difficulty tracks.
//! The offered tracks sit on a small carousel: left/right spin it (the spin
//! takes a few frames), confirm commits the highlighted track.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::rng::RandomSource;
use crate::types::{MenuInput, Sound, SoundSet, Track};

/// Carousel spin direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    /// Brings the next choice to the front.
    Left,
    /// Brings the previous choice to the front.
    Right,
}

/// Carousel animation in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub spin: Spin,
    pub frame: u32,
}

#[derive(Debug, Clone)]
pub struct Balancing {
    levels: [u32; 4],
    max_levels: [u32; 4],
    goal_lines_table: Vec<u32>,
    speed_table: Vec<u32>,
    hidden_lines_factor: u32,
    visible_rows: usize,

    choices: Vec<Option<Track>>,
    offered: usize,
    cursor: usize,
    transition: Option<Transition>,
    transition_frames: u32,
}

impl Balancing {
    /// All tracks at level 0, no choices on display.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            levels: [0; 4],
            max_levels: [
                config.max_goal_lines_level,
                config.max_speed_level,
                config.max_hidden_lines_level,
                config.max_death_lines_level,
            ],
            goal_lines_table: config.goal_lines_table.clone(),
            speed_table: config.speed_table.clone(),
            hidden_lines_factor: config.hidden_lines_factor,
            visible_rows: config.visible_rows,
            choices: vec![None; config.num_choices],
            offered: 0,
            cursor: 0,
            transition: None,
            transition_frames: config.choice_transition_frames,
        }
    }

    /// Draw a fresh set of choices.
    ///
    /// Tracks already at their maximum are never offered. Up to one slot per
    /// eligible track is filled, sampling uniformly without replacement; the
    /// remaining slots stay empty.
    pub fn get_choice(&mut self, rng: &mut impl RandomSource) {
        let mut eligible: ArrayVec<Track, 4> = Track::ALL
            .into_iter()
            .filter(|t| !self.is_maxed(*t))
            .collect();

        self.offered = 0;
        for slot in self.choices.iter_mut() {
            *slot = if eligible.is_empty() {
                None
            } else {
                let take = rng.next_below(eligible.len() as u32) as usize;
                self.offered += 1;
                Some(eligible.swap_remove(take))
            };
        }
        self.cursor = 0;
        self.transition = None;
    }

    /// Advance the choice menu by one frame. Returns `true` once a choice was
    /// committed.
    pub fn update(&mut self, input: MenuInput) -> (bool, SoundSet) {
        let mut sounds = SoundSet::new();

        if let Some(mut transition) = self.transition.take() {
            transition.frame += 1;
            if transition.frame < self.transition_frames {
                self.transition = Some(transition);
                return (false, sounds);
            }
            if self.offered > 0 {
                self.cursor = match transition.spin {
                    Spin::Left => (self.cursor + 1) % self.offered,
                    Spin::Right => (self.cursor + self.offered - 1) % self.offered,
                };
            }
            return (false, sounds);
        }

        if input.left {
            self.transition = Some(Transition {
                spin: Spin::Left,
                frame: 0,
            });
        }
        if input.right {
            self.transition = Some(Transition {
                spin: Spin::Right,
                frame: 0,
            });
        }
        sounds.insert_if(Sound::MenuMove, self.transition.is_some());

        if !input.confirm {
            return (false, sounds);
        }

        if let Some(track) = self.selected() {
            self.set_choice(track);
        }
        self.transition = None;
        sounds.insert(Sound::MenuConfirm);
        (true, sounds)
    }

    /// Raise `track` by one level, never beyond its maximum.
    pub fn set_choice(&mut self, track: Track) {
        let i = track.index();
        if self.levels[i] < self.max_levels[i] {
            self.levels[i] += 1;
        }
    }

    pub fn is_maxed(&self, track: Track) -> bool {
        self.levels[track.index()] >= self.max_levels[track.index()]
    }

    /// Highlighted choice, if any track is on offer.
    pub fn selected(&self) -> Option<Track> {
        self.choices.get(self.cursor).copied().flatten()
    }

    pub fn choices(&self) -> &[Option<Track>] {
        &self.choices
    }

    /// Number of non-empty choice slots.
    pub fn offered(&self) -> usize {
        self.offered
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// Spin progress in `[0, 1)` while the carousel turns.
    pub fn transition_progress(&self) -> f32 {
        match self.transition {
            Some(t) if self.transition_frames > 0 => {
                t.frame as f32 / self.transition_frames as f32
            }
            _ => 0.0,
        }
    }

    pub fn level(&self, track: Track) -> u32 {
        self.levels[track.index()]
    }

    pub fn levels(&self) -> [u32; 4] {
        self.levels
    }

    /// Lines to clear before the round ends.
    pub fn goal_lines(&self) -> u32 {
        lookup(&self.goal_lines_table, self.level(Track::GoalLines))
    }

    /// Ticks between two gravity steps.
    pub fn speed(&self) -> u32 {
        lookup(&self.speed_table, self.level(Track::Speed))
    }

    /// Rows hidden by the fog at the bottom of the visible area.
    pub fn hidden_lines(&self) -> usize {
        let lines = (self.hidden_lines_factor * self.level(Track::HiddenLines)) as usize;
        lines.min(self.visible_rows)
    }

    /// Rows below the invisible area that end the round when occupied.
    pub fn death_lines(&self) -> usize {
        let lines = self.level(Track::DeathLines) as usize + 1;
        lines.min(self.visible_rows / 2)
    }
}

/// Table entry for `level`, clamped to the last entry.
fn lookup(table: &[u32], level: u32) -> u32 {
    match table.get(level as usize) {
        Some(v) => *v,
        None => table.last().copied().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{SequenceRng, SimpleRng};

    fn confirm() -> MenuInput {
        MenuInput {
            confirm: true,
            ..MenuInput::default()
        }
    }

    #[test]
    fn test_speed_after_four_picks_is_fifth_entry() {
        let mut b = Balancing::new(&GameConfig::default());
        assert_eq!(b.speed(), 45);
        for _ in 0..4 {
            b.set_choice(Track::Speed);
        }
        assert_eq!(b.speed(), 5, "last table entry after four picks");
        assert_eq!(b.level(Track::Speed), 4);
        b.set_choice(Track::Speed);
        assert_eq!(b.level(Track::Speed), 4, "capped at max level");
    }

    #[test]
    fn test_derived_values_at_level_zero() {
        let b = Balancing::new(&GameConfig::default());
        assert_eq!(b.goal_lines(), 1);
        assert_eq!(b.hidden_lines(), 0);
        assert_eq!(b.death_lines(), 1);
    }

    #[test]
    fn test_derived_values_clamp() {
        let mut b = Balancing::new(&GameConfig::default());
        for _ in 0..20 {
            b.set_choice(Track::GoalLines);
            b.set_choice(Track::HiddenLines);
            b.set_choice(Track::DeathLines);
        }
        assert_eq!(b.goal_lines(), 20);
        assert_eq!(b.hidden_lines(), 18);
        assert_eq!(b.death_lines(), 9);
    }

    #[test]
    fn test_lookup_clamps_to_last_entry() {
        assert_eq!(lookup(&[3, 2, 1], 7), 1);
        assert_eq!(lookup(&[], 0), 0);
    }

    #[test]
    fn test_get_choice_offers_distinct_eligible_tracks() {
        let mut rng = SimpleRng::new(42);
        let mut b = Balancing::new(&GameConfig::default());
        b.set_choice(Track::GoalLines);
        b.set_choice(Track::GoalLines);

        for _ in 0..200 {
            b.get_choice(&mut rng);
            let offered: Vec<Track> = b.choices().iter().flatten().copied().collect();
            assert_eq!(offered.len(), 3);
            assert!(!offered.contains(&Track::GoalLines));
            for (i, t) in offered.iter().enumerate() {
                assert!(!offered[i + 1..].contains(t), "duplicate in {:?}", offered);
            }
        }
    }

    #[test]
    fn test_get_choice_leaves_empty_slots_when_few_tracks_remain() {
        let mut rng = SequenceRng::new(vec![0]);
        let mut b = Balancing::new(&GameConfig::default());
        for _ in 0..10 {
            b.set_choice(Track::GoalLines);
            b.set_choice(Track::Speed);
            b.set_choice(Track::HiddenLines);
        }
        b.get_choice(&mut rng);
        assert_eq!(b.choices(), &[Some(Track::DeathLines), None, None]);
        assert_eq!(b.offered(), 1);
    }

    #[test]
    fn test_carousel_spins_after_transition_frames() {
        let config = GameConfig::default();
        let mut rng = SequenceRng::new(vec![0, 0, 0]);
        let mut b = Balancing::new(&config);
        b.get_choice(&mut rng);
        // swap_remove moves the last eligible track into the drawn slot.
        assert_eq!(
            b.choices(),
            &[Some(Track::GoalLines), Some(Track::DeathLines), Some(Track::HiddenLines)]
        );

        let (done, sounds) = b.update(MenuInput {
            left: true,
            ..MenuInput::default()
        });
        assert!(!done);
        assert!(sounds.contains(Sound::MenuMove));

        for _ in 0..config.choice_transition_frames - 1 {
            b.update(confirm());
            assert_eq!(b.cursor(), 0, "input ignored mid-spin");
        }
        b.update(MenuInput::default());
        assert_eq!(b.cursor(), 1);
        assert!(b.transition().is_none());

        b.update(MenuInput {
            right: true,
            ..MenuInput::default()
        });
        for _ in 0..config.choice_transition_frames {
            b.update(MenuInput::default());
        }
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn test_confirm_commits_highlighted_track() {
        let mut rng = SequenceRng::new(vec![1, 0, 0]);
        let mut b = Balancing::new(&GameConfig::default());
        b.get_choice(&mut rng);
        assert_eq!(b.selected(), Some(Track::Speed));

        let (done, sounds) = b.update(confirm());
        assert!(done);
        assert!(sounds.contains(Sound::MenuConfirm));
        assert_eq!(b.level(Track::Speed), 1);
        assert_eq!(b.speed(), 30);
    }

    #[test]
    fn test_confirm_with_nothing_offered_changes_nothing() {
        let mut b = Balancing::new(&GameConfig::default());
        let (done, _) = b.update(confirm());
        assert!(done);
        assert_eq!(b.levels(), [0, 0, 0, 0]);
    }
}
