//! Money module - converts a lost round's score into coins
//!
//! The score is drained a few units per frame. Every `score_to_money` units
//! drained bank one coin and launch a coin animation towards the wallet; the
//! displayed balance only moves when a coin lands. Confirm skips the rest of
//! the animation.

use crate::config::{GameConfig, Point};
use crate::types::{Sound, SoundSet};

/// One coin flying from the score display to the wallet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coin {
    frame: u32,
    frames: u32,
    origin: Point,
    target: Point,
}

impl Coin {
    pub fn new(origin: Point, target: Point, frames: u32) -> Self {
        Self {
            frame: 0,
            frames: frames.max(1),
            origin,
            target,
        }
    }

    /// Advance one frame. Returns `true` when the coin has landed.
    pub fn update(&mut self) -> bool {
        self.frame += 1;
        self.frame >= self.frames
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.frame as f32 / self.frames as f32).min(1.0)
    }

    pub fn position(&self) -> Point {
        let t = self.progress();
        Point::new(
            self.origin.x + (self.target.x - self.origin.x) * t,
            self.origin.y + (self.target.y - self.origin.y) * t,
        )
    }

    /// Grows to full size during the first third of the flight.
    pub fn scale(&self) -> f32 {
        let grow = (self.frames / 3).max(1);
        (self.frame as f32 / grow as f32).min(1.0)
    }
}

#[derive(Debug, Clone)]
pub struct MoneyHandler {
    money: u32,
    display_money: u32,
    queued: u32,
    rate: u32,
    count: u32,
    trickle: u32,

    base_rate: u32,
    count_step: u32,
    score_to_money: u32,
    coin_frames: u32,
    coin_origin: Point,
    coin_target: Point,

    coins: Vec<Option<Coin>>,
    first_free: usize,
}

impl MoneyHandler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            money: 0,
            display_money: 0,
            queued: 0,
            rate: config.score_units_per_frame.max(1),
            count: 0,
            trickle: 0,
            base_rate: config.score_units_per_frame.max(1),
            count_step: config.score_count_step,
            score_to_money: config.score_to_money.max(1),
            coin_frames: config.coin_frames,
            coin_origin: config.coin_origin,
            coin_target: config.coin_target,
            coins: Vec::new(),
            first_free: 0,
        }
    }

    /// Queue a round score for conversion and restart the animation.
    pub fn add_score(&mut self, score: u32) {
        self.display_money = self.money;
        self.queued = score;
        self.rate = self.base_rate;
        self.count = 0;
        self.trickle = 0;
        self.coins.iter_mut().for_each(|c| *c = None);
        self.first_free = 0;
    }

    /// Advance the conversion by one frame. Returns `true` when the player
    /// confirmed after everything was converted and every coin landed.
    pub fn update(&mut self, confirm: bool) -> (bool, SoundSet) {
        let mut sounds = SoundSet::new();

        if self.queued > 0 {
            let chunk = self.rate.min(self.queued);
            self.queued -= chunk;
            self.count += chunk;
            self.trickle += chunk;

            if self.count / self.score_to_money >= self.count_step {
                self.rate += 1;
                self.count = 0;
            }

            while self.trickle >= self.score_to_money {
                self.trickle -= self.score_to_money;
                self.money += 1;
                self.spawn_coin();
            }
        }

        for i in 0..self.coins.len() {
            let landed = match self.coins[i].as_mut() {
                Some(coin) => coin.update(),
                None => continue,
            };
            if landed {
                self.coins[i] = None;
                self.display_money += 1;
                self.first_free = self.first_free.min(i);
                sounds.insert(Sound::Coin);
            }
        }

        if !confirm {
            return (false, sounds);
        }

        if self.queued == 0 {
            let done = self.in_flight() == 0;
            sounds.insert_if(Sound::MenuConfirm, done);
            return (done, sounds);
        }

        let credited = (self.trickle + self.queued) / self.score_to_money;
        self.money += credited;
        self.display_money += credited;
        self.queued = 0;
        self.trickle = 0;
        (false, sounds)
    }

    /// Put a new coin in the first free slot, growing the pool if needed.
    fn spawn_coin(&mut self) {
        let coin = Coin::new(self.coin_origin, self.coin_target, self.coin_frames);
        if self.first_free >= self.coins.len() {
            self.coins.push(Some(coin));
            self.first_free = self.coins.len();
            return;
        }

        self.coins[self.first_free] = Some(coin);
        self.first_free += 1;
        while self.first_free < self.coins.len() && self.coins[self.first_free].is_some() {
            self.first_free += 1;
        }
    }

    /// Take `amount` from the balance if it is there.
    pub fn spend(&mut self, amount: u32) -> bool {
        if amount > self.money {
            return false;
        }
        self.money -= amount;
        self.display_money = self.display_money.saturating_sub(amount);
        true
    }

    /// Banked balance.
    pub fn money(&self) -> u32 {
        self.money
    }

    /// Balance as shown on screen (lags behind while coins fly).
    pub fn display_money(&self) -> u32 {
        self.display_money
    }

    /// Score still waiting to be converted.
    pub fn queued(&self) -> u32 {
        self.queued
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn in_flight(&self) -> usize {
        self.coins.iter().filter(|c| c.is_some()).count()
    }

    pub fn coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter().flatten()
    }

    /// Pool capacity (slots ever allocated).
    pub fn pool_len(&self) -> usize {
        self.coins.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(m: &mut MoneyHandler) -> u32 {
        let mut frames = 0;
        loop {
            frames += 1;
            let (done, _) = m.update(true);
            if done {
                return frames;
            }
            assert!(frames < 100_000, "conversion never finished");
        }
    }

    #[test]
    fn test_trickle_converts_exact_floor() {
        for score in [0, 99, 100, 101, 250, 1234, 9999, 40_000] {
            let mut m = MoneyHandler::new(&GameConfig::default());
            m.add_score(score);
            let mut frames = 0;
            while m.queued() > 0 || m.in_flight() > 0 {
                m.update(false);
                frames += 1;
                assert!(frames < 100_000);
            }
            assert_eq!(m.money(), score / 100, "score {}", score);
            assert_eq!(m.display_money(), score / 100, "score {}", score);
        }
    }

    #[test]
    fn test_flush_converts_exact_floor() {
        let mut m = MoneyHandler::new(&GameConfig::default());
        m.add_score(1234);
        for _ in 0..25 {
            m.update(false);
        }
        let (done, _) = m.update(true);
        assert!(!done, "flush never finishes on the same frame");
        assert_eq!(m.queued(), 0);
        assert_eq!(m.money(), 12);

        run_to_end(&mut m);
        assert_eq!(m.display_money(), 12);
    }

    #[test]
    fn test_rate_grows_every_300_units() {
        let mut m = MoneyHandler::new(&GameConfig::default());
        m.add_score(10_000);
        assert_eq!(m.rate(), 5);
        for _ in 0..60 {
            m.update(false);
        }
        assert_eq!(m.rate(), 6);
    }

    #[test]
    fn test_first_coin_lands_after_coin_frames() {
        let config = GameConfig::default();
        let mut m = MoneyHandler::new(&config);
        m.add_score(100);

        // 100 units at 5 per frame spawn the coin on frame 20.
        for _ in 0..20 {
            m.update(false);
        }
        assert_eq!(m.money(), 1);
        assert_eq!(m.display_money(), 0);
        assert_eq!(m.in_flight(), 1);

        let mut landed_after = 0;
        for frame in 1..=config.coin_frames {
            let (_, sounds) = m.update(false);
            if sounds.contains(Sound::Coin) {
                landed_after = frame;
                break;
            }
        }
        assert_eq!(landed_after, config.coin_frames - 1);
        assert_eq!(m.display_money(), 1);
        assert_eq!(m.in_flight(), 0);
    }

    #[test]
    fn test_confirm_waits_for_coins_in_flight() {
        let mut m = MoneyHandler::new(&GameConfig::default());
        m.add_score(100);
        for _ in 0..20 {
            m.update(false);
        }
        let (done, sounds) = m.update(true);
        assert!(!done);
        assert!(!sounds.contains(Sound::MenuConfirm));

        let frames = run_to_end(&mut m);
        assert!(frames > 1);
    }

    #[test]
    fn test_confirm_on_empty_queue_finishes() {
        let mut m = MoneyHandler::new(&GameConfig::default());
        m.add_score(0);
        let (done, sounds) = m.update(true);
        assert!(done);
        assert!(sounds.contains(Sound::MenuConfirm));
    }

    #[test]
    fn test_coin_slots_are_reused() {
        let mut m = MoneyHandler::new(&GameConfig::default());
        m.add_score(100_000);
        let mut max_in_flight = 0;
        while m.queued() > 0 || m.in_flight() > 0 {
            m.update(false);
            max_in_flight = max_in_flight.max(m.in_flight());
        }
        assert_eq!(m.money(), 1000);
        assert!(max_in_flight <= m.pool_len());
        assert!(m.pool_len() < 1000, "landed coins free their slot");
    }

    #[test]
    fn test_spend() {
        let mut m = MoneyHandler::new(&GameConfig::default());
        m.add_score(1500);
        run_to_end(&mut m);
        assert!(!m.spend(16));
        assert!(m.spend(10));
        assert_eq!(m.money(), 5);
        assert_eq!(m.display_money(), 5);
    }

    #[test]
    fn test_coin_flight_path() {
        let mut coin = Coin::new(Point::new(0.0, 0.0), Point::new(30.0, 60.0), 30);
        assert_eq!(coin.scale(), 0.0);
        for _ in 0..15 {
            coin.update();
        }
        assert_eq!(coin.position(), Point::new(15.0, 30.0));
        assert_eq!(coin.scale(), 1.0);
    }
}
