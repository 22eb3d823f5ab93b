//! Shop module - permanent upgrades bought with converted score
//!
//! Four price ladders, one per [`Upgrade`]. The cursor walks over the
//! upgrades plus a trailing "continue" entry; maxed upgrades are skipped.

use crate::config::GameConfig;
use crate::money::MoneyHandler;
use crate::types::{MenuInput, Sound, SoundSet, Upgrade};

/// Cursor slot of the "continue" entry.
pub const CONTINUE: usize = Upgrade::ALL.len();

const SLOTS: usize = CONTINUE + 1;

#[derive(Debug, Clone)]
pub struct Shop {
    prices: [Vec<u32>; 4],
    levels: [usize; 4],
    cursor: usize,
}

impl Shop {
    pub fn new(config: &GameConfig) -> Self {
        let mut shop = Self {
            prices: [
                config.life_prices.clone(),
                config.hold_prices.clone(),
                config.auto_down_reset_prices.clone(),
                config.hide_move_prices.clone(),
            ],
            levels: [0; 4],
            cursor: 0,
        };
        shop.reset();
        shop
    }

    /// Put the cursor on the first upgrade still for sale.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.skip_maxed(1);
    }

    /// Handle one frame of shop navigation. Returns `true` when the player
    /// leaves through "continue".
    pub fn update(&mut self, input: MenuInput, money: &mut MoneyHandler) -> (bool, SoundSet) {
        let mut sounds = SoundSet::new();

        if input.left {
            sounds.insert(Sound::MenuMove);
            self.cursor = (self.cursor + SLOTS - 1) % SLOTS;
            self.skip_maxed(SLOTS - 1);
        }

        if input.right {
            sounds.insert(Sound::MenuMove);
            self.cursor = (self.cursor + 1) % SLOTS;
            self.skip_maxed(1);
        }

        if input.up || input.down {
            sounds.insert(Sound::MenuMove);
            if self.cursor != CONTINUE {
                self.cursor = CONTINUE;
            } else {
                self.reset();
            }
        }

        if !input.confirm {
            return (false, sounds);
        }

        let upgrade = match self.selected() {
            Some(upgrade) => upgrade,
            None => {
                sounds.insert(Sound::MenuConfirm);
                return (true, sounds);
            }
        };

        match self.price(upgrade) {
            Some(price) if money.spend(price) => {
                self.levels[upgrade.index()] += 1;
                sounds.insert(Sound::Buy);
            }
            _ => sounds.insert(Sound::MenuReject),
        }
        (false, sounds)
    }

    /// Step the cursor by `step` (mod slots) until it rests on "continue" or
    /// on an upgrade that is not maxed.
    fn skip_maxed(&mut self, step: usize) {
        while self.cursor != CONTINUE && self.is_maxed(Upgrade::ALL[self.cursor]) {
            self.cursor = (self.cursor + step) % SLOTS;
        }
    }

    /// Upgrade under the cursor; `None` on "continue".
    pub fn selected(&self) -> Option<Upgrade> {
        Upgrade::ALL.get(self.cursor).copied()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn level(&self, upgrade: Upgrade) -> usize {
        self.levels[upgrade.index()]
    }

    pub fn is_maxed(&self, upgrade: Upgrade) -> bool {
        self.level(upgrade) >= self.prices[upgrade.index()].len()
    }

    /// Price of the next level, `None` once maxed.
    pub fn price(&self, upgrade: Upgrade) -> Option<u32> {
        self.prices[upgrade.index()].get(self.level(upgrade)).copied()
    }

    /// Lives granted at the start of a game.
    pub fn lives(&self) -> u32 {
        (self.level(Upgrade::Life) as u32 * 2).saturating_sub(1)
    }

    pub fn hold_enabled(&self) -> bool {
        self.level(Upgrade::Hold) > 0
    }

    pub fn auto_down_reset(&self) -> bool {
        self.level(Upgrade::AutoDownReset) > 0
    }

    /// Fog protection level.
    pub fn hide_move_level(&self) -> u32 {
        self.level(Upgrade::HideMove) as u32
    }
}
