//! Game module - top-level state machine
//!
//! ```text
//! Controls -> Title -> Play <-> Balance
//!               ^  \      \
//!               |   Credits  Lost -> Improve -> Title
//!               |              (Play may also end in Won)
//! ```
//!
//! [`Game::tick`] runs exactly one frame of the active state and returns the
//! sounds it requested. All randomness comes from the owned [`RandomSource`].

use crate::balancing::Balancing;
use crate::config::GameConfig;
use crate::fog::Fog;
use crate::money::MoneyHandler;
use crate::rng::{RandomSource, SimpleRng};
use crate::round::{Round, RoundParams};
use crate::shop::Shop;
use crate::types::{FrameInput, Sound, SoundSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Controls,
    Title,
    Credits,
    Play,
    Balance,
    Lost,
    Improve,
    Won,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Controls => "controls",
            GameState::Title => "title",
            GameState::Credits => "credits",
            GameState::Play => "play",
            GameState::Balance => "balance",
            GameState::Lost => "lost",
            GameState::Improve => "improve",
            GameState::Won => "won",
        }
    }
}

/// Entry highlighted on the title screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleChoice {
    Play,
    Credits,
}

impl TitleChoice {
    fn toggled(self) -> Self {
        match self {
            TitleChoice::Play => TitleChoice::Credits,
            TitleChoice::Credits => TitleChoice::Play,
        }
    }
}

pub struct Game<R: RandomSource = SimpleRng> {
    config: GameConfig,
    rng: R,
    state: GameState,
    title_choice: TitleChoice,
    level: u32,
    round: Round,
    balancing: Balancing,
    shop: Shop,
    money: MoneyHandler,
    fog: Fog,
    won_frame: u32,
}

impl Game<SimpleRng> {
    /// Shipped configuration driven by a seeded [`SimpleRng`].
    pub fn with_seed(seed: u32) -> Self {
        Self::new(GameConfig::default(), SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Game<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let round = Round::new(&config, &mut rng);
        Self {
            balancing: Balancing::new(&config),
            shop: Shop::new(&config),
            money: MoneyHandler::new(&config),
            fog: Fog::new(&config),
            round,
            rng,
            state: GameState::Controls,
            title_choice: TitleChoice::Play,
            level: 0,
            won_frame: 0,
            config,
        }
    }

    /// Run one frame of the current state.
    pub fn tick(&mut self, input: &FrameInput) -> SoundSet {
        let mut sounds = SoundSet::new();
        let menu = input.menu();

        match self.state {
            GameState::Controls | GameState::Credits => {
                if menu.confirm {
                    sounds.insert(Sound::MenuConfirm);
                    self.state = GameState::Title;
                }
            }
            GameState::Title => {
                if menu.any_direction() {
                    sounds.insert(Sound::MenuMove);
                    self.title_choice = self.title_choice.toggled();
                }
                if menu.confirm {
                    sounds.insert(Sound::MenuConfirm);
                    match self.title_choice {
                        TitleChoice::Play => self.start_game(),
                        TitleChoice::Credits => self.state = GameState::Credits,
                    }
                }
            }
            GameState::Play => {
                let out = self.round.update(input.play(), self.level, &mut self.rng);
                sounds.extend(out.sounds);
                self.fog.update();

                if self.round.dead() && !self.round.in_animation() {
                    self.state = GameState::Lost;
                    self.money.add_score(self.round.score());
                    return sounds;
                }

                let goal = self.balancing.goal_lines();
                if !self.round.in_animation() && self.round.lines() >= goal {
                    if self.level + 1 >= self.config.goal_level {
                        self.state = GameState::Won;
                        self.won_frame = 0;
                        sounds.insert(Sound::Buy);
                    } else {
                        self.state = GameState::Balance;
                        self.balancing.get_choice(&mut self.rng);
                    }
                }
            }
            GameState::Balance => {
                let (finished, menu_sounds) = self.balancing.update(menu);
                sounds.extend(menu_sounds);
                if finished {
                    self.level += 1;
                    self.state = GameState::Play;
                    self.start_round();
                }
            }
            GameState::Lost => {
                let (finished, money_sounds) = self.money.update(menu.confirm);
                sounds.extend(money_sounds);
                if finished {
                    self.state = GameState::Improve;
                    self.level = 0;
                    self.shop.reset();
                }
            }
            GameState::Improve => {
                let (exit, shop_sounds) = self.shop.update(menu, &mut self.money);
                sounds.extend(shop_sounds);
                if exit {
                    self.state = GameState::Title;
                }
            }
            GameState::Won => {
                self.won_frame += 1;
                if self.won_frame >= self.config.won_cycle_frames {
                    self.won_frame = 0;
                    sounds.insert(Sound::TouchGround);
                }
                if self.won_frame == self.config.won_rocket_frame {
                    sounds.insert(Sound::Rocket);
                }
            }
        }

        sounds
    }

    /// Fresh balancing and a new round at level 0.
    fn start_game(&mut self) {
        self.state = GameState::Play;
        self.level = 0;
        self.balancing = Balancing::new(&self.config);
        self.start_round();
    }

    fn start_round(&mut self) {
        let params = self.round_params();
        self.round.init(self.level, params, &mut self.rng);
        self.fog
            .reset(self.balancing.hidden_lines(), self.shop.hide_move_level());
    }

    /// Round parameters derived from balancing and the shop.
    pub fn round_params(&self) -> RoundParams {
        RoundParams {
            speed: self.balancing.speed(),
            death_lines: self.balancing.death_lines(),
            hold_enabled: self.shop.hold_enabled(),
            auto_down_reset: self.shop.auto_down_reset(),
            lives: self.shop.lives(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn title_choice(&self) -> TitleChoice {
        self.title_choice
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn balancing(&self) -> &Balancing {
        &self.balancing
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn money(&self) -> &MoneyHandler {
        &self.money
    }

    pub fn fog(&self) -> &Fog {
        &self.fog
    }

    pub fn won_frame(&self) -> u32 {
        self.won_frame
    }
}
