//! Runner settings and the event log.
//!
//! Settings are read from the environment first; command line flags override
//! them.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::Write;

use anyhow::{anyhow, Result};

use crate::input::KeyLayout;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// RNG seed; random when unset.
    pub seed: Option<u32>,
    pub layout: KeyLayout,
    /// Append-only event log.
    pub log_path: Option<String>,
}

impl Settings {
    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Settings::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let seed = match var("JAM_TETRIS_SEED") {
            Some(v) => Some(parse_seed(&v)?),
            None => None,
        };
        let layout = match var("JAM_TETRIS_KEYS") {
            Some(v) => parse_layout(&v)?,
            None => KeyLayout::default(),
        };

        Ok(Self {
            seed,
            layout,
            log_path: var("JAM_TETRIS_LOG_PATH"),
        })
    }

    /// Apply `--seed N`, `--keys default|wasd` and `--log PATH`.
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = Some(parse_seed(v)?);
                }
                "--keys" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --keys"))?;
                    self.layout = parse_layout(v)?;
                }
                "--log" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --log"))?;
                    self.log_path = Some(v.clone());
                }
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(self)
    }
}

/// Settings from the environment, overridden by `args` (program name
/// excluded).
pub fn load(args: &[String]) -> Result<Settings> {
    Settings::from_env()?.apply_args(args)
}

fn parse_seed(v: &str) -> Result<u32> {
    v.trim()
        .parse::<u32>()
        .map_err(|_| anyhow!("invalid seed: {}", v))
}

fn parse_layout(v: &str) -> Result<KeyLayout> {
    KeyLayout::from_str(v).ok_or_else(|| anyhow!("unknown key layout: {}", v))
}

/// Append-only `[Game] ...` log. Disabled when no path is configured.
///
/// Write failures disable the log instead of interrupting the game.
#[derive(Debug, Default)]
pub struct EventLog {
    file: Option<File>,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn open(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::disabled());
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow!("open log {} failed: {}", path, e))?;
        Ok(Self { file: Some(file) })
    }

    pub fn enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn log(&mut self, msg: impl Display) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if writeln!(file, "[Game] {}", msg).is_err() {
            self.file = None;
        }
    }
}
