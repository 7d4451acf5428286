//! Runtime configuration.
//!
//! Environment variables provide defaults; command-line flags override them.
//!
//! - `GAMEBOY_TETRIS_SEED`: piece bag seed (default: time based for `play`, 1 for `replay`)
//! - `GAMEBOY_TETRIS_TICK_MS`: frame interval (default: 16)
//! - `GAMEBOY_TETRIS_DAS_MS`: held-key delay (default: 150)
//! - `GAMEBOY_TETRIS_ARR_MS`: held-key repeat interval (default: 50)
//! - `GAMEBOY_TETRIS_EVENT_LOG`: JSON-lines event log path (default: none)
//!
//! Malformed environment values fall back to the default; malformed flags
//! are errors.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::warn;

use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS, TICK_MS};

pub const USAGE: &str = "\
usage: gameboy-tetris [play] [options]
       gameboy-tetris replay <commands> [options]

commands (replay): start, left, right, down, drop, rotate, pause, restart,
                   wait:<ms>; separated by commas or spaces

options:
  --seed <n>          piece bag seed
  --tick-ms <ms>      frame interval
  --das-ms <ms>       held-key delay before repeating
  --arr-ms <ms>       held-key repeat interval
  --event-log <path>  write every game event as a JSON line
  -h, --help          show this help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Play,
    Replay { script: String },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: Mode,
    pub seed: Option<u32>,
    pub tick_ms: u32,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub event_log: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Play,
            seed: None,
            tick_ms: TICK_MS,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            event_log: None,
        }
    }
}

impl AppConfig {
    /// Build from the process environment and `args` (without argv[0]).
    pub fn from_env_and_args(args: &[String]) -> Result<Self> {
        Self::from_sources(|key| std::env::var(key).ok(), args)
    }

    pub fn from_sources(env: impl Fn(&str) -> Option<String>, args: &[String]) -> Result<Self> {
        let mut config = Self::from_env(env);
        config.apply_args(args)?;
        Ok(config)
    }

    fn from_env(env: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            env(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let number = |key: &str, default: u32| match var(key) {
            Some(s) => s.parse().unwrap_or_else(|_| {
                warn!("{}: ignoring invalid value {:?}", key, s);
                default
            }),
            None => default,
        };

        let defaults = Self::default();
        Self {
            mode: Mode::Play,
            seed: var("GAMEBOY_TETRIS_SEED").and_then(|s| s.parse().ok()),
            tick_ms: number("GAMEBOY_TETRIS_TICK_MS", defaults.tick_ms),
            das_ms: number("GAMEBOY_TETRIS_DAS_MS", defaults.das_ms),
            arr_ms: number("GAMEBOY_TETRIS_ARR_MS", defaults.arr_ms),
            event_log: var("GAMEBOY_TETRIS_EVENT_LOG").map(PathBuf::from),
        }
    }

    fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        let mut script: Option<String> = None;
        let mut replay = false;

        while i < args.len() {
            match args[i].as_str() {
                "play" if i == 0 => {}
                "replay" if i == 0 => replay = true,
                "-h" | "--help" => self.mode = Mode::Help,
                "--seed" => {
                    let v = take_value(args, &mut i, "--seed")?;
                    self.seed = Some(parse_num("--seed", v)?);
                }
                "--tick-ms" => {
                    let v = take_value(args, &mut i, "--tick-ms")?;
                    self.tick_ms = parse_num("--tick-ms", v)?;
                }
                "--das-ms" => {
                    let v = take_value(args, &mut i, "--das-ms")?;
                    self.das_ms = parse_num("--das-ms", v)?;
                }
                "--arr-ms" => {
                    let v = take_value(args, &mut i, "--arr-ms")?;
                    self.arr_ms = parse_num("--arr-ms", v)?;
                }
                "--event-log" => {
                    self.event_log = Some(PathBuf::from(take_value(args, &mut i, "--event-log")?));
                }
                other if other.starts_with('-') => {
                    return Err(anyhow!("unknown option: {}", other));
                }
                other if replay => match script.as_mut() {
                    Some(s) => {
                        s.push(' ');
                        s.push_str(other);
                    }
                    None => script = Some(other.to_string()),
                },
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }

        if self.tick_ms == 0 {
            return Err(anyhow!("--tick-ms must be greater than zero"));
        }
        if self.mode != Mode::Help && replay {
            let script = script.ok_or_else(|| anyhow!("replay: missing command list"))?;
            self.mode = Mode::Replay { script };
        }
        Ok(())
    }
}

fn take_value<'a>(args: &'a [String], i: &mut usize, name: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", name))
}

fn parse_num(name: &str, s: &str) -> Result<u32> {
    s.parse::<u32>()
        .with_context(|| format!("invalid value for {}: {}", name, s))
}
