//! Headless replay: drive an engine from a command script.
//!
//! A script is a list of command names separated by commas or whitespace,
//! plus `wait:<ms>` tokens that advance the clock frame by frame. Unknown
//! names are skipped, the same way the session ignores commands it does not
//! recognize.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use serde::Serialize;

use crate::core::{GameSnapshot, GameState};
use crate::engine::Engine;
use crate::telemetry::{Achievements, EventLog, Progress};
use crate::types::Command;

/// Seed used when neither the environment nor a flag provides one, so
/// replays are reproducible by default.
pub const DEFAULT_REPLAY_SEED: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Command(Command),
    Wait(u32),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutcome {
    pub snapshot: GameSnapshot,
    pub achievements: Progress,
    pub steps: usize,
    pub skipped: Vec<String>,
}

/// Split a script into steps. Unknown command names are returned separately.
pub fn parse_script(script: &str) -> Result<(Vec<Step>, Vec<String>)> {
    let mut steps = Vec::new();
    let mut skipped = Vec::new();
    for token in script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if let Some(ms) = token.strip_prefix("wait:") {
            let ms = ms
                .parse::<u32>()
                .with_context(|| format!("replay: invalid wait duration {:?}", token))?;
            steps.push(Step::Wait(ms));
        } else if let Some(command) = Command::from_str(token) {
            steps.push(Step::Command(command));
        } else {
            warn!("replay: ignoring unknown command {:?}", token);
            skipped.push(token.to_string());
        }
    }
    Ok((steps, skipped))
}

pub struct Replay {
    engine: Engine,
    achievements: Rc<RefCell<Achievements>>,
    event_log: Option<Rc<RefCell<EventLog<Box<dyn std::io::Write>>>>>,
    tick_ms: u32,
    now_ms: u64,
}

impl Replay {
    pub fn new(seed: u32, tick_ms: u32) -> Self {
        let mut engine = Engine::new(GameState::new(seed));
        let achievements = Rc::new(RefCell::new(Achievements::new()));
        engine.subscribe(Box::new(achievements.clone()));
        engine.start();
        let mut replay = Self {
            engine,
            achievements,
            event_log: None,
            tick_ms: tick_ms.max(1),
            now_ms: 0,
        };
        replay.frame();
        replay
    }

    /// Also write every event to `out` as JSON lines.
    pub fn with_event_log(mut self, out: Box<dyn std::io::Write>) -> Self {
        let log = Rc::new(RefCell::new(EventLog::new(out)));
        self.engine.subscribe(Box::new(log.clone()));
        self.event_log = Some(log);
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn frame(&mut self) {
        self.engine.frame(self.now_ms, |_| ControlFlow::Continue(()));
    }

    pub fn step(&mut self, step: &Step) {
        match *step {
            Step::Command(command) => {
                let changed = self.engine.dispatch(command);
                debug!("replay: {} -> {}", command.as_str(), changed);
            }
            Step::Wait(ms) => {
                let mut remaining = ms;
                while remaining > 0 {
                    let dt = remaining.min(self.tick_ms);
                    self.now_ms += u64::from(dt);
                    remaining -= dt;
                    self.frame();
                }
            }
        }
    }

    pub fn finish(mut self, steps: usize, skipped: Vec<String>) -> Result<ReplayOutcome> {
        self.engine.stop();
        if let Some(log) = &self.event_log {
            log.try_borrow_mut()
                .map_err(|_| anyhow!("event log still in use"))?
                .flush()?;
        }
        let achievements = self.achievements.borrow().progress();
        Ok(ReplayOutcome {
            snapshot: *self.engine.snapshot(),
            achievements,
            steps,
            skipped,
        })
    }
}

/// Parse and run `script` from a fresh session.
pub fn run_script(
    script: &str,
    seed: u32,
    tick_ms: u32,
    event_log: Option<Box<dyn std::io::Write>>,
) -> Result<ReplayOutcome> {
    let (steps, skipped) = parse_script(script)?;
    let mut replay = Replay::new(seed, tick_ms);
    if let Some(out) = event_log {
        replay = replay.with_event_log(out);
    }
    for step in &steps {
        replay.step(step);
    }
    replay.finish(steps.len(), skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mixed_separators() {
        let (steps, skipped) = parse_script("start, left  wait:100,jump").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Command(Command::Start),
                Step::Command(Command::MoveLeft),
                Step::Wait(100),
            ]
        );
        assert_eq!(skipped, vec!["jump".to_string()]);
    }

    #[test]
    fn bad_wait_is_an_error() {
        assert!(parse_script("wait:soon").is_err());
    }

    #[test]
    fn wait_drives_gravity() {
        let out = run_script("start wait:1000", 1, 16, None).unwrap();
        let active = out.snapshot.active.unwrap();
        // Spawned with its top cell on row 0, then one gravity step.
        let top = active.shape.top_filled_row() as i8;
        assert_eq!(active.y + top, 1);
    }
}
