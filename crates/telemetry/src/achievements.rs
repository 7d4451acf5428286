//! Achievement tracking.
//!
//! Stats are bumped from session events; after every update each locked
//! badge is checked against its threshold and unlocked at most once.

use log::info;
use serde::Serialize;

use gameboy_tetris_core::GameSnapshot;
use gameboy_tetris_engine::GameObserver;
use gameboy_tetris_types::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    GamesStarted,
    LinesCleared,
    Tetrises,
    MaxLevel,
    GamesFinished,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub games_started: u32,
    pub lines_cleared: u32,
    pub tetrises: u32,
    pub max_level: u32,
    pub games_finished: u32,
}

impl Stats {
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::GamesStarted => self.games_started,
            Stat::LinesCleared => self.lines_cleared,
            Stat::Tetrises => self.tetrises,
            Stat::MaxLevel => self.max_level,
            Stat::GamesFinished => self.games_finished,
        }
    }

    fn get_mut(&mut self, stat: Stat) -> &mut u32 {
        match stat {
            Stat::GamesStarted => &mut self.games_started,
            Stat::LinesCleared => &mut self.lines_cleared,
            Stat::Tetrises => &mut self.tetrises,
            Stat::MaxLevel => &mut self.max_level,
            Stat::GamesFinished => &mut self.games_finished,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub stat: Stat,
    pub threshold: u32,
}

pub const CATALOG_LEN: usize = 6;

pub static CATALOG: [Achievement; CATALOG_LEN] = [
    Achievement {
        id: "first_game",
        name: "First Steps",
        description: "Start your first game",
        stat: Stat::GamesStarted,
        threshold: 1,
    },
    Achievement {
        id: "line_clearer",
        name: "Line Clearer",
        description: "Clear 10 lines",
        stat: Stat::LinesCleared,
        threshold: 10,
    },
    Achievement {
        id: "four_in_a_row",
        name: "Four in a Row",
        description: "Clear 4 lines with one piece",
        stat: Stat::Tetrises,
        threshold: 1,
    },
    Achievement {
        id: "speed_demon",
        name: "Speed Demon",
        description: "Reach level 5",
        stat: Stat::MaxLevel,
        threshold: 5,
    },
    Achievement {
        id: "centurion",
        name: "Centurion",
        description: "Clear 100 lines",
        stat: Stat::LinesCleared,
        threshold: 100,
    },
    Achievement {
        id: "veteran",
        name: "Veteran",
        description: "Finish 10 games",
        stat: Stat::GamesFinished,
        threshold: 10,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub unlocked: Vec<&'static str>,
    pub total: usize,
    /// Whole percent of the catalog unlocked.
    pub completion_percent: u32,
    pub stats: Stats,
}

#[derive(Debug, Clone, Default)]
pub struct Achievements {
    stats: Stats,
    unlocked: [bool; CATALOG_LEN],
    newly_unlocked: Vec<&'static Achievement>,
}

impl Achievements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        CATALOG
            .iter()
            .zip(self.unlocked.iter())
            .any(|(a, &u)| u && a.id == id)
    }

    /// Add `delta` to a counter and unlock anything it crosses.
    pub fn update_stat(&mut self, stat: Stat, delta: u32) {
        let v = self.stats.get_mut(stat);
        *v = v.saturating_add(delta);
        self.check();
    }

    /// Raise a high-water-mark stat; lower values are ignored.
    pub fn record_max(&mut self, stat: Stat, value: u32) {
        let v = self.stats.get_mut(stat);
        if value > *v {
            *v = value;
            self.check();
        }
    }

    fn check(&mut self) {
        for (achievement, unlocked) in CATALOG.iter().zip(self.unlocked.iter_mut()) {
            if !*unlocked && self.stats.get(achievement.stat) >= achievement.threshold {
                *unlocked = true;
                info!("achievement unlocked: {}", achievement.name);
                self.newly_unlocked.push(achievement);
            }
        }
    }

    /// Badges unlocked since the last call, oldest first.
    pub fn take_unlocked(&mut self) -> Vec<&'static Achievement> {
        std::mem::take(&mut self.newly_unlocked)
    }

    pub fn progress(&self) -> Progress {
        let unlocked: Vec<_> = CATALOG
            .iter()
            .zip(self.unlocked.iter())
            .filter(|(_, u)| **u)
            .map(|(a, _)| a.id)
            .collect();
        let total = CATALOG.len();
        Progress {
            completion_percent: (unlocked.len() * 100 / total) as u32,
            unlocked,
            total,
            stats: self.stats,
        }
    }
}

impl GameObserver for Achievements {
    fn on_event(&mut self, event: &GameEvent, _snapshot: &GameSnapshot) {
        match *event {
            GameEvent::GameStarted { .. } => self.update_stat(Stat::GamesStarted, 1),
            GameEvent::LinesCleared { count } => {
                self.update_stat(Stat::LinesCleared, count);
                if count == 4 {
                    self.update_stat(Stat::Tetrises, 1);
                }
            }
            GameEvent::LevelChanged { level } => self.record_max(Stat::MaxLevel, level),
            GameEvent::GameOver { level, .. } => {
                self.record_max(Stat::MaxLevel, level);
                self.update_stat(Stat::GamesFinished, 1);
            }
            GameEvent::PieceLocked { .. } | GameEvent::Paused | GameEvent::Resumed => {}
        }
    }
}
