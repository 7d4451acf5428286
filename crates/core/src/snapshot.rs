use serde::{Deserialize, Serialize};

use crate::active::ActivePiece;
use crate::board::{COLS, ROWS};
use crate::pieces::Shape;
use crate::scoring::{calculate_level, get_drop_interval_ms};
use crate::types::{PieceKind, Phase, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of a session, the only thing render targets consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Row-major grid, 0 = empty, otherwise the locked cell's color id.
    pub board: [[u8; COLS]; ROWS],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub phase: Phase,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub episode: u32,
}

impl GameSnapshot {
    /// Reset to the view of a fresh, unstarted session.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Frames that cannot change without input (used for render throttling).
    pub fn is_static(&self) -> bool {
        self.phase != Phase::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let level = calculate_level(0);
        Self {
            board: [[0u8; COLS]; ROWS],
            active: None,
            next: PieceKind::I,
            phase: Phase::NotStarted,
            score: 0,
            lines: 0,
            level,
            drop_interval_ms: get_drop_interval_ms(level),
            episode: 0,
        }
    }
}
