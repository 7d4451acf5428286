//! Render adapter - snapshot to draw primitives
//!
//! A pure function of [`GameSnapshot`]. Raster targets (the terminal view,
//! tests, headless tools) consume the resulting ops in order: locked cells,
//! ghost, active piece, next preview, stats, then at most one overlay.

use serde::Serialize;

use crate::board::Board;
use crate::pieces::base_shape;
use crate::snapshot::GameSnapshot;
use crate::types::{ColorId, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    /// Locked board cell.
    Cell { x: u8, y: u8, color: ColorId },
    /// Landing preview of the active piece.
    Ghost { x: u8, y: u8 },
    Active { x: u8, y: u8, color: ColorId },
    /// Cell of the next piece, relative to its preview box.
    Next { dx: u8, dy: u8, color: ColorId },
    Stat { label: &'static str, value: u32 },
    Overlay { text: &'static str },
}

pub type DrawList = Vec<DrawOp>;

pub const OVERLAY_PAUSED: &str = "PAUSED";
pub const OVERLAY_GAME_OVER: &str = "GAME OVER";
pub const OVERLAY_PRESS_START: &str = "PRESS START";

pub fn overlay_text(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::NotStarted => Some(OVERLAY_PRESS_START),
        Phase::Running => None,
        Phase::Paused => Some(OVERLAY_PAUSED),
        Phase::GameOver => Some(OVERLAY_GAME_OVER),
    }
}

fn on_board(x: i8, y: i8) -> Option<(u8, u8)> {
    if x < 0 || y < 0 {
        return None;
    }
    let (x, y) = (x as u8, y as u8);
    if (x as usize) < crate::board::COLS && (y as usize) < crate::board::ROWS {
        Some((x, y))
    } else {
        None
    }
}

pub fn draw_list(snapshot: &GameSnapshot) -> DrawList {
    let mut out = DrawList::with_capacity(64);
    draw_into(snapshot, &mut out);
    out
}

/// Same as [`draw_list`], reusing `out`'s allocation.
pub fn draw_into(snapshot: &GameSnapshot, out: &mut DrawList) {
    out.clear();

    for (y, row) in snapshot.board.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            if let Some(color) = ColorId::from_u8(v) {
                out.push(DrawOp::Cell {
                    x: x as u8,
                    y: y as u8,
                    color,
                });
            }
        }
    }

    if let Some(active) = snapshot.active {
        let board = Board::from_grid(&snapshot.board);
        let distance = board.drop_distance(&active.shape, active.x, active.y) as i8;
        if distance > 0 {
            for (dx, dy) in active.shape.filled_cells() {
                if let Some((x, y)) = on_board(active.x + dx, active.y + dy + distance) {
                    out.push(DrawOp::Ghost { x, y });
                }
            }
        }

        let color = active.kind.color_id();
        for (dx, dy) in active.shape.filled_cells() {
            if let Some((x, y)) = on_board(active.x + dx, active.y + dy) {
                out.push(DrawOp::Active { x, y, color });
            }
        }
    }

    let next_color = snapshot.next.color_id();
    for (dx, dy) in base_shape(snapshot.next).filled_cells() {
        out.push(DrawOp::Next {
            dx: dx as u8,
            dy: dy as u8,
            color: next_color,
        });
    }

    out.push(DrawOp::Stat {
        label: "SCORE",
        value: snapshot.score,
    });
    out.push(DrawOp::Stat {
        label: "LINES",
        value: snapshot.lines,
    });
    out.push(DrawOp::Stat {
        label: "LEVEL",
        value: snapshot.level,
    });

    if let Some(text) = overlay_text(snapshot.phase) {
        out.push(DrawOp::Overlay { text });
    }
}
