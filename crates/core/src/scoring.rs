//! Scoring module - line clear points, drop bonuses, level and speed curve
//!
//! One table is canonical for this engine:
//! - Line clears award `LINE_SCORES[rows]` times the level in effect when the
//!   piece locked (levels start at 1). The multiplier is the 1-based level,
//!   which is `index + 1` for a 0-based level index: a tetris at level 4
//!   scores 4800, at level 3 it scores 3600.
//! - Soft drop awards 1 point per row, hard drop 2 points per row.
//! - Level is `lines / 10 + 1`.
//! - Gravity follows `DROP_INTERVALS`, then holds at `DROP_INTERVAL_FLOOR_MS`.

use crate::types::{
    DROP_INTERVALS, DROP_INTERVAL_FLOOR_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS,
};

/// Calculate line clear score
/// lines: number of rows cleared by one lock (0-4)
/// level: 1-based level at the time of the lock
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&base) => base.saturating_mul(level.max(1)),
        None => 0,
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Level for a running total of cleared lines (1-based)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level (in milliseconds)
///
/// Non-increasing in level and never below the floor.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let index = level.saturating_sub(1) as usize;
    DROP_INTERVALS
        .get(index)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
        .max(DROP_INTERVAL_FLOOR_MS)
}
