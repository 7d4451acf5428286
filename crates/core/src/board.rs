//! The playfield: locked cells, collision tests and row compaction
//!
//! The board is a 10x20 grid where each cell is either empty or holds the
//! color id of a locked piece. Uses a flat array for cache locality and no
//! allocation. Coordinates: (x, y) where x ranges 0..9 (left to right) and
//! y ranges 0..19 (top to bottom). Rows above the board (y < 0) exist only for
//! pieces spawning partially out of view; they are never stored.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, ColorId, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Number of rows, as a `usize` for array bounds.
pub const ROWS: usize = BOARD_HEIGHT as usize;

/// Number of columns, as a `usize` for array bounds.
pub const COLS: usize = BOARD_WIDTH as usize;

/// Row indices removed by one clear pass, top to bottom.
pub type ClearedRows = ArrayVec<usize, ROWS>;

/// Locked cells of the 10x20 playfield, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Rebuild a board from a snapshot grid (0 = empty, otherwise color id).
    pub fn from_grid(grid: &[[u8; COLS]; ROWS]) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                board.cells[y * COLS + x] = ColorId::from_u8(v);
            }
        }
        board
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// `None` off the board, `Some(cell)` otherwise.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Writes are ignored off the board; the result says whether it landed.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `shape` placed with its matrix origin at (x, y) hits a wall,
    /// the floor, or a filled cell.
    ///
    /// Horizontal and floor bounds apply to every filled cell. Occupancy is
    /// only tested for rows >= 0, so pieces may hang above the visible area.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.filled_cells().any(|(dx, dy)| {
            let px = x as i16 + dx as i16;
            let py = y as i16 + dy as i16;
            if px < 0 || px >= BOARD_WIDTH as i16 || py >= BOARD_HEIGHT as i16 {
                return true;
            }
            py >= 0 && self.is_occupied(px as i8, py as i8)
        })
    }

    /// Number of rows `shape` can fall from (x, y) before it would collide.
    ///
    /// Shared by hard drop and ghost-piece previews.
    pub fn drop_distance(&self, shape: &Shape, x: i8, y: i8) -> u32 {
        let mut distance: i16 = 0;
        while !self.collides(shape, x, (y as i16 + distance + 1) as i8) {
            distance += 1;
            // A shape with no filled cells would never stop.
            if distance > BOARD_HEIGHT as i16 + MAX_SPAWN_OVERHANG {
                break;
            }
        }
        distance as u32
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        let start = y * COLS;
        self.cells[start..start + COLS].iter().all(|cell| cell.is_some())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        let start = y * COLS;
        self.cells[start..start + COLS].iter().all(|cell| cell.is_none())
    }

    /// Write every filled cell of `shape` at (x, y) into the board.
    ///
    /// Cells landing on negative rows are dropped. Callers must only lock a
    /// placement for which [`Board::collides`] returned false.
    pub fn lock(&mut self, shape: &Shape, color: ColorId, x: i8, y: i8) {
        debug_assert!(
            !self.collides(shape, x, y),
            "lock called on a colliding placement at ({}, {})",
            x,
            y
        );
        for (dx, dy) in shape.filled_cells() {
            let py = y + dy;
            if py < 0 {
                continue;
            }
            self.set(x + dx, py, Some(color));
        }
    }

    /// Remove all full rows, shift the remaining rows down, and refill the top
    /// with empty rows. Returns the removed row indices (top to bottom); its
    /// length is the number of lines cleared.
    ///
    /// Uses a two-pointer compaction with no allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = ROWS;

        // Scan from bottom to top
        for read_y in (0..ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * COLS;
                    let dst_start = write_y * COLS;
                    self.cells.copy_within(src_start..src_start + COLS, dst_start);
                }
            }
        }

        // Fresh empty rows at the top
        self.cells[..write_y * COLS].fill(None);

        cleared_rows.reverse();
        cleared_rows
    }

    /// Count of filled cells (used by diagnostics and invariants).
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLS)
    }

    /// Write the board into a snapshot grid (0 = empty, otherwise color id).
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s.map(ColorId::get).unwrap_or(0);
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

/// Deepest a spawned bounding box can start above row 0.
const MAX_SPAWN_OVERHANG: i16 = crate::pieces::MAX_SHAPE_SIZE as i16;

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
