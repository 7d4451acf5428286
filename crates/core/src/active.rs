//! Active piece controller
//!
//! Holds the falling piece and validates every move against the board before
//! committing it. Rejected moves leave the piece untouched.

use crate::board::Board;
use crate::pieces::{base_shape, try_rotate, MinoOffset, Shape};
use crate::types::{ColorId, PieceKind, Rotation, BOARD_WIDTH};

/// The currently falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: ColorId,
    pub rotation: Rotation,
    /// Column of the shape matrix's left edge.
    pub x: i8,
    /// Row of the shape matrix's top edge (negative while hanging above the board).
    pub y: i8,
}

impl ActivePiece {
    /// Spawn position for `kind`: horizontally centered, with its topmost
    /// filled cell on row 0.
    pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
        let shape = base_shape(kind);
        let x = (BOARD_WIDTH as i8 - shape.size() as i8) / 2;
        let y = -(shape.top_filled_row() as i8);
        (x, y)
    }

    /// Create `kind` at its spawn position.
    ///
    /// Returns `None` when the spawn position already collides, which the
    /// session treats as game over.
    pub fn spawn(kind: PieceKind, board: &Board) -> Option<Self> {
        let (x, y) = Self::spawn_position(kind);
        let piece = Self {
            kind,
            shape: base_shape(kind),
            color: kind.color_id(),
            rotation: Rotation::North,
            x,
            y,
        };
        if board.collides(&piece.shape, piece.x, piece.y) {
            None
        } else {
            Some(piece)
        }
    }

    /// Absolute board coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Translate by (dx, dy) if the result does not collide.
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let x = self.x + dx;
        let y = self.y + dy;
        if board.collides(&self.shape, x, y) {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }

    /// Turn clockwise, trying each wall kick in order.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let Some((shape, (dx, dy))) =
            try_rotate(&self.shape, self.x, self.y, |s, x, y| board.collides(s, x, y))
        else {
            return false;
        };

        *self = Self {
            shape,
            rotation: self.rotation.rotate_cw(),
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        };
        true
    }

    /// Fall until blocked. Returns the number of rows dropped; locking is
    /// left to the caller.
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        let mut dropped = 0;
        while self.try_move(board, 0, 1) {
            dropped += 1;
        }
        dropped
    }

    /// Origin row this piece would land on after an immediate hard drop.
    pub fn landing_row(&self, board: &Board) -> i8 {
        self.y + board.drop_distance(&self.shape, self.x, self.y) as i8
    }

    /// Whether the piece is resting on the floor or the stack.
    pub fn is_grounded(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y + 1)
    }
}
