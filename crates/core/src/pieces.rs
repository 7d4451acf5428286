//! Pieces module - the piece catalog and matrix rotation
//!
//! Every kind is stored once, in its base orientation, as a square boolean
//! matrix (2x2 for O, 4x4 for I, 3x3 for the rest). Rotations are derived by
//! turning that matrix clockwise; the catalog itself is never mutated.

use crate::types::{PieceKind, Rotation};

/// Largest matrix edge in the catalog (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single filled cell relative to the matrix origin
pub type MinoOffset = (i8, i8);

/// Square boolean matrix describing one orientation of a piece.
///
/// Only the top-left `size x size` region is meaningful; the rest stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawShape")]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

/// Wire form of [`Shape`], checked before it becomes one.
#[derive(serde::Deserialize)]
struct RawShape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl TryFrom<RawShape> for Shape {
    type Error = String;

    fn try_from(raw: RawShape) -> Result<Self, Self::Error> {
        if raw.size as usize > MAX_SHAPE_SIZE {
            return Err(format!(
                "shape size {} exceeds {}",
                raw.size, MAX_SHAPE_SIZE
            ));
        }
        let n = raw.size as usize;
        let mut cells = raw.cells;
        // Cells outside the bounding box stay empty.
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell &= x < n && y < n;
            }
        }
        Ok(Self {
            size: raw.size,
            cells,
        })
    }
}

impl Shape {
    /// Build a shape from per-row bit masks, `0b1000` being the leftmost column.
    pub const fn from_masks(size: u8, masks: [u8; MAX_SHAPE_SIZE]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < MAX_SHAPE_SIZE {
            let mut x = 0;
            while x < MAX_SHAPE_SIZE {
                cells[y][x] = (y as u8) < size
                    && (x as u8) < size
                    && masks[y] & (0b1000 >> x) != 0;
                x += 1;
            }
            y += 1;
        }
        Self { size, cells }
    }

    /// Edge length of the bounding box.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at column `x`, row `y` of the bounding box is filled.
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.size && y < self.size && self.cells[y as usize][x as usize]
    }

    /// Return this matrix turned 90° clockwise.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - x][y];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Iterate filled cells as `(dx, dy)` offsets within the bounding box.
    pub fn filled_cells(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        let n = self.size;
        (0..n).flat_map(move |y| {
            (0..n)
                .filter(move |&x| self.is_filled(x, y))
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Index of the first row containing a filled cell.
    pub fn top_filled_row(&self) -> u8 {
        (0..self.size)
            .find(|&y| (0..self.size).any(|x| self.is_filled(x, y)))
            .unwrap_or(0)
    }
}

const I_SHAPE: Shape = Shape::from_masks(4, [0b0000, 0b1111, 0b0000, 0b0000]);
const O_SHAPE: Shape = Shape::from_masks(2, [0b1100, 0b1100, 0b0000, 0b0000]);
const T_SHAPE: Shape = Shape::from_masks(3, [0b0100, 0b1110, 0b0000, 0b0000]);
const S_SHAPE: Shape = Shape::from_masks(3, [0b0110, 0b1100, 0b0000, 0b0000]);
const Z_SHAPE: Shape = Shape::from_masks(3, [0b1100, 0b0110, 0b0000, 0b0000]);
const J_SHAPE: Shape = Shape::from_masks(3, [0b1000, 0b1110, 0b0000, 0b0000]);
const L_SHAPE: Shape = Shape::from_masks(3, [0b0010, 0b1110, 0b0000, 0b0000]);

/// Catalog entry for a kind in its base (North) orientation.
pub fn base_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Shape of `kind` after turning the base orientation clockwise to `rotation`.
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> Shape {
    let mut shape = base_shape(kind);
    for _ in 0..rotation.quarter_turns() {
        shape = shape.rotated_cw();
    }
    shape
}

/// Offsets tried, in order, when a rotation collides at the current origin:
/// in place, left, right, up, up-left, up-right.
pub const KICKS: [(i8, i8); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

/// Try to rotate a shape clockwise with wall kicks
///
/// `collides(shape, x, y)` is the board's collision test. Returns the rotated
/// shape and the kick offset that was accepted, or `None` if every kick collides.
pub fn try_rotate(
    shape: &Shape,
    x: i8,
    y: i8,
    collides: impl Fn(&Shape, i8, i8) -> bool,
) -> Option<(Shape, (i8, i8))> {
    let rotated = shape.rotated_cw();
    KICKS
        .iter()
        .copied()
        .find(|&(dx, dy)| !collides(&rotated, x + dx, y + dy))
        .map(|kick| (rotated, kick))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(shape: &Shape) -> Vec<MinoOffset> {
        shape.filled_cells().collect()
    }

    #[test]
    fn test_oversized_shape_is_rejected_on_load() {
        let mut json = serde_json::to_value(base_shape(PieceKind::T)).unwrap();
        json["size"] = serde_json::json!(5);
        assert!(serde_json::from_value::<Shape>(json).is_err());

        let json = serde_json::to_value(base_shape(PieceKind::I)).unwrap();
        let back: Shape = serde_json::from_value(json).unwrap();
        assert_eq!(back, base_shape(PieceKind::I));
    }

    #[test]
    fn every_catalog_piece_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(base_shape(kind).filled_cells().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn catalog_sizes_match_kinds() {
        assert_eq!(base_shape(PieceKind::I).size(), 4);
        assert_eq!(base_shape(PieceKind::O).size(), 2);
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(base_shape(kind).size(), 3);
        }
    }

    #[test]
    fn t_rotates_clockwise() {
        let north = base_shape(PieceKind::T);
        assert_eq!(offsets(&north), vec![(1, 0), (0, 1), (1, 1), (2, 1)]);

        // Nub points right after one clockwise turn.
        let east = north.rotated_cw();
        assert_eq!(offsets(&east), vec![(1, 0), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn i_rotates_into_column_two() {
        let east = base_shape(PieceKind::I).rotated_cw();
        assert_eq!(offsets(&east), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn four_turns_return_to_base() {
        for kind in PieceKind::ALL {
            let base = base_shape(kind);
            let back = base.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, base, "{:?}", kind);
        }
    }

    #[test]
    fn o_is_rotation_invariant() {
        let o = base_shape(PieceKind::O);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn get_shape_matches_repeated_rotation() {
        let base = base_shape(PieceKind::L);
        assert_eq!(get_shape(PieceKind::L, Rotation::North), base);
        assert_eq!(get_shape(PieceKind::L, Rotation::South), base.rotated_cw().rotated_cw());
    }

    #[test]
    fn top_filled_row_of_i_is_one() {
        assert_eq!(base_shape(PieceKind::I).top_filled_row(), 1);
        assert_eq!(base_shape(PieceKind::T).top_filled_row(), 0);
    }

    #[test]
    fn try_rotate_takes_first_free_kick() {
        let t = base_shape(PieceKind::T);
        // Everything except the "right" kick collides.
        let result = try_rotate(&t, 0, 5, |_, x, y| !(x == 1 && y == 5));
        let (shape, kick) = result.unwrap();
        assert_eq!(kick, (1, 0));
        assert_eq!(shape, t.rotated_cw());

        assert!(try_rotate(&t, 0, 5, |_, _, _| true).is_none());
    }
}
