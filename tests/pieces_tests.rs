//! Piece catalog and rotation tests

use proptest::prelude::*;

use gameboy_tetris::core::{base_shape, get_shape, try_rotate, ActivePiece, Board, KICKS};
use gameboy_tetris::types::{ColorId, PieceKind, Rotation};

fn offsets(kind: PieceKind, rotation: Rotation) -> Vec<(i8, i8)> {
    get_shape(kind, rotation).filled_cells().collect()
}

#[test]
fn test_i_piece_shapes() {
    assert_eq!(offsets(PieceKind::I, Rotation::North), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(offsets(PieceKind::I, Rotation::East), [(2, 0), (2, 1), (2, 2), (2, 3)]);
    assert_eq!(offsets(PieceKind::I, Rotation::South), [(0, 2), (1, 2), (2, 2), (3, 2)]);
    assert_eq!(offsets(PieceKind::I, Rotation::West), [(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_o_piece_shapes() {
    let north = offsets(PieceKind::O, Rotation::North);
    assert_eq!(north, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert_eq!(offsets(PieceKind::O, Rotation::East), north);
    assert_eq!(offsets(PieceKind::O, Rotation::South), north);
    assert_eq!(offsets(PieceKind::O, Rotation::West), north);
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(offsets(PieceKind::T, Rotation::North), [(1, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(offsets(PieceKind::T, Rotation::East), [(1, 0), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(offsets(PieceKind::T, Rotation::South), [(0, 1), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(offsets(PieceKind::T, Rotation::West), [(1, 0), (0, 1), (1, 1), (1, 2)]);
}

#[test]
fn test_s_and_z_base_shapes() {
    assert_eq!(offsets(PieceKind::S, Rotation::North), [(1, 0), (2, 0), (0, 1), (1, 1)]);
    assert_eq!(offsets(PieceKind::Z, Rotation::North), [(0, 0), (1, 0), (1, 1), (2, 1)]);
}

#[test]
fn test_j_and_l_base_shapes() {
    assert_eq!(offsets(PieceKind::J, Rotation::North), [(0, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(offsets(PieceKind::L, Rotation::North), [(2, 0), (0, 1), (1, 1), (2, 1)]);
}

#[test]
fn test_color_ids_are_fixed() {
    let ids: Vec<u8> = PieceKind::ALL.iter().map(|k| k.color_id().get()).collect();
    assert_eq!(ids, [1, 2, 3, 4, 5, 6, 7]);
    for kind in PieceKind::ALL {
        assert_eq!(kind.color_id().kind(), Some(kind));
    }
}

#[test]
fn test_kick_order() {
    assert_eq!(KICKS, [(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)]);
}

#[test]
fn test_try_rotate_kicks_up_off_the_floor() {
    let mut board = Board::new();
    // A T sitting on a three-cell ledge in row 19.
    board.set(4, 19, Some(ColorId(1)));
    board.set(3, 19, Some(ColorId(1)));
    board.set(5, 19, Some(ColorId(1)));

    let t = base_shape(PieceKind::T);
    // East orientation from (3, 17) needs rows 17..=19 in column 4.
    let (_, kick) = try_rotate(&t, 3, 17, |s, x, y| board.collides(s, x, y)).unwrap();
    assert_eq!(kick, (0, -1));
}

#[test]
fn test_active_rotation_cycles_through_all_states() {
    let board = Board::new();
    let mut piece = ActivePiece::spawn(PieceKind::J, &board).unwrap();
    piece.y = 8;
    let mut seen = Vec::new();
    for _ in 0..4 {
        assert!(piece.try_rotate(&board));
        seen.push(piece.rotation);
    }
    assert_eq!(
        seen,
        [Rotation::East, Rotation::South, Rotation::West, Rotation::North]
    );
    assert_eq!(piece.shape, base_shape(PieceKind::J));
}

proptest! {
    #[test]
    fn prop_four_rotations_return_to_base(
        kind in prop::sample::select(PieceKind::ALL.to_vec()),
        x in 2i8..6,
        y in 4i8..14,
    ) {
        let board = Board::new();
        let base = base_shape(kind);
        let mut shape = base;
        for _ in 0..4 {
            let (next, kick) = try_rotate(&shape, x, y, |s, x, y| board.collides(s, x, y))
                .expect("open board always has room");
            prop_assert_eq!(kick, (0, 0));
            shape = next;
        }
        prop_assert_eq!(shape, base);
    }

    #[test]
    fn prop_every_orientation_has_four_cells(
        kind in prop::sample::select(PieceKind::ALL.to_vec()),
        turns in 0usize..8,
    ) {
        let mut shape = base_shape(kind);
        for _ in 0..turns {
            shape = shape.rotated_cw();
        }
        prop_assert_eq!(shape.filled_cells().count(), 4);
    }
}
