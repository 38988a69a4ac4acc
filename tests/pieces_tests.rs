//! Piece catalog, movement and bag tests

use std::collections::HashSet;

use blockfall::core::bag::BagQueue;
use blockfall::core::catalog::{spawn_shape, translate, PIVOT};
use blockfall::core::movement::{
    can_settle_below, move_down, move_horizontal, place, rotate_clockwise, rotate_shape_cw,
    ActivePiece,
};
use blockfall::core::Grid;
use blockfall::types::{Direction, PieceKind, VISIBLE_ROWS};

#[test]
fn test_spawn_shapes_are_four_distinct_cells_in_the_buffer() {
    for kind in PieceKind::ALL {
        let shape = spawn_shape(kind);
        let distinct: HashSet<_> = shape.iter().copied().collect();
        assert_eq!(distinct.len(), 4, "{kind:?}");
        for cell in shape {
            assert!(cell.in_bounds(), "{kind:?} {cell:?}");
            assert!(cell.row as usize >= VISIBLE_ROWS, "{kind:?} {cell:?}");
            assert!((4..=7).contains(&cell.col), "{kind:?} {cell:?}");
        }
    }
}

#[test]
fn test_four_rotations_restore_shape_in_open_field() {
    for kind in PieceKind::ALL {
        let shape = translate(&spawn_shape(kind), -10, 0);
        let mut rotated = shape;
        for _ in 0..4 {
            rotated = rotate_shape_cw(&rotated);
            assert_eq!(rotated[PIVOT], shape[PIVOT]);
        }
        assert_eq!(rotated, shape, "{kind:?}");
    }
}

#[test]
fn test_four_rotations_on_the_grid() {
    for kind in PieceKind::ALL {
        let mut grid = Grid::new();
        let mut piece = ActivePiece::spawn(kind);
        place(&mut grid, &piece);
        for _ in 0..10 {
            move_down(&mut grid, &mut piece);
        }
        let start = piece.shape;

        for _ in 0..4 {
            assert!(rotate_clockwise(&mut grid, &mut piece), "{kind:?}");
        }
        assert_eq!(piece.shape, start, "{kind:?}");
    }
}

#[test]
fn test_o_rotation_follows_pivot_formula() {
    let mut grid = Grid::new();
    let mut piece = ActivePiece::spawn(PieceKind::O);
    place(&mut grid, &piece);

    assert!(rotate_clockwise(&mut grid, &mut piece));
    let expected = rotate_shape_cw(&spawn_shape(PieceKind::O));
    assert_eq!(piece.shape, expected);
    assert_ne!(piece.shape, spawn_shape(PieceKind::O));
    for cell in expected {
        assert_eq!(grid.get(cell.row, cell.col), Ok(Some(PieceKind::O)));
    }
    assert_eq!(grid.cells().iter().filter(|c| c.is_some()).count(), 4);
}

#[test]
fn test_grid_tracks_piece_after_moves() {
    let mut grid = Grid::new();
    let mut piece = ActivePiece::spawn(PieceKind::L);
    place(&mut grid, &piece);

    for step in 0..60 {
        match step % 5 {
            0 => move_horizontal(&mut grid, &mut piece, Direction::Left),
            2 => rotate_clockwise(&mut grid, &mut piece),
            3 => move_horizontal(&mut grid, &mut piece, Direction::Right),
            _ => move_down(&mut grid, &mut piece),
        };

        let filled: Vec<_> = (0..24i8)
            .flat_map(|r| (0..10i8).map(move |c| (r, c)))
            .filter(|&(r, c)| grid.is_occupied(r, c))
            .collect();
        assert_eq!(filled.len(), 4, "stale cells after step {step}");
        for cell in piece.shape {
            assert_eq!(grid.get(cell.row, cell.col), Ok(Some(PieceKind::L)));
        }
    }
    while move_down(&mut grid, &mut piece) {}
    assert!(can_settle_below(&grid, &piece.shape));
}

#[test]
fn test_bag_fairness_over_1000_bags() {
    let mut queue = BagQueue::new(20240601);
    let mut previous: Option<PieceKind> = None;
    let mut streak = 0;

    for bag in 0..1000 {
        let mut seen = HashSet::new();
        for _ in 0..7 {
            let kind = queue.next();
            assert!(seen.insert(kind), "bag {bag} repeated {kind:?}");

            streak = if previous == Some(kind) { streak + 1 } else { 1 };
            assert!(streak <= 2, "{kind:?} appeared {streak} times in a row");
            previous = Some(kind);
        }
        assert_eq!(seen.len(), 7);
    }
    assert_eq!(queue.bags_filled(), 1000);
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = BagQueue::new(1);
    let mut b = BagQueue::new(2);
    let seq_a: Vec<_> = (0..28).map(|_| a.next()).collect();
    let seq_b: Vec<_> = (0..28).map(|_| b.next()).collect();
    assert_ne!(seq_a, seq_b);
}
