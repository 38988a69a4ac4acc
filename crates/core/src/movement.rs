//! Collision and movement rules
//!
//! The live piece is always written into the grid, so every occupancy check
//! has to ignore the piece's own cells. Membership is decided by comparing
//! coordinates by value.
//!
//! Every mutating function here is all-or-nothing: either the old cells are
//! cleared, the shape updated and the new cells written, or the grid is left
//! exactly as it was and `false` is returned.

use crate::catalog::{shape_contains, spawn_shape, translate, Shape, PIVOT};
use crate::grid::Grid;
use crate::types::{Coord, Direction, PieceKind, GRID_COLS, GRID_ROWS};

/// The falling piece: its kind plus the four cells it currently covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl ActivePiece {
    /// A piece of `kind` in its spawn position. Not yet written to any grid.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: spawn_shape(kind),
        }
    }
}

/// Whether `coord` could hold a cell of the piece currently covering `own`.
fn is_free(grid: &Grid, coord: Coord, own: &Shape) -> bool {
    grid.in_bounds(coord) && (grid.is_empty_at(coord.row, coord.col) || shape_contains(own, coord))
}

/// True if the shape is resting: a cell sits on the floor or directly on top
/// of a filled cell that is not part of the shape.
pub fn can_settle_below(grid: &Grid, shape: &Shape) -> bool {
    shape.iter().any(|cell| {
        if cell.row == 0 {
            return true;
        }
        let below = cell.offset(-1, 0);
        grid.is_occupied(below.row, below.col) && !shape_contains(shape, below)
    })
}

/// Write the piece's cells into the grid.
pub fn place(grid: &mut Grid, piece: &ActivePiece) {
    for cell in piece.shape.iter() {
        grid.set(cell.row, cell.col, Some(piece.kind));
    }
}

/// Clear the cells covered by `shape`.
pub fn erase(grid: &mut Grid, shape: &Shape) {
    for cell in shape.iter() {
        grid.set(cell.row, cell.col, None);
    }
}

/// Whether every cell of `shape` can be written without touching a filled
/// cell that belongs to someone else.
pub fn fits(grid: &Grid, shape: &Shape) -> bool {
    shape
        .iter()
        .all(|&cell| grid.in_bounds(cell) && grid.is_empty_at(cell.row, cell.col))
}

fn commit(grid: &mut Grid, piece: &mut ActivePiece, shape: Shape) {
    erase(grid, &piece.shape);
    piece.shape = shape;
    place(grid, piece);
}

/// Move the piece one row down.
pub fn move_down(grid: &mut Grid, piece: &mut ActivePiece) -> bool {
    if piece.shape.iter().any(|cell| cell.row == 0) || can_settle_below(grid, &piece.shape) {
        return false;
    }
    let moved = translate(&piece.shape, -1, 0);
    commit(grid, piece, moved);
    true
}

/// Move the piece one column left or right.
pub fn move_horizontal(grid: &mut Grid, piece: &mut ActivePiece, direction: Direction) -> bool {
    let d_col = direction.delta();
    let moved = translate(&piece.shape, 0, d_col);
    if !moved.iter().all(|&cell| is_free(grid, cell, &piece.shape)) {
        return false;
    }
    commit(grid, piece, moved);
    true
}

/// Rotate every cell 90° clockwise around the pivot (index 1).
///
/// The result may lie partly outside the grid; see [`correct_bounds`].
pub fn rotate_shape_cw(shape: &Shape) -> Shape {
    let pivot = shape[PIVOT];
    let mut rotated = *shape;
    for (i, cell) in shape.iter().enumerate() {
        if i == PIVOT {
            continue;
        }
        rotated[i] = Coord::new(
            pivot.row - (cell.col - pivot.col),
            pivot.col + (cell.row - pivot.row),
        );
    }
    rotated
}

/// Shift the whole shape by the smallest offset that puts every cell back
/// inside the grid. A shape that is already in bounds is returned unchanged.
pub fn correct_bounds(shape: &Shape) -> Shape {
    let axis_offset = |lo: i8, hi: i8, size: usize| -> i8 {
        let max = size as i8 - 1;
        if lo < 0 {
            -lo
        } else if hi > max {
            max - hi
        } else {
            0
        }
    };

    let min_row = shape.iter().map(|c| c.row).min().unwrap_or(0);
    let max_row = shape.iter().map(|c| c.row).max().unwrap_or(0);
    let min_col = shape.iter().map(|c| c.col).min().unwrap_or(0);
    let max_col = shape.iter().map(|c| c.col).max().unwrap_or(0);

    translate(
        shape,
        axis_offset(min_row, max_row, GRID_ROWS),
        axis_offset(min_col, max_col, GRID_COLS),
    )
}

/// Rotate the piece clockwise with bounds correction.
///
/// Every kind goes through the same pivot formula, so the O piece shifts its
/// footprint rather than staying put.
pub fn rotate_clockwise(grid: &mut Grid, piece: &mut ActivePiece) -> bool {
    let rotated = correct_bounds(&rotate_shape_cw(&piece.shape));
    if !rotated.iter().all(|&cell| is_free(grid, cell, &piece.shape)) {
        return false;
    }
    commit(grid, piece, rotated);
    true
}

/// Number of rows the shape can fall before it rests, ignoring its own cells.
pub fn drop_distance(grid: &Grid, shape: &Shape) -> i8 {
    let mut distance: i8 = 0;
    loop {
        let next = translate(shape, -(distance + 1), 0);
        if next.iter().all(|&cell| is_free(grid, cell, shape)) {
            distance += 1;
        } else {
            return distance;
        }
    }
}

/// Where the shape would land if dropped straight down. Does not touch the grid.
pub fn ghost_shape(grid: &Grid, shape: &Shape) -> Shape {
    translate(shape, -drop_distance(grid, shape), 0)
}
