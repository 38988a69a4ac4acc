//! Piece catalog - canonical spawn shapes
//!
//! Every kind has exactly one spawn layout. All layouts sit in rows 20-21 of
//! the hidden buffer, columns 4-7. Index 1 of each shape is the rotation pivot.

use crate::types::{Coord, PieceKind};

/// Four cells of one piece. Index 1 is the rotation pivot.
pub type Shape = [Coord; 4];

/// Index of the pivot cell within a [`Shape`].
pub const PIVOT: usize = 1;

const fn c(row: i8, col: i8) -> Coord {
    Coord::new(row, col)
}

/// Get the spawn shape for a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::L => [c(21, 4), c(21, 5), c(21, 6), c(20, 4)],
        PieceKind::I => [c(21, 4), c(21, 5), c(21, 6), c(21, 7)],
        PieceKind::O => [c(21, 4), c(21, 5), c(20, 4), c(20, 5)],
        PieceKind::T => [c(21, 4), c(21, 5), c(21, 6), c(20, 5)],
        PieceKind::S => [c(20, 4), c(20, 5), c(21, 5), c(21, 6)],
        PieceKind::Z => [c(21, 4), c(21, 5), c(20, 5), c(20, 6)],
        PieceKind::J => [c(21, 4), c(20, 5), c(20, 4), c(20, 6)],
    }
}

/// Whether `coord` is one of the shape's cells (value comparison).
pub fn shape_contains(shape: &Shape, coord: Coord) -> bool {
    shape.iter().any(|&cell| cell == coord)
}

/// Translate every cell of a shape.
pub fn translate(shape: &Shape, d_row: i8, d_col: i8) -> Shape {
    shape.map(|cell| cell.offset(d_row, d_col))
}
