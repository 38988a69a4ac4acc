//! Grid module - fixed 24x10 cell storage
//!
//! Uses a flat row-major array for cache locality and zero allocation.
//! Coordinates are (row, col): row 0 is the floor, row 23 the top of the hidden
//! spawn buffer; col 0 is the left wall.

use thiserror::Error;

use crate::types::{Cell, Coord, GRID_CELLS, GRID_COLS, GRID_ROWS};

/// Failure of a checked grid read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the 24x10 grid")]
    OutOfRange { row: i8, col: i8 },
}

/// The playfield - 24 rows x 10 columns
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; GRID_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if Coord::new(row, col).in_bounds() {
            Some((row as usize) * GRID_COLS + (col as usize))
        } else {
            None
        }
    }

    pub fn rows(&self) -> usize {
        GRID_ROWS
    }

    pub fn cols(&self) -> usize {
        GRID_COLS
    }

    /// Whether `coord` addresses a cell of this grid.
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.in_bounds()
    }

    /// Read a cell.
    pub fn get(&self, row: i8, col: i8) -> Result<Cell, GridError> {
        Self::index(row, col)
            .map(|idx| self.cells[idx])
            .ok_or(GridError::OutOfRange { row, col })
    }

    /// Write a cell.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid. Movement code validates
    /// every target before writing, so reaching this is a bug.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) {
        match Self::index(row, col) {
            Some(idx) => self.cells[idx] = cell,
            None => panic!("grid write out of range: ({row}, {col})"),
        }
    }

    /// Whether the cell is in bounds and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Ok(Some(_)))
    }

    /// Whether the cell is in bounds and empty
    pub fn is_empty_at(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Ok(None))
    }

    /// Check if a row is completely filled. Out-of-range rows are never full.
    pub fn row_is_full(&self, row: usize) -> bool {
        self.row(row).is_some_and(|cells| cells.iter().all(|c| c.is_some()))
    }

    /// Borrow one row, bottom row first.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= GRID_ROWS {
            return None;
        }
        let start = row * GRID_COLS;
        Some(&self.cells[start..start + GRID_COLS])
    }

    /// All rows, floor first.
    pub fn iter_rows(&self) -> impl DoubleEndedIterator<Item = &[Cell]> + ExactSizeIterator + '_ {
        self.cells.chunks_exact(GRID_COLS)
    }

    /// Remove `count` rows starting at `row` and let everything above fall into
    /// the gap. The freed rows at the top become empty; rows below `row` are
    /// untouched.
    pub fn compact_from(&mut self, row: usize, count: usize) {
        if count == 0 || row >= GRID_ROWS {
            return;
        }
        let count = count.min(GRID_ROWS - row);

        let src_start = (row + count) * GRID_COLS;
        let dst_start = row * GRID_COLS;
        self.cells.copy_within(src_start.., dst_start);

        let top = (GRID_ROWS - count) * GRID_COLS;
        self.cells[top..].fill(None);
    }

    /// Remove an arbitrary set of rows in one pass.
    ///
    /// Each surviving row moves down by the number of removed rows strictly
    /// below it, so non-adjacent rows are handled correctly. `removed` must be
    /// sorted ascending.
    pub fn compact_rows(&mut self, removed: &[usize]) {
        if removed.is_empty() {
            return;
        }
        debug_assert!(removed.windows(2).all(|w| w[0] < w[1]));

        let mut write_row = 0usize;
        let mut skip = removed.iter().peekable();

        for read_row in 0..GRID_ROWS {
            if skip.next_if(|&&r| r == read_row).is_some() {
                continue;
            }
            if write_row != read_row {
                let src = read_row * GRID_COLS;
                self.cells
                    .copy_within(src..src + GRID_COLS, write_row * GRID_COLS);
            }
            write_row += 1;
        }

        self.cells[write_row * GRID_COLS..].fill(None);
    }

    /// Highest row containing at least one filled cell
    pub fn highest_occupied_row(&self) -> Option<usize> {
        self.iter_rows()
            .rposition(|cells| cells.iter().any(|c| c.is_some()))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
