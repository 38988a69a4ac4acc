//! Shared types and constants for the falling-block engine.
//!
//! Everything here is plain data with no dependencies, so the engine, the
//! input mapping and the terminal view can all agree on the same vocabulary.
//!
//! # Grid Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 24 (indexed 0-23, bottom to top)
//! - **Visible rows**: 0-19; rows 20-23 are the hidden spawn buffer
//!
//! # Timing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Runner timestep (~60 FPS) |
//! | `BASE_FALL_MS` | 600 | Gravity interval at level 1 |
//! | `MIN_FALL_MS` | 50 | Gravity interval floor |
//! | `LOCK_DELAY_MS` | 200 | Grace period before a resting piece locks |
//! | `LOCK_RESET_LIMIT` | 15 | Lock timer resets allowed per piece |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Coord, PieceKind, GRID_COLS, GRID_ROWS, VISIBLE_ROWS};
//!
//! assert_eq!(PieceKind::from_index(2), PieceKind::T);
//! assert_eq!(PieceKind::T.as_str(), "T");
//! assert_eq!(GRID_COLS, 10);
//! assert_eq!(GRID_ROWS, 24);
//! assert_eq!(VISIBLE_ROWS, 20);
//!
//! let c = Coord::new(21, 4);
//! assert!(c.in_bounds());
//! assert!(c.is_hidden());
//! ```

/// Grid width in cells.
pub const GRID_COLS: usize = 10;

/// Grid height in cells, including the hidden spawn buffer.
pub const GRID_ROWS: usize = 24;

/// Rows `0..VISIBLE_ROWS` form the visible playfield.
pub const VISIBLE_ROWS: usize = 20;

/// Total number of cells on the grid.
pub const GRID_CELLS: usize = GRID_COLS * GRID_ROWS;

/// Number of upcoming pieces exposed by the bag preview.
pub const NEXT_PREVIEW: usize = 5;

/// Runner timestep in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1.
pub const BASE_FALL_MS: u32 = 600;

/// Gravity never gets faster than this.
pub const MIN_FALL_MS: u32 = 50;

/// Time a resting piece may still be nudged before it locks.
pub const LOCK_DELAY_MS: u32 = 200;

/// Maximum number of lock timer resets per piece.
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Points for clearing N rows at once, before the level multiplier.
///
/// Index 0 is unused (no clear, no points).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Lines needed per level step.
pub const LINES_PER_LEVEL: u32 = 10;

/// Lowest level a session can be on.
pub const MIN_LEVEL: u32 = 1;

/// The seven tetromino piece kinds.
///
/// Colors are a presentation concern and live in the terminal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in declaration order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Map an index in `0..7` to a piece kind.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`; the piece set is closed, so any other value is a
    /// caller bug.
    pub fn from_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(kind) => *kind,
            None => panic!("undefined piece index {index}"),
        }
    }

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::O => 0,
            PieceKind::I => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Single uppercase letter, as shown in the side panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "O",
            PieceKind::I => "I",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// A cell on the grid: `None` is empty, `Some(kind)` is filled.
pub type Cell = Option<PieceKind>;

/// Grid coordinate. Rows grow upward from the floor, columns grow rightward.
///
/// Signed so that intermediate results (a rotation poking past a wall) can be
/// represented before bounds correction pulls them back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Whether the coordinate lies inside the 24x10 grid.
    pub fn in_bounds(&self) -> bool {
        self.row >= 0
            && (self.row as usize) < GRID_ROWS
            && self.col >= 0
            && (self.col as usize) < GRID_COLS
    }

    /// Whether the coordinate lies in the hidden spawn buffer.
    pub fn is_hidden(&self) -> bool {
        self.row >= VISIBLE_ROWS as i8
    }

    /// Translate by `(d_row, d_col)`.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Horizontal direction for sideways moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for one step in this direction.
    pub fn delta(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Discrete input events delivered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down
    SoftDrop,
    /// Drop to the floor and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise around its pivot
    RotateCw,
    /// Hold current piece (once per lock)
    Hold,
    /// Toggle pause state
    Pause,
}

impl GameAction {
    /// camelCase name, used in trace logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
        }
    }
}
