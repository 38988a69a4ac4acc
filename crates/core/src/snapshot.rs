//! Read-only view of a session for presenters.

use crate::catalog::Shape;
use crate::grid::Grid;
use crate::movement::ActivePiece;
use crate::session::Phase;
use crate::types::{PieceKind, NEXT_PREVIEW};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Full grid including the hidden buffer; the active piece is in it
    pub grid: Grid,
    pub active: Option<ActivePiece>,
    pub ghost: Option<Shape>,
    pub hold: Option<PieceKind>,
    pub next_queue: [PieceKind; NEXT_PREVIEW],
    pub can_hold: bool,
    pub paused: bool,
    pub game_over: bool,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Whether `(row, col)` is part of the ghost but not of the active piece.
    pub fn is_ghost_cell(&self, row: i8, col: i8) -> bool {
        let Some(ghost) = self.ghost else {
            return false;
        };
        let on_ghost = ghost.iter().any(|c| c.row == row && c.col == col);
        on_ghost && self.grid.get(row, col).is_ok_and(|cell| cell.is_none())
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            grid: Grid::new(),
            active: None,
            ghost: None,
            hold: None,
            next_queue: [PieceKind::I; NEXT_PREVIEW],
            can_hold: true,
            paused: false,
            game_over: false,
            phase: Phase::Spawning,
            score: 0,
            level: 1,
            lines: 0,
        }
    }
}
