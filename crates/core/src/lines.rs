//! Line resolver - clearing full rows, level and score bookkeeping
//!
//! Classic Nintendo scoring with the level multiplier taken from the level
//! reached *after* the clear is counted. Levels start at 1 and step up every
//! ten lines: `level = max(1, lines / 10)`.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{GRID_ROWS, LINES_PER_LEVEL, LINE_SCORES, MIN_LEVEL};

/// Running totals that line clears feed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: MIN_LEVEL,
        }
    }

    /// Count `cleared` rows: bump lines, recompute level, award points at the
    /// new level. Returns the points awarded.
    pub fn record_clear(&mut self, cleared: usize) -> u32 {
        if cleared == 0 {
            return 0;
        }
        self.lines = self.lines.saturating_add(cleared as u32);
        self.level = level_for_lines(self.lines);
        let points = line_clear_score(cleared, self.level);
        self.score = self.score.saturating_add(points);
        points
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Cleared row indices, bottom to top
    pub rows: ArrayVec<usize, GRID_ROWS>,
    /// Points awarded for this clear
    pub points: u32,
    /// Level after the clear was counted
    pub level: u32,
}

impl LineClear {
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

/// Level reached after `total_lines` cleared lines.
pub fn level_for_lines(total_lines: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL).max(MIN_LEVEL)
}

/// Points for clearing `lines` rows at once on `level`.
///
/// Only 1-4 are reachable in play; anything else scores nothing.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    match lines {
        1..=4 => LINE_SCORES[lines].saturating_mul(level),
        _ => 0,
    }
}

/// Indices of every full row, bottom to top.
pub fn full_rows(grid: &Grid) -> ArrayVec<usize, GRID_ROWS> {
    grid.iter_rows()
        .enumerate()
        .filter(|(_, cells)| cells.iter().all(|c| c.is_some()))
        .map(|(row, _)| row)
        .collect()
}

/// Clear every full row in one compaction pass and update `progress`.
///
/// With no full rows this returns an empty report and leaves both the grid and
/// `progress` untouched.
pub fn resolve(grid: &mut Grid, progress: &mut Progress) -> LineClear {
    let rows = full_rows(grid);
    if rows.is_empty() {
        return LineClear {
            rows,
            points: 0,
            level: progress.level,
        };
    }

    grid.compact_rows(&rows);
    let points = progress.record_clear(rows.len());

    LineClear {
        rows,
        points,
        level: progress.level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn classic_line_scores() {
        assert_eq!(line_clear_score(0, 1), 0);
        assert_eq!(line_clear_score(1, 1), 40);
        assert_eq!(line_clear_score(2, 1), 100);
        assert_eq!(line_clear_score(3, 1), 300);
        assert_eq!(line_clear_score(4, 1), 1200);
        assert_eq!(line_clear_score(5, 1), 0);

        assert_eq!(line_clear_score(1, 3), 120);
        assert_eq!(line_clear_score(4, 3), 3600);
    }

    #[test]
    fn level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 1);
        assert_eq!(level_for_lines(19), 1);
        assert_eq!(level_for_lines(20), 2);
        assert_eq!(level_for_lines(35), 3);
    }

    #[test]
    fn record_clear_uses_new_level() {
        let mut progress = Progress {
            score: 0,
            lines: 19,
            level: 1,
        };
        let points = progress.record_clear(1);
        assert_eq!(progress.lines, 20);
        assert_eq!(progress.level, 2);
        assert_eq!(points, 80);
        assert_eq!(progress.score, 80);
    }

    #[test]
    fn resolve_reports_rows_bottom_to_top() {
        let mut grid = Grid::new();
        for row in [6i8, 2] {
            for col in 0..10 {
                grid.set(row, col, Some(PieceKind::L));
            }
        }
        let mut progress = Progress::new();
        let clear = resolve(&mut grid, &mut progress);
        assert_eq!(clear.rows.as_slice(), &[2, 6]);
        assert_eq!(clear.count(), 2);
        assert_eq!(clear.points, 100);
        assert_eq!(clear.level, 1);
        assert_eq!(grid.highest_occupied_row(), None);
    }
}
