//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Only the 20 visible rows are drawn. Grid row 0 is the floor, so screen rows
//! run the other way: row 19 is drawn at the top of the well.

use crate::core::SessionSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, GRID_COLS, VISIBLE_ROWS};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for a session.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Top-left corner of the well frame on screen.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered well in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (GRID_COLS as u16) * self.cell_w + 2,
            (VISIBLE_ROWS as u16) * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer. Callers can reuse one buffer
    /// across frames and only resize when the terminal does.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let (frame_w, frame_h) = self.frame_size();
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
        };

        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, origin, frame_w, frame_h, border);

        let ghost = CellStyle::plain(Rgb::new(140, 140, 140), WELL_BG).dim();
        let empty = CellStyle::plain(Rgb::new(90, 90, 100), WELL_BG).dim();

        for row in 0..VISIBLE_ROWS as i8 {
            for col in 0..GRID_COLS as i8 {
                match snap.grid.get(row, col) {
                    Ok(Some(kind)) => self.fill_cell(fb, origin, row, col, '█', piece_style(kind)),
                    _ if snap.is_ghost_cell(row, col) => {
                        self.fill_cell(fb, origin, row, col, '░', ghost)
                    }
                    _ => self.fill_cell(fb, origin, row, col, '·', empty),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.game_over {
            self.draw_overlay_text(fb, origin, frame_w, frame_h, 0, "GAME OVER");
            self.draw_overlay_text(fb, origin, frame_w, frame_h, 2, "r restart");
            self.draw_overlay_text(fb, origin, frame_w, frame_h, 3, "q quit");
        } else if snap.paused {
            self.draw_overlay_text(fb, origin, frame_w, frame_h, 0, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Screen position of the top-left glyph of grid cell `(row, col)`.
    pub fn cell_origin(&self, viewport: Viewport, row: i8, col: i8) -> Option<(u16, u16)> {
        if row < 0 || row as usize >= VISIBLE_ROWS || col < 0 || col as usize >= GRID_COLS {
            return None;
        }
        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let screen_row = (VISIBLE_ROWS - 1 - row as usize) as u16;
        Some((
            x + 1 + (col as u16) * self.cell_w,
            y + 1 + screen_row * self.cell_h,
        ))
    }

    fn draw_border(&self, fb: &mut FrameBuffer, o: Origin, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(o.x, o.y, '┌', style);
        fb.put_char(o.x + w - 1, o.y, '┐', style);
        fb.put_char(o.x, o.y + h - 1, '└', style);
        fb.put_char(o.x + w - 1, o.y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(o.x + dx, o.y, '─', style);
            fb.put_char(o.x + dx, o.y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(o.x, o.y + dy, '│', style);
            fb.put_char(o.x + w - 1, o.y + dy, '│', style);
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, o: Origin, row: i8, col: i8, ch: char, style: CellStyle) {
        let screen_row = (VISIBLE_ROWS - 1 - row as usize) as u16;
        let px = o.x + 1 + (col as u16) * self.cell_w;
        let py = o.y + 1 + screen_row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        o: Origin,
        frame_w: u16,
    ) {
        let panel_x = o.x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = o.y;
        for (name, number) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.hold {
            Some(kind) => {
                let style = if snap.can_hold { piece_style(kind) } else { piece_style(kind).dim() };
                fb.put_str(panel_x, y, kind.as_str(), style);
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for kind in snap.next_queue.iter() {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, kind.as_str(), piece_style(*kind));
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        o: Origin,
        frame_w: u16,
        frame_h: u16,
        line: u16,
        text: &str,
    ) {
        let y = o.y.saturating_add(frame_h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = o.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, y, text, style);
    }
}

/// Foreground color for each kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn piece_style(kind: PieceKind) -> CellStyle {
    CellStyle::plain(piece_color(kind), WELL_BG).bold()
}
