//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previous one and only changed runs of glyphs
//! are written. A size change forces a full redraw. Within a frame the pen
//! remembers the colors and intensity last sent, so a ghost cell next to an
//! empty cell costs one intensity switch instead of a full style reset.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    entered: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    /// Raw mode plus alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.entered = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Current terminal size.
    pub fn viewport(&self) -> Result<Viewport> {
        let (w, h) = terminal::size()?;
        Ok(Viewport::new(w, h))
    }

    /// Force the next draw to be a full redraw. Call on resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame; after the
    /// call it holds the previous frame and can be redrawn into.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        // Best effort: never leave the terminal in raw mode.
        let _ = self.exit();
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
///
/// Every row is addressed explicitly, so the result does not depend on line
/// wrapping being disabled.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        encode_run(out, &mut pen, fb, Run { x: 0, y, len: fb.width() })?;
    }
    pen.finish(out)
}

/// Encode only the changed runs between two equally sized frames.
///
/// Identical frames encode to nothing.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for run in changed_runs(prev, next) {
        encode_run(out, &mut pen, next, run)?;
    }
    pen.finish(out)
}

/// A horizontal span of glyphs on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Terminal drawing state as last sent. `None` means unknown.
#[derive(Debug, Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    /// `(bold, dim)`
    intensity: Option<(bool, bool)>,
}

impl Pen {
    fn switch_to(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.fg != Some(style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            self.fg = Some(style.fg);
        }
        if self.bg != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            self.bg = Some(style.bg);
        }

        // SGR 22 drops bold and dim together without touching colors.
        let intensity = (style.bold, style.dim);
        if self.intensity != Some(intensity) {
            out.queue(SetAttribute(Attribute::NormalIntensity))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.intensity = Some(intensity);
        }
        Ok(())
    }

    /// Hand the terminal back in its default style, if anything was drawn.
    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.intensity.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn encode_run(out: &mut Vec<u8>, pen: &mut Pen, fb: &FrameBuffer, run: Run) -> Result<()> {
    if run.len == 0 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(run.x, run.y))?;
    for glyph in (run.x..run.x + run.len).filter_map(|x| fb.get(x, run.y)) {
        pen.switch_to(out, glyph.style)?;
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Maximal runs of glyphs in `next` that differ from `prev`, row by row.
///
/// Cells outside `prev` always differ.
fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> impl Iterator<Item = Run> + 'a {
    let width = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < width && !differs(x) {
                x += 1;
            }
            if x == width {
                return None;
            }
            let start = x;
            while x < width && differs(x) {
                x += 1;
            }
            Some(Run { x: start, y, len: x - start })
        })
    })
}
