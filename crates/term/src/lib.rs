//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: a session snapshot is drawn into a
//! plain framebuffer, which is then diffed and flushed to the terminal. No
//! widget toolkit, and precise control over aspect ratio (2 chars wide per
//! cell by default).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
