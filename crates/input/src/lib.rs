//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Quitting and
//! restarting are front-end concerns and are reported separately.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_restart, should_quit};
