//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens to the stack lives here. There is no
//! terminal, clock or I/O in this crate: time arrives as elapsed milliseconds
//! and randomness comes from a seed, so the same seed and the same command
//! sequence always produce the same game.
//!
//! # Module Structure
//!
//! - [`grid`]: 24x10 cell storage (20 visible rows plus a 4-row spawn buffer)
//! - [`catalog`]: spawn shapes for the seven piece kinds
//! - [`bag`]: 7-bag piece generation
//! - [`movement`]: collision, moves, clockwise rotation with bounds correction, ghost
//! - [`lines`]: full-row clearing, score and level
//! - [`session`]: the phase state machine driving all of the above
//! - [`snapshot`]: read-only view for presenters
//!
//! # Game Rules
//!
//! - **Coordinates**: row 0 is the floor; rows 20-23 are hidden spawn buffer
//! - **7-Bag Randomizer**: every run of seven pieces holds one of each kind
//! - **Rotation**: clockwise about the piece's pivot cell, pushed back inside
//!   the walls when it pokes out
//! - **Lock Delay**: 200ms once a piece rests, restarted by sideways moves and
//!   rotations up to 15 times
//! - **Hold**: one stash slot, usable once per piece
//! - **Scoring**: 40/100/300/1200 times the level, level = max(1, lines / 10)
//! - **Game Over**: a blocked spawn, or a lock that leaves cells in the buffer
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Session, SessionConfig};
//! use blockfall_types::GameAction;
//!
//! let mut session = Session::new(SessionConfig::with_seed(12345));
//! session.start();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::RotateCw);
//! session.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(session.pieces_spawned(), 2);
//! assert_eq!(session.score(), 0); // drops score nothing
//! ```

pub mod bag;
pub mod catalog;
pub mod config;
pub mod grid;
pub mod lines;
pub mod movement;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use bag::BagQueue;
pub use catalog::{spawn_shape, Shape, PIVOT};
pub use config::SessionConfig;
pub use grid::{Grid, GridError};
pub use lines::{level_for_lines, line_clear_score, LineClear, Progress};
pub use movement::{ghost_shape, ActivePiece};
pub use session::{LockEvent, Phase, Session};
pub use snapshot::SessionSnapshot;
