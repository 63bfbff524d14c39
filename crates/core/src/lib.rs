//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the falling-piece game: the grid, the seven
//! pieces and their rotation, movement legality, line clearing, scoring and
//! level progression. It does no rendering and no I/O beyond logging, and the
//! only source of randomness is a seeded [`SimpleRng`], so the same seed and
//! the same command sequence always produce the same game.
//!
//! # Module Structure
//!
//! - [`board`]: the state machine a driver talks to (tick, commands, save/restore)
//! - [`grid`]: 18x10 color grid with row clearing
//! - [`shapes`]: the seven 4x4 bitmaps and their colors
//! - [`piece`]: a shape placed on the board with an orientation
//! - [`validation`]: the single placement-legality check
//! - [`movement`]: speculative transforms built on that check
//! - [`scoring`]: points, rows, levels and the fall interval
//! - [`snapshot`]: versioned JSON save format
//! - [`session`]: timer-driven lifecycle with pause, high score and save/load
//! - [`config`]: seed and base interval from the environment
//!
//! # Example
//!
//! ```
//! use blockfall_core::Board;
//! use blockfall_core::types::Command;
//!
//! let mut board = Board::new(12345);
//! board.apply(Command::MoveLeft);
//! board.apply(Command::RotateCw);
//!
//! // Let the piece fall until something locks
//! while board.take_last_event().is_none() {
//!     board.tick();
//! }
//! assert!(board.grid().occupied_count() >= 4);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod movement;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod validation;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockEvent, Phase};
pub use config::GameConfig;
pub use error::{ConfigError, SnapshotError};
pub use grid::Grid;
pub use piece::Piece;
pub use rng::SimpleRng;
pub use scoring::{line_clear_score, tick_interval_ms, Progress, ScoreResult};
pub use session::{Session, TickOutcome};
pub use shapes::{Bitmap, Coordinate};
pub use snapshot::{BoardSnapshot, PieceSnapshot};
pub use validation::can_place;
