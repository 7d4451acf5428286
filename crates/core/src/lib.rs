//! Core game logic - pure, deterministic, and testable
//!
//! Everything the falling-block puzzle needs to run a session lives here:
//! the board, the piece catalog and rotation, the 7-bag queue, scoring, and
//! the session state machine. It does no I/O and never fails; rejected
//! moves are reported as `false` and terminal situations as phase changes.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and row compaction
//! - [`pieces`]: square shape matrices, clockwise rotation, kick list
//! - [`active`]: the falling piece and its move/rotate/drop validation
//! - [`rng`]: LCG and 7-bag piece queue
//! - [`scoring`]: line points, drop bonuses, level and gravity curve
//! - [`game_state`]: session phases, gravity accumulator, events
//! - [`snapshot`]: the read-only view handed to renderers
//! - [`render`]: snapshot to draw primitives
//!
//! # Example
//!
//! ```
//! use gameboy_tetris_core::GameState;
//! use gameboy_tetris_core::types::{Command, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.apply(Command::Start);
//! assert_eq!(game.phase(), Phase::Running);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! Gravity is driven from outside: call [`GameState::tick`] with the elapsed
//! milliseconds of every frame.

pub mod active;
pub mod board;
pub mod game_state;
pub mod pieces;
pub mod render;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use gameboy_tetris_types as types;

// Re-export commonly used types for convenience
pub use active::ActivePiece;
pub use board::Board;
pub use game_state::{GameState, PendingEvents};
pub use pieces::{base_shape, get_shape, try_rotate, Shape, KICKS};
pub use render::{draw_into, draw_list, DrawList, DrawOp};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
