//! Gameboy Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, the
//! integration tests and the benches can use `gameboy_tetris::{core, ...}`
//! while the implementation lives in dedicated crates under `crates/`.

pub mod config;
pub mod replay;

pub use gameboy_tetris_core as core;
pub use gameboy_tetris_engine as engine;
pub use gameboy_tetris_input as input;
pub use gameboy_tetris_telemetry as telemetry;
pub use gameboy_tetris_term as term;
pub use gameboy_tetris_types as types;
