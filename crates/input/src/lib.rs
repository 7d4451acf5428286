//! Terminal input module (engine-facing).
//!
//! Translates raw `crossterm` key and mouse events into the closed
//! [`Command`](crate::types::Command) set before they reach the session.
//! Nothing here touches game state; the current [`Phase`](crate::types::Phase)
//! is passed in where a button's meaning depends on it.

pub mod handler;
pub mod map;
pub mod pointer;

pub use gameboy_tetris_types as types;

pub use handler::InputHandler;
pub use map::{button_command, handle_key_event, key_button, should_quit, start_button, Button};
pub use pointer::{handle_mouse_event, HitMap, HitRegion};
