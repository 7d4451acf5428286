//! Session observers.
//!
//! Both types here implement [`GameObserver`](gameboy_tetris_engine::GameObserver)
//! and are fed by the engine; neither can affect the session.
//!
//! - [`achievements`]: in-memory stat counters and one-shot badges
//! - [`event_log`]: one JSON object per event, newline delimited

pub mod achievements;
pub mod event_log;

pub use achievements::{Achievement, Achievements, Progress, Stat, Stats, CATALOG};
pub use event_log::{EventLog, LogRecord};
