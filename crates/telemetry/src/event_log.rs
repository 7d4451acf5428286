//! Line-delimited JSON event log.
//!
//! Each event becomes one line:
//!
//! ```text
//! {"seq":3,"episode":0,"event":{"type":"linesCleared","count":2},"score":136,"lines":2,"level":1}
//! ```
//!
//! Write failures are logged and counted; the session never sees them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::Serialize;

use gameboy_tetris_core::GameSnapshot;
use gameboy_tetris_engine::GameObserver;
use gameboy_tetris_types::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogRecord<'a> {
    pub seq: u64,
    pub episode: u32,
    pub event: &'a GameEvent,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

pub struct EventLog<W: Write> {
    out: W,
    seq: u64,
    write_errors: u64,
    line: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Create (or truncate) a log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("event log: create {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            write_errors: 0,
            line: Vec::with_capacity(256),
        }
    }

    /// Records written so far.
    pub fn written(&self) -> u64 {
        self.seq
    }

    pub fn write_errors(&self) -> u64 {
        self.write_errors
    }

    pub fn record(&mut self, event: &GameEvent, snapshot: &GameSnapshot) -> Result<()> {
        let rec = LogRecord {
            seq: self.seq,
            episode: snapshot.episode,
            event,
            score: snapshot.score,
            lines: snapshot.lines,
            level: snapshot.level,
        };
        self.line.clear();
        serde_json::to_writer(&mut self.line, &rec).context("event log: encode")?;
        self.line.push(b'\n');
        self.out
            .write_all(&self.line)
            .context("event log: write")?;
        self.seq += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("event log: flush")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> GameObserver for EventLog<W> {
    fn on_event(&mut self, event: &GameEvent, snapshot: &GameSnapshot) {
        let result = self.record(event, snapshot).and_then(|()| {
            // Session boundaries are rare; make them durable right away.
            if matches!(event, GameEvent::GameOver { .. }) {
                self.flush()
            } else {
                Ok(())
            }
        });
        if let Err(err) = result {
            self.write_errors += 1;
            warn!("{:#}", err);
        }
    }
}
