//! Game state module - the session state machine
//!
//! Owns the board, the active piece and the piece bag, and applies commands
//! and gravity ticks to them. Phases:
//!
//! ```text
//! NotStarted --Start--> Running <--Pause--> Paused
//!                          |
//!                   spawn collision
//!                          v
//!                       GameOver --Restart--> NotStarted
//! ```
//!
//! Restart is also accepted from Running and Paused. Piece commands and
//! gravity are ignored unless the phase is Running.

use arrayvec::ArrayVec;
use log::{debug, info, warn};

use crate::active::ActivePiece;
use crate::board::Board;
use crate::rng::PieceQueue;
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, GameEvent, PieceKind, Phase};

/// Pending events kept between drains.
pub const EVENT_CAPACITY: usize = 16;

/// Events produced since the last drain.
pub type PendingEvents = ArrayVec<GameEvent, EVENT_CAPACITY>;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    piece_queue: PieceQueue,
    phase: Phase,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Pieces spawned in this episode.
    pieces_spawned: u32,
    events: PendingEvents,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    drop_accumulator_ms: u32,
}

impl GameState {
    /// Create a new session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_queue(PieceQueue::new(seed))
    }

    /// Create a new session drawing pieces from `piece_queue`.
    pub fn with_queue(piece_queue: PieceQueue) -> Self {
        let level = calculate_level(0);
        Self {
            board: Board::new(),
            active: None,
            piece_queue,
            phase: Phase::NotStarted,
            episode_id: 0,
            pieces_spawned: 0,
            events: PendingEvents::new(),
            score: 0,
            lines: 0,
            level,
            drop_interval_ms: get_drop_interval_ms(level),
            drop_accumulator_ms: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_accumulator_ms(&self) -> u32 {
        self.drop_accumulator_ms
    }

    pub fn next_piece(&self) -> PieceKind {
        self.piece_queue.peek()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next_piece();
        out.phase = self.phase;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.episode = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take every event produced since the last call.
    pub fn take_events(&mut self) -> PendingEvents {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        if let Err(err) = self.events.try_push(event) {
            warn!("event buffer full, dropping {:?}", err.element());
        }
    }

    /// Apply a command. Returns true if it changed anything.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.toggle_pause(),
            Command::Restart => self.restart(),
            _ if self.phase != Phase::Running => false,
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::Rotate => self.try_rotate(),
            Command::SoftDrop => self.step_down(true),
            Command::HardDrop => self.hard_drop(),
        }
    }

    /// NotStarted -> Running, spawning the first piece.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }
        self.phase = Phase::Running;
        self.drop_accumulator_ms = 0;
        info!("episode {} started", self.episode_id);
        self.emit(GameEvent::GameStarted {
            episode: self.episode_id,
        });
        self.spawn_piece();
        true
    }

    /// Running <-> Paused. Ignored in any other phase.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.emit(GameEvent::Paused);
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.emit(GameEvent::Resumed);
                true
            }
            Phase::NotStarted | Phase::GameOver => false,
        }
    }

    /// Reset board, score, level, piece and bag back to NotStarted.
    ///
    /// The new bag is shuffled from the running RNG, so the next episode gets
    /// a fresh sequence rather than a replay of the last one.
    pub fn restart(&mut self) -> bool {
        if self.phase == Phase::NotStarted {
            return false;
        }
        let level = calculate_level(0);
        self.board.clear();
        self.active = None;
        self.piece_queue.new_bag();
        self.phase = Phase::NotStarted;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.pieces_spawned = 0;
        self.score = 0;
        self.lines = 0;
        self.level = level;
        self.drop_interval_ms = get_drop_interval_ms(level);
        self.drop_accumulator_ms = 0;
        debug!("session reset, episode {}", self.episode_id);
        true
    }

    /// Gravity tick driven by an external clock.
    ///
    /// Accumulates `elapsed_ms`; once the accumulator reaches the drop
    /// interval the piece steps down one row, or locks if it cannot.
    /// Returns true if the piece moved or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.drop_accumulator_ms = self.drop_accumulator_ms.saturating_add(elapsed_ms);
        if self.drop_accumulator_ms < self.drop_interval_ms {
            return false;
        }
        self.step_down(false)
    }

    /// Spawn the next piece from the queue, or end the session if it collides.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.piece_queue.draw();
        match ActivePiece::spawn(kind, &self.board) {
            Some(piece) => {
                self.active = Some(piece);
                self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
                true
            }
            None => {
                self.active = None;
                self.game_over();
                false
            }
        }
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        info!(
            "game over: score {} lines {} level {}",
            self.score, self.lines, self.level
        );
        self.emit(GameEvent::GameOver {
            score: self.score,
            lines: self.lines,
            level: self.level,
        });
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let board = &self.board;
        match self.active.as_mut() {
            Some(active) => active.try_move(board, dx, dy),
            None => false,
        }
    }

    fn try_rotate(&mut self) -> bool {
        let board = &self.board;
        match self.active.as_mut() {
            Some(active) => active.try_rotate(board),
            None => false,
        }
    }

    /// One row down, shared by gravity and soft drop. Locks when blocked.
    fn step_down(&mut self, soft_drop: bool) -> bool {
        if self.active.is_none() {
            return false;
        }
        self.drop_accumulator_ms = 0;
        if self.try_move(0, 1) {
            if soft_drop {
                self.score = self.score.saturating_add(calculate_drop_score(1, false));
            }
        } else {
            self.lock_piece();
        }
        true
    }

    fn hard_drop(&mut self) -> bool {
        let board = &self.board;
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let dropped = active.hard_drop(board);
        self.score = self
            .score
            .saturating_add(calculate_drop_score(dropped, true));
        self.drop_accumulator_ms = 0;
        self.lock_piece();
        true
    }

    /// Merge the active piece into the board, clear rows, score, and spawn.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .lock(&active.shape, active.color, active.x, active.y);
        self.emit(GameEvent::PieceLocked { kind: active.kind });

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len();

        if lines_cleared > 0 {
            // Scored at the level the piece locked on.
            let points = calculate_line_score(lines_cleared, self.level);
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(lines_cleared as u32);
            debug!(
                "cleared rows {:?} for {} points",
                cleared_rows.as_slice(),
                points
            );
            self.emit(GameEvent::LinesCleared {
                count: lines_cleared as u32,
            });

            let level = calculate_level(self.lines);
            if level > self.level {
                self.level = level;
                self.drop_interval_ms = get_drop_interval_ms(level);
                info!(
                    "level {} reached, drop interval {}ms",
                    level, self.drop_interval_ms
                );
                self.emit(GameEvent::LevelChanged { level });
            }
        }

        self.spawn_piece();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
