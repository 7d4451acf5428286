//! Frame loop driver.
//!
//! The host owns the clock and the scheduling primitive (a terminal poll
//! loop, a test, a headless replay). Each scheduled callback calls
//! [`Engine::frame`] with the current time; the engine ticks the session,
//! hands new events to every subscribed observer, renders, and tells the
//! host whether to schedule another frame. Stopping just clears the active
//! flag, so a frame already in flight cannot reschedule itself.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use log::{debug, warn};

use gameboy_tetris_core::{GameSnapshot, GameState};
use gameboy_tetris_types::{Command, GameEvent, MAX_FRAME_MS};

/// Receives session events. Called synchronously from `frame`/`dispatch`.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent, snapshot: &GameSnapshot);
}

/// Lets the host keep reading an observer after handing it to the engine.
impl<T: GameObserver + ?Sized> GameObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &GameEvent, snapshot: &GameSnapshot) {
        match self.try_borrow_mut() {
            Ok(mut inner) => inner.on_event(event, snapshot),
            Err(_) => warn!("observer busy, dropping {:?}", event),
        }
    }
}

/// Handle returned by [`Engine::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on the elapsed time fed into one tick.
    pub max_frame_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

pub struct Engine {
    state: GameState,
    config: EngineConfig,
    active: bool,
    last_frame_ms: Option<u64>,
    observers: Vec<(ObserverId, Box<dyn GameObserver>)>,
    next_observer_id: u32,
    snapshot: GameSnapshot,
}

impl Engine {
    pub fn new(state: GameState) -> Self {
        Self::with_config(state, EngineConfig::default())
    }

    pub fn with_config(state: GameState, config: EngineConfig) -> Self {
        let snapshot = state.snapshot();
        Self {
            state,
            config,
            active: false,
            last_frame_ms: None,
            observers: Vec::new(),
            next_observer_id: 0,
            snapshot,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Snapshot taken at the end of the last frame or dispatch.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin driving frames. Calling it again while active does nothing.
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.last_frame_ms = None;
        debug!("engine started");
    }

    /// Stop driving frames. Safe to call any number of times.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.last_frame_ms = None;
        debug!("engine stopped");
    }

    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id = self.next_observer_id.wrapping_add(1);
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> Option<Box<dyn GameObserver>> {
        let pos = self.observers.iter().position(|(oid, _)| *oid == id)?;
        Some(self.observers.remove(pos).1)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Run one frame.
    ///
    /// Does nothing and returns `false` while inactive. The first frame after
    /// `start` ticks with zero elapsed time; later frames are clamped to
    /// `max_frame_ms`. `render` may stop the loop by returning `Break`.
    /// Returns whether the host should schedule another frame.
    pub fn frame<F>(&mut self, now_ms: u64, render: F) -> bool
    where
        F: FnOnce(&GameSnapshot) -> ControlFlow<()>,
    {
        if !self.active {
            return false;
        }

        let elapsed = match self.last_frame_ms {
            Some(last) => now_ms
                .saturating_sub(last)
                .min(u64::from(self.config.max_frame_ms)) as u32,
            None => 0,
        };
        self.last_frame_ms = Some(now_ms);

        self.state.tick(elapsed);
        self.flush();

        if render(&self.snapshot).is_break() {
            self.stop();
        }
        self.active
    }

    /// Forward a command to the session. Returns whether it changed anything.
    pub fn dispatch(&mut self, command: Command) -> bool {
        let changed = self.state.apply(command);
        self.flush();
        changed
    }

    fn flush(&mut self) {
        self.state.snapshot_into(&mut self.snapshot);
        let events = self.state.take_events();
        for event in &events {
            for (_, observer) in self.observers.iter_mut() {
                observer.on_event(event, &self.snapshot);
            }
        }
    }
}
