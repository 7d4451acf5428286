//! DAS/ARR input handler for terminal environments.
//!
//! Held horizontal keys repeat after the delayed auto shift (DAS) at the
//! auto repeat rate (ARR); a held soft drop repeats at its own rate. Time is
//! fed in through [`InputHandler::update`], so the handler never reads a clock.
//!
//! Terminals that do not emit key release events are covered by a timeout:
//! a held key is considered released once no press or repeat for it has been
//! seen for `key_release_timeout_ms`.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::{key_button, Button};
use crate::types::{Command, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS};

/// Repeats emitted by a single `update` call, at most.
pub const MAX_REPEATS: usize = 32;

pub type Repeats = ArrayVec<Command, MAX_REPEATS>;

const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
}

impl Horizontal {
    fn command(self) -> Command {
        match self {
            Horizontal::Left => Command::MoveLeft,
            Horizontal::Right => Command::MoveRight,
        }
    }
}

/// DAS timer plus ARR accumulator for one held key.
#[derive(Debug, Clone, Copy, Default)]
struct Repeat {
    held_ms: u32,
    arr_acc: u32,
    idle_ms: u32,
}

impl Repeat {
    fn restart(&mut self) {
        *self = Self::default();
    }

    /// Number of repeats due after `elapsed_ms` more of holding.
    fn advance(&mut self, elapsed_ms: u32, das: u32, arr: u32) -> u32 {
        let prev = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < das {
            return 0;
        }
        // Only time past the DAS threshold counts toward repeats.
        self.arr_acc += if prev < das {
            self.held_ms - das
        } else {
            elapsed_ms
        };
        if arr == 0 {
            let n = u32::from(self.arr_acc > 0);
            self.arr_acc = 0;
            return n;
        }
        let n = self.arr_acc / arr;
        self.arr_acc %= arr;
        n
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Option<Horizontal>,
    horizontal_repeat: Repeat,
    down_held: bool,
    down_repeat: Repeat,
    das_ms: u32,
    arr_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            horizontal: None,
            horizontal_repeat: Repeat::default(),
            down_held: false,
            down_repeat: Repeat::default(),
            das_ms,
            arr_ms,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn das_ms(&self) -> u32 {
        self.das_ms
    }

    pub fn arr_ms(&self) -> u32 {
        self.arr_ms
    }

    /// Press (or OS auto-repeat) of a key. Returns the command for a fresh
    /// press of a repeatable key; repeats of an already-held key only keep
    /// it alive.
    ///
    /// Non-repeatable keys are not handled here; map them with
    /// [`crate::handle_key_event`].
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        match key_button(code)? {
            Button::Left => self.press_horizontal(Horizontal::Left),
            Button::Right => self.press_horizontal(Horizontal::Right),
            Button::Down => {
                self.down_repeat.idle_ms = 0;
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat.restart();
                Some(Command::SoftDrop)
            }
            _ => None,
        }
    }

    fn press_horizontal(&mut self, dir: Horizontal) -> Option<Command> {
        self.horizontal_repeat.idle_ms = 0;
        if self.horizontal == Some(dir) {
            return None;
        }
        self.horizontal = Some(dir);
        self.horizontal_repeat.restart();
        Some(dir.command())
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match key_button(code) {
            Some(Button::Left) => self.release_horizontal(Horizontal::Left),
            Some(Button::Right) => self.release_horizontal(Horizontal::Right),
            Some(Button::Down) => {
                self.down_held = false;
                self.down_repeat.restart();
            }
            _ => {}
        }
    }

    fn release_horizontal(&mut self, dir: Horizontal) {
        if self.horizontal == Some(dir) {
            self.horizontal = None;
            self.horizontal_repeat.restart();
        }
    }

    /// Whether a key is flagged as repeatable by this handler.
    pub fn is_repeatable(code: KeyCode) -> bool {
        matches!(
            key_button(code),
            Some(Button::Left | Button::Right | Button::Down)
        )
    }

    /// Advance held keys by `elapsed_ms` and collect due repeats.
    pub fn update(&mut self, elapsed_ms: u32) -> Repeats {
        let mut out = Repeats::new();

        if let Some(dir) = self.horizontal {
            self.horizontal_repeat.idle_ms += elapsed_ms;
            if self.horizontal_repeat.idle_ms > self.key_release_timeout_ms {
                self.release_horizontal(dir);
            } else {
                let n = self
                    .horizontal_repeat
                    .advance(elapsed_ms, self.das_ms, self.arr_ms);
                push_n(&mut out, dir.command(), n);
            }
        }

        if self.down_held {
            self.down_repeat.idle_ms += elapsed_ms;
            if self.down_repeat.idle_ms > self.key_release_timeout_ms {
                self.handle_key_release(KeyCode::Down);
            } else {
                let n = self
                    .down_repeat
                    .advance(elapsed_ms, SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS);
                push_n(&mut out, Command::SoftDrop, n);
            }
        }

        out
    }

    pub fn reset(&mut self) {
        self.horizontal = None;
        self.horizontal_repeat.restart();
        self.down_held = false;
        self.down_repeat.restart();
    }
}

fn push_n(out: &mut Repeats, command: Command, n: u32) {
    for _ in 0..n {
        if out.try_push(command).is_err() {
            break;
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Command::MoveLeft));

        // Before DAS expires: no repeats.
        assert!(ih.update(99).is_empty());

        // Exactly at DAS: still no repeats (needs excess over DAS to accumulate ARR).
        assert!(ih.update(1).is_empty());

        // First ARR interval after DAS: one repeat.
        assert_eq!(ih.update(25).as_slice(), &[Command::MoveLeft]);
        assert_eq!(ih.update(25).as_slice(), &[Command::MoveLeft]);
    }

    #[test]
    fn test_held_press_does_not_retrigger() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Command::MoveLeft));
    }

    #[test]
    fn test_auto_release_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Command::MoveLeft));
        assert!(ih.update(40).is_empty());
        assert_eq!(ih.horizontal, Some(Horizontal::Left));

        assert!(ih.update(11).is_empty());
        assert_eq!(ih.horizontal, None);
    }

    #[test]
    fn test_terminal_repeat_keeps_key_alive() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);
        ih.handle_key_press(KeyCode::Left);
        for _ in 0..5 {
            ih.update(40);
            assert_eq!(ih.handle_key_press(KeyCode::Left), None);
        }
        assert_eq!(ih.horizontal, Some(Horizontal::Left));
    }

    #[test]
    fn test_non_movement_key_does_not_extend_timeout() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);
        ih.handle_key_press(KeyCode::Left);
        ih.update(40);
        assert_eq!(ih.handle_key_press(KeyCode::Up), None);
        ih.update(11);
        assert_eq!(ih.horizontal, None);
    }

    #[test]
    fn test_soft_drop_repeats_use_zero_das_and_50ms_arr() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(Command::SoftDrop));
        assert!(ih.update(49).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[Command::SoftDrop]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[Command::SoftDrop, Command::SoftDrop]
        );
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Char('d'));
        ih.handle_key_release(KeyCode::Char('d'));
        assert!(ih.update(500).is_empty());
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Command::MoveLeft));
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }

    #[test]
    fn test_repeatable_keys() {
        assert!(InputHandler::is_repeatable(KeyCode::Left));
        assert!(InputHandler::is_repeatable(KeyCode::Char('j')));
        assert!(!InputHandler::is_repeatable(KeyCode::Char(' ')));
        assert!(!InputHandler::is_repeatable(KeyCode::Up));
    }
}
