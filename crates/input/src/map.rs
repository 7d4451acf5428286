//! Key mapping from terminal events to game commands.
//!
//! Keyboard and pointer input both go through the same gameboy button
//! vocabulary, so a click on the on-screen START button and the Enter key
//! behave identically.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Command, Phase};

/// Buttons on the gameboy face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Start,
    Select,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
        Button::Start,
        Button::Select,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Button::Up => "^",
            Button::Down => "v",
            Button::Left => "<",
            Button::Right => ">",
            Button::A => "A",
            Button::B => "B",
            Button::Start => "START",
            Button::Select => "SELECT",
        }
    }
}

/// What START means in the current phase.
pub fn start_button(phase: Phase) -> Command {
    match phase {
        Phase::NotStarted => Command::Start,
        Phase::GameOver => Command::Restart,
        Phase::Running | Phase::Paused => Command::Pause,
    }
}

pub fn button_command(button: Button, phase: Phase) -> Command {
    match button {
        Button::Up | Button::A => Command::Rotate,
        Button::Down => Command::SoftDrop,
        Button::Left => Command::MoveLeft,
        Button::Right => Command::MoveRight,
        Button::B => Command::HardDrop,
        Button::Start => start_button(phase),
        Button::Select => Command::Restart,
    }
}

/// Gameboy button a key stands for, if any.
pub fn key_button(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Button::Right),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Button::Down),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W' | 'x' | 'X') => Some(Button::Up),
        KeyCode::Char(' ') => Some(Button::B),
        KeyCode::Enter => Some(Button::Start),
        _ => None,
    }
}

/// Map keyboard input to a game command.
pub fn handle_key_event(key: KeyEvent, phase: Phase) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('p' | 'P') => Some(Command::Pause),
        KeyCode::Char('r' | 'R') => Some(Command::Restart),
        code => key_button(code).map(|button| button_command(button, phase)),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Option<Command> {
        handle_key_event(KeyEvent::from(code), Phase::Running)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(key(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(key(KeyCode::Down), Some(Command::SoftDrop));

        assert_eq!(key(KeyCode::Char('H')), Some(Command::MoveLeft));
        assert_eq!(key(KeyCode::Char('d')), Some(Command::MoveRight));
        assert_eq!(key(KeyCode::Char('j')), Some(Command::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(key(KeyCode::Up), Some(Command::Rotate));
        assert_eq!(key(KeyCode::Char('W')), Some(Command::Rotate));
        assert_eq!(key(KeyCode::Char('k')), Some(Command::Rotate));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Char(' ')), Some(Command::HardDrop));
        assert_eq!(key(KeyCode::Char('p')), Some(Command::Pause));
        assert_eq!(key(KeyCode::Char('R')), Some(Command::Restart));
        assert_eq!(key(KeyCode::Char('c')), None);
        assert_eq!(key(KeyCode::Tab), None);
    }

    #[test]
    fn test_enter_follows_start_button() {
        let enter = KeyEvent::from(KeyCode::Enter);
        assert_eq!(handle_key_event(enter, Phase::NotStarted), Some(Command::Start));
        assert_eq!(handle_key_event(enter, Phase::Running), Some(Command::Pause));
        assert_eq!(handle_key_event(enter, Phase::Paused), Some(Command::Pause));
        assert_eq!(handle_key_event(enter, Phase::GameOver), Some(Command::Restart));
    }

    #[test]
    fn test_buttons() {
        assert_eq!(button_command(Button::A, Phase::Running), Command::Rotate);
        assert_eq!(button_command(Button::B, Phase::Running), Command::HardDrop);
        assert_eq!(button_command(Button::Select, Phase::Paused), Command::Restart);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }

    #[test]
    fn test_ctrl_chords_are_not_commands() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_d, Phase::Running), None);
    }
}
