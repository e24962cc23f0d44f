//! Key bindings: normal and vim-style.

use crate::session::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action from a key press. Game commands are forwarded to the session;
/// the rest are shell-level (start/pause, reset, quit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    StartPause,
    Reset,
    Quit,
    None,
}

/// Map key event to action. Supports both normal (arrows, space) and vim (hjkl).
/// Unrecognized keys map to `None` and are silently ignored.
pub fn key_to_action(key: KeyEvent) -> Action {
    let no_mod = key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('p') | KeyCode::Char(' ') | KeyCode::Enter => Action::StartPause,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Left | KeyCode::Char('h') => Action::Game(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Action::Game(Command::MoveRight),
        KeyCode::Up | KeyCode::Char('k') => Action::Game(Command::Rotate),
        KeyCode::Down | KeyCode::Char('j') => Action::Game(Command::SoftDrop),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_map_to_commands() {
        assert_eq!(key_to_action(key(KeyCode::Left)), Action::Game(Command::MoveLeft));
        assert_eq!(key_to_action(key(KeyCode::Up)), Action::Game(Command::Rotate));
        assert_eq!(key_to_action(key(KeyCode::Down)), Action::Game(Command::SoftDrop));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), Action::None);
        assert_eq!(key_to_action(key(KeyCode::Tab)), Action::None);
    }
}
