//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => {
            Some(GameAction::MoveCursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => {
            Some(GameAction::MoveCursor(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => {
            Some(GameAction::MoveCursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => {
            Some(GameAction::MoveCursor(Direction::Down))
        }

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Select),
        KeyCode::Char('?') => Some(GameAction::Hint),
        KeyCode::Char('r' | 'R') => Some(GameAction::Restart),

        _ => None,
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

    fn key(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_cursor_keys() {
        assert_eq!(
            key(KeyCode::Left),
            Some(GameAction::MoveCursor(Direction::Left))
        );
        assert_eq!(
            key(KeyCode::Char('l')),
            Some(GameAction::MoveCursor(Direction::Right))
        );
        assert_eq!(
            key(KeyCode::Char('W')),
            Some(GameAction::MoveCursor(Direction::Up))
        );
        assert_eq!(
            key(KeyCode::Char('j')),
            Some(GameAction::MoveCursor(Direction::Down))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Char(' ')), Some(GameAction::Select));
        assert_eq!(key(KeyCode::Enter), Some(GameAction::Select));
        assert_eq!(key(KeyCode::Char('?')), Some(GameAction::Hint));
        assert_eq!(key(KeyCode::Char('R')), Some(GameAction::Restart));
        assert_eq!(key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_control_chords_are_not_actions() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            None
        );
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
}
