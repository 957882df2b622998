//! Cursor-driven input handler.
//!
//! Turns mapped [`GameAction`]s into [`Command`]s aimed at grid positions. The
//! cursor itself never leaves the grid; moves against an edge are dropped.

use crossterm::event::KeyEvent;

use crate::map::handle_key_event;
use crate::types::{Direction, GameAction, Position, GRID_SIZE};

/// What the game loop should do with the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Click the tile at this position
    Select(Position),
    Hint,
    Restart,
}

/// Tracks the cursor between key presses.
#[derive(Debug, Clone)]
pub struct InputHandler {
    cursor: Position,
}

impl InputHandler {
    /// Cursor starts near the middle of the grid
    pub fn new() -> Self {
        Self {
            cursor: Position::new(GRID_SIZE / 2, GRID_SIZE / 2),
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor one tile. Returns false at an edge.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        match self.cursor.step(direction) {
            Some(next) => {
                self.cursor = next;
                true
            }
            None => false,
        }
    }

    pub fn handle_action(&mut self, action: GameAction) -> Option<Command> {
        match action {
            GameAction::MoveCursor(direction) => {
                self.move_cursor(direction);
                None
            }
            GameAction::Select => Some(Command::Select(self.cursor)),
            GameAction::Hint => Some(Command::Hint),
            GameAction::Restart => {
                self.reset();
                Some(Command::Restart)
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        handle_key_event(key).and_then(|action| self.handle_action(action))
    }

    pub fn reset(&mut self) {
        *self = Self::new();
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
    use crossterm::event::KeyCode;

    #[test]
    fn cursor_moves_and_selects() {
        let mut input = InputHandler::new();
        assert_eq!(input.cursor(), Position::new(3, 3));

        assert_eq!(input.handle_key(KeyEvent::from(KeyCode::Left)), None);
        assert_eq!(input.handle_key(KeyEvent::from(KeyCode::Char('k'))), None);
        assert_eq!(
            input.handle_key(KeyEvent::from(KeyCode::Char(' '))),
            Some(Command::Select(Position::new(2, 2)))
        );
    }

    #[test]
    fn cursor_stops_at_edges() {
        let mut input = InputHandler::new();
        for _ in 0..10 {
            input.move_cursor(Direction::Up);
            input.move_cursor(Direction::Right);
        }
        assert_eq!(input.cursor(), Position::new(0, GRID_SIZE - 1));
        assert!(!input.move_cursor(Direction::Up));
        assert!(input.move_cursor(Direction::Down));
    }

    #[test]
    fn restart_recentres_cursor() {
        let mut input = InputHandler::new();
        input.move_cursor(Direction::Down);
        assert_eq!(
            input.handle_action(GameAction::Restart),
            Some(Command::Restart)
        );
        assert_eq!(input.cursor(), Position::new(3, 3));
        assert_eq!(input.handle_action(GameAction::Hint), Some(Command::Hint));
    }
}
