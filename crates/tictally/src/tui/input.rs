//! Key bindings and cursor movement.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tictally_engine::{Mode, Position};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor with an arrow key.
    Cursor(KeyCode),
    /// Play on the square under the cursor.
    PlayCursor,
    /// Play on a specific square (keys 1-9).
    Play(Position),
    /// Switch opponent mode.
    SwitchMode(Mode),
    /// Clear the board, keep the score.
    NewGame,
    /// Clear the board and the score.
    ResetAll,
    /// Leave the program.
    Quit,
}

/// Maps a key press to a command.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Command::Cursor(key.code))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::PlayCursor),
        KeyCode::Char(c @ '1'..='9') => {
            let digit = c.to_digit(10)? as usize;
            Position::from_index(digit - 1).map(Command::Play)
        }
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::SwitchMode(Mode::Multiplayer)),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::SwitchMode(Mode::VsComputer)),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::NewGame),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::ResetAll),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Moves cursor based on arrow keys. Edges don't wrap.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_map_to_positions() {
        assert_eq!(
            command_for(press(KeyCode::Char('1'))),
            Some(Command::Play(Position::TopLeft))
        );
        assert_eq!(
            command_for(press(KeyCode::Char('9'))),
            Some(Command::Play(Position::BottomRight))
        );
        assert_eq!(command_for(press(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(command_for(press(KeyCode::Char('n'))), Some(Command::NewGame));
        assert_eq!(command_for(press(KeyCode::Char('r'))), Some(Command::ResetAll));
        assert_eq!(
            command_for(press(KeyCode::Char('c'))),
            Some(Command::SwitchMode(Mode::VsComputer))
        );
        assert_eq!(
            command_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(command_for(press(KeyCode::Esc)), Some(Command::Quit));
    }

    #[test]
    fn test_cursor_moves_and_stops_at_edges() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Down),
            Position::BottomRight
        );
        assert_eq!(
            move_cursor(Position::BottomCenter, KeyCode::Right),
            Position::BottomRight
        );
    }
}
