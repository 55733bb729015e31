//! Keyboard mapping.

use crate::session::Phase;
use crossterm::event::KeyCode;
use tictactoe_engine::{COLS, Position, ROWS};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the program.
    Quit,
    /// Leave the home screen.
    Start,
    /// Play again after a finished match.
    NewMatch,
    /// Back to the home screen.
    Home,
    /// Zero the win counters.
    ResetScores,
    /// Show or hide move hints.
    ToggleHints,
    /// Move the cursor one square.
    MoveCursor(KeyCode),
    /// Play the square under the cursor.
    PlayCursor,
    /// Play a numbered square.
    PlayAt(Position),
}

/// Maps a key to a command for the given phase.
pub fn command_for_key(code: KeyCode, phase: Phase) -> Option<Command> {
    match (code, phase) {
        (KeyCode::Char('q') | KeyCode::Esc, _) => Some(Command::Quit),
        (KeyCode::Char('r'), _) => Some(Command::ResetScores),
        (KeyCode::Char('i'), _) => Some(Command::ToggleHints),
        (KeyCode::Char('h'), Phase::InProgress { .. } | Phase::Over(_)) => Some(Command::Home),

        (KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s'), Phase::NotStarted) => {
            Some(Command::Start)
        }

        (KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n'), Phase::Over(_)) => {
            Some(Command::NewMatch)
        }

        (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right, Phase::InProgress { .. }) => {
            Some(Command::MoveCursor(code))
        }
        (KeyCode::Enter | KeyCode::Char(' '), Phase::InProgress { .. }) => {
            Some(Command::PlayCursor)
        }
        (KeyCode::Char(c @ '1'..='9'), Phase::InProgress { .. }) => c
            .to_digit(10)
            .and_then(|d| Position::from_index(d as usize - 1))
            .map(Command::PlayAt),

        _ => None,
    }
}

/// Moves cursor based on arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let Position { row, col } = cursor;
    match key {
        KeyCode::Up => Position::new(row.saturating_sub(1), col),
        KeyCode::Down => Position::new((row + 1).min(ROWS - 1), col),
        KeyCode::Left => Position::new(row, col.saturating_sub(1)),
        KeyCode::Right => Position::new(row, (col + 1).min(COLS - 1)),
        _ => cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::Mark;

    const PLAYING: Phase = Phase::InProgress {
        to_move: Mark::Player,
    };

    #[test]
    fn test_cursor_stops_at_edges() {
        let corner = Position::new(0, 0);
        assert_eq!(move_cursor(corner, KeyCode::Up), corner);
        assert_eq!(move_cursor(corner, KeyCode::Left), corner);
        assert_eq!(move_cursor(corner, KeyCode::Right), Position::new(0, 1));
        assert_eq!(move_cursor(corner, KeyCode::Down), Position::new(1, 0));

        let far = Position::new(2, 2);
        assert_eq!(move_cursor(far, KeyCode::Down), far);
        assert_eq!(move_cursor(far, KeyCode::Right), far);
    }

    #[test]
    fn test_enter_depends_on_phase() {
        assert_eq!(
            command_for_key(KeyCode::Enter, Phase::NotStarted),
            Some(Command::Start)
        );
        assert_eq!(
            command_for_key(KeyCode::Enter, PLAYING),
            Some(Command::PlayCursor)
        );
        assert_eq!(
            command_for_key(
                KeyCode::Enter,
                Phase::Over(tictactoe_engine::Outcome::Draw)
            ),
            Some(Command::NewMatch)
        );
    }

    #[test]
    fn test_digits_map_row_major() {
        assert_eq!(
            command_for_key(KeyCode::Char('1'), PLAYING),
            Some(Command::PlayAt(Position::new(0, 0)))
        );
        assert_eq!(
            command_for_key(KeyCode::Char('6'), PLAYING),
            Some(Command::PlayAt(Position::new(1, 2)))
        );
        assert_eq!(command_for_key(KeyCode::Char('6'), Phase::NotStarted), None);
    }

    #[test]
    fn test_quit_everywhere() {
        assert_eq!(
            command_for_key(KeyCode::Char('q'), Phase::NotStarted),
            Some(Command::Quit)
        );
        assert_eq!(command_for_key(KeyCode::Esc, PLAYING), Some(Command::Quit));
    }
}
