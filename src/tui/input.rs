//! Keyboard mapping.

use crate::games::tictactoe::Cell;
use crossterm::event::KeyCode;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Move the cursor.
    Cursor(Cell),
    /// Click a cell.
    Click(Cell),
    /// Start a new game.
    Restart,
    /// Ask the computer to move.
    ComputerMove,
    /// Re-fetch the remote state now.
    Refresh,
    /// Leave the game.
    Quit,
    /// Unmapped key.
    None,
}

/// Moves cursor based on arrow keys.
pub fn move_cursor(cursor: Cell, key: KeyCode) -> Cell {
    match key {
        KeyCode::Right => cursor.step(0, 1),
        KeyCode::Left => cursor.step(0, -1),
        KeyCode::Down => cursor.step(1, 0),
        KeyCode::Up => cursor.step(-1, 0),
        _ => cursor,
    }
}

/// Maps a key to an action given the current cursor.
///
/// Digits 1-9 click cells in row-major order.
pub fn action_for(cursor: Cell, key: KeyCode) -> KeyAction {
    match key {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            KeyAction::Cursor(move_cursor(cursor, key))
        }
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Click(cursor),
        KeyCode::Char(c) if c.is_ascii_digit() => c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(Cell::from_index)
            .map(KeyAction::Click)
            .unwrap_or(KeyAction::None),
        KeyCode::Char('r') => KeyAction::Restart,
        KeyCode::Char('c') => KeyAction::ComputerMove,
        KeyCode::Char('f') => KeyAction::Refresh,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
