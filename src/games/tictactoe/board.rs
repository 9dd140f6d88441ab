//! Local 3x3 board.

use super::cell::Cell;
use super::types::{Square, Symbol};
use serde::{Deserialize, Serialize};

/// 3x3 tic-tac-toe board.
///
/// Squares only ever move from `Empty` to `Occupied`; the single way back is
/// [`BoardState::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl BoardState {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given cell.
    pub fn get(&self, cell: Cell) -> Square {
        self.squares[cell.to_index()]
    }

    /// Places `symbol` on an empty cell.
    ///
    /// Returns `false` and leaves the board untouched when the cell is
    /// already occupied.
    pub fn mark(&mut self, cell: Cell, symbol: Symbol) -> bool {
        let square = &mut self.squares[cell.to_index()];
        if !square.is_empty() {
            return false;
        }
        *square = Square::Occupied(symbol);
        true
    }

    /// Clears every cell to `Empty`.
    pub fn reset(&mut self) {
        self.squares = [Square::Empty; 9];
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_empty()
    }

    /// True when no cell is occupied.
    pub fn is_blank(&self) -> bool {
        self.squares.iter().all(|s| s.is_empty())
    }

    /// Number of cells holding `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(symbol))
            .count()
    }

    /// Occupied cells with their symbols, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, Symbol)> + '_ {
        Cell::ALL
            .into_iter()
            .filter_map(|cell| self.get(cell).symbol().map(|symbol| (cell, symbol)))
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (i, cell) in Cell::ALL.iter().enumerate() {
            let symbol = match self.get(*cell) {
                Square::Empty => '-',
                Square::Occupied(symbol) => symbol.glyph(),
            };
            result.push(symbol);
            if cell.col() < 2 {
                result.push('|');
            } else if i < 8 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u8, col: u8) -> Cell {
        Cell::new(row, col).unwrap()
    }

    #[test]
    fn test_mark_is_monotonic() {
        let mut board = BoardState::new();
        assert!(board.mark(cell(0, 0), Symbol::Ex));
        assert!(!board.mark(cell(0, 0), Symbol::Oh));
        assert_eq!(board.get(cell(0, 0)), Square::Occupied(Symbol::Ex));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = BoardState::new();
        board.mark(cell(1, 1), Symbol::Oh);
        board.mark(cell(2, 0), Symbol::Ex);
        assert!(!board.is_blank());
        board.reset();
        assert!(board.is_blank());
    }

    #[test]
    fn test_counts_and_occupied() {
        let mut board = BoardState::new();
        board.mark(cell(0, 0), Symbol::Ex);
        board.mark(cell(1, 1), Symbol::Oh);
        board.mark(cell(2, 2), Symbol::Ex);
        assert_eq!(board.count(Symbol::Ex), 2);
        assert_eq!(board.count(Symbol::Oh), 1);
        let occupied: Vec<_> = board.occupied().collect();
        assert_eq!(
            occupied,
            vec![
                (cell(0, 0), Symbol::Ex),
                (cell(1, 1), Symbol::Oh),
                (cell(2, 2), Symbol::Ex)
            ]
        );
    }

    #[test]
    fn test_display() {
        let mut board = BoardState::new();
        board.mark(cell(0, 0), Symbol::Ex);
        board.mark(cell(1, 1), Symbol::Oh);
        assert_eq!(board.display(), "X|-|-\n-+-+-\n-|O|-\n-+-+-\n-|-|-");
    }
}
