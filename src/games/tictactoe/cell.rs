//! Board coordinates and their two-character wire identifiers.
//!
//! A cell id is the row digit followed by the column digit (`"12"` is row 1,
//! column 2). Each coordinate is a single decimal digit, so the encoding is
//! lossless for boards up to 10x10.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 3;

/// A validated (row, column) coordinate on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// All 9 cells in row-major order.
    pub const ALL: [Cell; 9] = [
        Cell { row: 0, col: 0 },
        Cell { row: 0, col: 1 },
        Cell { row: 0, col: 2 },
        Cell { row: 1, col: 0 },
        Cell { row: 1, col: 1 },
        Cell { row: 1, col: 2 },
        Cell { row: 2, col: 0 },
        Cell { row: 2, col: 1 },
        Cell { row: 2, col: 2 },
    ];

    /// Creates a cell, rejecting coordinates outside the board.
    #[track_caller]
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GameError::invalid_cell(row, col));
        }
        Ok(Self { row, col })
    }

    /// Row index (0-2).
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column index (0-2).
    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major index (0-8).
    pub fn to_index(self) -> usize {
        usize::from(self.row) * usize::from(BOARD_SIZE) + usize::from(self.col)
    }

    /// Creates a cell from a row-major index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Two-character wire identifier, e.g. `"02"`.
    pub fn id(self) -> String {
        format!("{}{}", self.row, self.col)
    }

    /// Parses a two-character wire identifier.
    #[instrument]
    #[track_caller]
    pub fn from_id(id: &str) -> Result<Self, GameError> {
        let mut digits = id.chars().map(|c| c.to_digit(10));
        match (digits.next(), digits.next(), digits.next()) {
            (Some(Some(row)), Some(Some(col)), None) => Self::new(row as u8, col as u8),
            _ => Err(GameError::service(format!("Malformed cell id {:?}", id))),
        }
    }

    /// Moves one step in the given direction, staying on the board.
    pub fn step(self, d_row: i8, d_col: i8) -> Self {
        let clamp = |v: u8, d: i8| -> u8 {
            let next = i16::from(v) + i16::from(d);
            next.clamp(0, i16::from(BOARD_SIZE) - 1) as u8
        };
        Self {
            row: clamp(self.row, d_row),
            col: clamp(self.col, d_col),
        }
    }
}

impl TryFrom<(u8, u8)> for Cell {
    type Error = GameError;

    #[track_caller]
    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(row, col)
    }
}

impl From<Cell> for (u8, u8) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
