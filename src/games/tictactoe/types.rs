//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// Mark placed on the board, as named by the remote service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumString,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Symbol {
    /// The "ex" mark (moves first in a fresh game).
    #[display("ex")]
    Ex,
    /// The "oh" mark.
    #[display("oh")]
    Oh,
}

impl Symbol {
    /// Returns the other symbol.
    pub fn opposite(self) -> Self {
        match self {
            Symbol::Ex => Symbol::Oh,
            Symbol::Oh => Symbol::Ex,
        }
    }

    /// Single-character label for terminal display.
    pub fn glyph(self) -> char {
        match self {
            Symbol::Ex => 'X',
            Symbol::Oh => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a symbol.
    Occupied(Symbol),
}

impl Square {
    /// True when no symbol has been placed.
    pub fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }

    /// The symbol on this square, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Square::Empty => None,
            Square::Occupied(symbol) => Some(symbol),
        }
    }
}

/// Participant role in a game against the remote service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// The local human player.
    #[display("Human")]
    Human,
    /// The remote computer opponent.
    #[display("Computer")]
    Remote,
}

impl Role {
    /// Returns the other role.
    pub fn opponent(self) -> Self {
        match self {
            Role::Human => Role::Remote,
            Role::Remote => Role::Human,
        }
    }
}
