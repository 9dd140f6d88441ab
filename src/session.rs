//! Per-game symbol bindings.

use crate::games::tictactoe::{BoardState, Role, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Binds each role to its symbol for the lifetime of a game instance.
///
/// Owned by the state machine and lent to collaborators by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    human: Symbol,
}

impl GameSession {
    /// Creates a session where the human plays `human`.
    #[instrument]
    pub fn new(human: Symbol) -> Self {
        debug!(remote = %human.opposite(), "Binding player symbols");
        Self { human }
    }

    /// The human's symbol.
    pub fn human(&self) -> Symbol {
        self.human
    }

    /// The computer's symbol.
    pub fn remote(&self) -> Symbol {
        self.human.opposite()
    }

    /// Symbol bound to `role`.
    pub fn symbol_of(&self, role: Role) -> Symbol {
        match role {
            Role::Human => self.human(),
            Role::Remote => self.remote(),
        }
    }

    /// Role bound to `symbol`.
    pub fn role_of(&self, symbol: Symbol) -> Role {
        if symbol == self.human {
            Role::Human
        } else {
            Role::Remote
        }
    }

    /// Infers whose turn it is from the marks on an in-progress board.
    ///
    /// The computer only moves in response to the human (or when asked to
    /// open), so the human is behind or level whenever it is their turn.
    pub fn infer_turn(&self, board: &BoardState) -> Role {
        if board.count(self.human()) > board.count(self.remote()) {
            Role::Remote
        } else {
            Role::Human
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Symbol::Ex)
    }
}
