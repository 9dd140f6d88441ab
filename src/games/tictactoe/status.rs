//! Game status as classified by the remote service.

use super::cell::Cell;
use super::types::{Role, Symbol};
use crate::session::GameSession;
use serde::{Deserialize, Serialize};

/// The three cells of a winning combination, in the order the service lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([Cell; 3]);

impl WinLine {
    /// Creates a win line.
    pub fn new(cells: [Cell; 3]) -> Self {
        Self(cells)
    }

    /// The cells in highlight order.
    pub fn cells(&self) -> &[Cell; 3] {
        &self.0
    }
}

/// Current status of the game.
///
/// Set only from service data; the client never detects wins itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    #[default]
    InProgress,
    /// Game ended in a win.
    Won {
        /// Symbol of the winning side.
        winner: Symbol,
        /// Winning combination.
        line: WinLine,
    },
    /// Game ended with a full board and no winner.
    Tied,
}

impl GameStatus {
    /// True once the game is won or tied.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The winning role, resolved through the session's symbol bindings.
    pub fn winner_role(&self, session: &GameSession) -> Option<Role> {
        match self {
            GameStatus::Won { winner, .. } => Some(session.role_of(*winner)),
            _ => None,
        }
    }

    /// The winning line, if any.
    pub fn win_line(&self) -> Option<&WinLine> {
        match self {
            GameStatus::Won { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Outcome framed for the human player, once the game is over.
    pub fn outcome(&self, session: &GameSession) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Tied => Some(Outcome::Tie),
            GameStatus::Won { .. } => self.winner_role(session).map(|role| match role {
                Role::Human => Outcome::HumanWon,
                Role::Remote => Outcome::RemoteWon,
            }),
        }
    }
}

/// End of game from the human's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The human completed a line.
    HumanWon,
    /// The computer completed a line.
    RemoteWon,
    /// Board filled without a line.
    Tie,
}

impl Outcome {
    /// Message shown in the human's panel.
    pub fn human_message(self) -> &'static str {
        match self {
            Outcome::HumanWon => "You win!",
            Outcome::RemoteWon => "You lose!",
            Outcome::Tie => "Tie!",
        }
    }

    /// Message shown in the computer's panel.
    pub fn remote_message(self) -> &'static str {
        match self {
            Outcome::HumanWon => "Computer loses!",
            Outcome::RemoteWon => "Computer wins!",
            Outcome::Tie => "Tie!",
        }
    }
}
