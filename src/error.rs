//! Error types for the game client.

use derive_more::{Display, Error};
use tracing::instrument;

/// Category of a game client failure.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// Transport failure; no response was received.
    #[display("Network error: {}", _0)]
    Network(String),

    /// The service answered with an error status or an unreadable payload.
    #[display("Service error: {}", _0)]
    Service(String),

    /// The service rejected a submitted move.
    #[display("Illegal move: {}", _0)]
    IllegalMove(String),

    /// Coordinates outside the board.
    #[display("Invalid cell ({}, {})", row, col)]
    InvalidCell {
        /// Requested row.
        row: u8,
        /// Requested column.
        col: u8,
    },
}

/// Game client error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct GameError {
    /// What went wrong.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Transport failure.
    #[track_caller]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Network(message.into()))
    }

    /// Error status or malformed payload from the service.
    #[track_caller]
    pub fn service(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Service(message.into()))
    }

    /// Move rejected by the service.
    #[track_caller]
    pub fn illegal_move(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::IllegalMove(message.into()))
    }

    /// Out-of-range coordinates.
    #[track_caller]
    pub fn invalid_cell(row: u8, col: u8) -> Self {
        Self::new(GameErrorKind::InvalidCell { row, col })
    }

    /// Returns the error category.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }

    /// True when the service rejected a move, which signals local desync.
    pub fn is_illegal_move(&self) -> bool {
        matches!(self.kind, GameErrorKind::IllegalMove(_))
    }

    /// Short message without location, for display to the player.
    pub fn user_message(&self) -> String {
        self.kind.to_string()
    }
}

impl From<reqwest::Error> for GameError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::service(format!("Malformed response: {}", err))
        } else if let Some(status) = err.status() {
            Self::service(format!("HTTP {}", status))
        } else {
            Self::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GameError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::service(format!("Malformed response: {}", err))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_location() {
        let err = GameError::illegal_move("square taken");
        let text = err.to_string();
        assert!(text.starts_with("Illegal move: square taken at "));
        assert!(text.contains("error.rs"));
        assert_eq!(err.user_message(), "Illegal move: square taken");
    }

    #[test]
    fn test_invalid_cell_kind() {
        let err = GameError::invalid_cell(3, 1);
        assert_eq!(*err.kind(), GameErrorKind::InvalidCell { row: 3, col: 1 });
        assert!(!err.is_illegal_move());
    }
}
