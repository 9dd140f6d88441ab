//! Turn ownership.

use crate::games::tictactoe::Role;
use tracing::{debug, instrument};

/// Tracks which role may act next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnController {
    current: Role,
}

impl TurnController {
    /// Starts with the human to move.
    pub fn new() -> Self {
        Self {
            current: Role::Human,
        }
    }

    /// Role currently eligible to act.
    pub fn current(&self) -> Role {
        self.current
    }

    /// Hands the turn to the other role.
    ///
    /// Unguarded: call exactly once per completed move.
    #[instrument(skip(self), fields(from = %self.current))]
    pub fn toggle(&mut self) -> Role {
        self.current = self.current.opponent();
        debug!(to = %self.current, "Turn toggled");
        self.current
    }

    /// Forces the turn, e.g. to match a fetched snapshot.
    #[instrument(skip(self), fields(from = %self.current))]
    pub fn set_current(&mut self, role: Role) {
        self.current = role;
    }

    /// True when the human may act.
    pub fn is_human(&self) -> bool {
        self.current == Role::Human
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_alternates() {
        let mut turn = TurnController::new();
        assert!(turn.is_human());
        assert_eq!(turn.toggle(), Role::Remote);
        assert_eq!(turn.toggle(), Role::Human);
    }

    #[test]
    fn test_set_current_overrides() {
        let mut turn = TurnController::new();
        turn.set_current(Role::Remote);
        assert_eq!(turn.current(), Role::Remote);
        turn.set_current(Role::Remote);
        assert_eq!(turn.current(), Role::Remote);
    }
}
