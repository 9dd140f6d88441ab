//! View state fed by the state machine.

use crate::error::GameError;
use crate::games::tictactoe::{Cell, Outcome, Role, Symbol};
use crate::presentation::PresentationAdapter;
use std::time::{Duration, Instant};
use tracing::debug;

/// Presentation adapter backing the terminal UI.
#[derive(Debug, Clone)]
pub struct TuiPresenter {
    marks: [Option<Symbol>; 9],
    turn: Role,
    input_enabled: bool,
    highlights: Vec<(Cell, Instant)>,
    stagger: Duration,
    outcome: Option<Outcome>,
    error: Option<String>,
}

impl TuiPresenter {
    /// Creates an empty view that reveals winning cells `stagger` apart.
    pub fn new(stagger: Duration) -> Self {
        Self {
            marks: [None; 9],
            turn: Role::Human,
            input_enabled: false,
            highlights: Vec::new(),
            stagger,
            outcome: None,
            error: None,
        }
    }

    /// Mark shown on `cell`.
    pub fn mark(&self, cell: Cell) -> Option<Symbol> {
        self.marks[cell.to_index()]
    }

    /// Role whose panel is active.
    pub fn turn(&self) -> Role {
        self.turn
    }

    /// True while the board accepts clicks.
    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// True once `cell`'s highlight is due at `now`.
    pub fn is_highlighted(&self, cell: Cell, now: Instant) -> bool {
        self.highlights
            .iter()
            .any(|(c, reveal_at)| *c == cell && *reveal_at <= now)
    }

    /// Final outcome, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Last error message, cleared by the next successful change.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Text for the human's panel.
    pub fn human_message(&self) -> &'static str {
        match self.outcome {
            Some(outcome) => outcome.human_message(),
            None => "Your turn!",
        }
    }

    /// Text for the computer's panel.
    pub fn remote_message(&self) -> &'static str {
        match self.outcome {
            Some(outcome) => outcome.remote_message(),
            None => "Computer's turn!",
        }
    }
}

impl PresentationAdapter for TuiPresenter {
    fn turn_changed(&mut self, role: Role) {
        self.turn = role;
    }

    fn cell_marked(&mut self, cell: Cell, symbol: Symbol) {
        self.marks[cell.to_index()] = Some(symbol);
        self.error = None;
    }

    fn board_cleared(&mut self) {
        debug!("Clearing view");
        self.marks = [None; 9];
        self.highlights.clear();
        self.outcome = None;
        self.error = None;
    }

    fn input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn highlight(&mut self, cell: Cell, step: usize) {
        let delay = self.stagger * u32::try_from(step).unwrap_or(u32::MAX);
        self.highlights.push((cell, Instant::now() + delay));
    }

    fn game_over(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }

    fn error(&mut self, error: &GameError) {
        self.error = Some(error.user_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlights_reveal_in_sequence() {
        let mut view = TuiPresenter::new(Duration::from_millis(100));
        let cells = [
            Cell::new(0, 0).unwrap(),
            Cell::new(1, 1).unwrap(),
            Cell::new(2, 2).unwrap(),
        ];
        for (step, cell) in cells.iter().enumerate() {
            view.highlight(*cell, step);
        }
        let now = Instant::now();
        assert!(view.is_highlighted(cells[0], now));
        assert!(!view.is_highlighted(cells[2], now));
        assert!(view.is_highlighted(cells[2], now + Duration::from_millis(250)));
    }

    #[test]
    fn test_outcome_messages() {
        let mut view = TuiPresenter::new(Duration::ZERO);
        assert_eq!(view.human_message(), "Your turn!");
        view.game_over(Outcome::Tie);
        assert_eq!(view.human_message(), "Tie!");
        assert_eq!(view.remote_message(), "Tie!");
        view.board_cleared();
        assert_eq!(view.outcome(), None);
    }
}
