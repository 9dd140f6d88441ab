//! Presentation seam between the state machine and a front end.

use crate::error::GameError;
use crate::games::tictactoe::{Cell, Outcome, Role, Symbol};
use tracing::{info, warn};

/// Receives fire-and-forget notifications from the state machine.
///
/// Nothing here feeds back into game correctness; a front end is free to
/// animate, delay or drop these signals.
pub trait PresentationAdapter {
    /// The turn passed to `role`.
    fn turn_changed(&mut self, role: Role);

    /// `symbol` appeared on `cell`.
    fn cell_marked(&mut self, cell: Cell, symbol: Symbol);

    /// Every cell was cleared for a new game.
    fn board_cleared(&mut self);

    /// Human input was enabled or disabled.
    fn input_enabled(&mut self, enabled: bool);

    /// Winning cell number `step` (0-2) should be highlighted. Steps arrive in
    /// order and may be revealed one after another.
    fn highlight(&mut self, cell: Cell, step: usize);

    /// The game ended.
    fn game_over(&mut self, outcome: Outcome);

    /// An operation failed.
    fn error(&mut self, error: &GameError);
}

/// Adapter that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPresenter;

impl PresentationAdapter for TracingPresenter {
    fn turn_changed(&mut self, role: Role) {
        info!(role = %role, "Turn changed");
    }

    fn cell_marked(&mut self, cell: Cell, symbol: Symbol) {
        info!(cell = %cell, symbol = %symbol, "Cell marked");
    }

    fn board_cleared(&mut self) {
        info!("Board cleared");
    }

    fn input_enabled(&mut self, enabled: bool) {
        info!(enabled, "Input toggled");
    }

    fn highlight(&mut self, cell: Cell, step: usize) {
        info!(cell = %cell, step, "Highlight");
    }

    fn game_over(&mut self, outcome: Outcome) {
        info!(
            human = outcome.human_message(),
            computer = outcome.remote_message(),
            "Game over"
        );
    }

    fn error(&mut self, error: &GameError) {
        warn!(error = %error, "Operation failed");
    }
}

/// One notification captured by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationEvent {
    /// See [`PresentationAdapter::turn_changed`].
    TurnChanged(Role),
    /// See [`PresentationAdapter::cell_marked`].
    CellMarked(Cell, Symbol),
    /// See [`PresentationAdapter::board_cleared`].
    BoardCleared,
    /// See [`PresentationAdapter::input_enabled`].
    InputEnabled(bool),
    /// See [`PresentationAdapter::highlight`].
    Highlight(Cell, usize),
    /// See [`PresentationAdapter::game_over`].
    GameOver(Outcome),
    /// See [`PresentationAdapter::error`]; holds the user message.
    Error(String),
}

/// Adapter that records every notification, for tests and replays.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    events: Vec<PresentationEvent>,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in arrival order.
    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    /// Highlighted cells in the order they were revealed.
    pub fn highlights(&self) -> Vec<Cell> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresentationEvent::Highlight(cell, _) => Some(*cell),
                _ => None,
            })
            .collect()
    }

    /// Most recent input-enabled signal.
    pub fn input_state(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match e {
            PresentationEvent::InputEnabled(enabled) => Some(*enabled),
            _ => None,
        })
    }

    /// Error messages in arrival order.
    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresentationEvent::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Forgets recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PresentationAdapter for RecordingPresenter {
    fn turn_changed(&mut self, role: Role) {
        self.events.push(PresentationEvent::TurnChanged(role));
    }

    fn cell_marked(&mut self, cell: Cell, symbol: Symbol) {
        self.events.push(PresentationEvent::CellMarked(cell, symbol));
    }

    fn board_cleared(&mut self) {
        self.events.push(PresentationEvent::BoardCleared);
    }

    fn input_enabled(&mut self, enabled: bool) {
        self.events.push(PresentationEvent::InputEnabled(enabled));
    }

    fn highlight(&mut self, cell: Cell, step: usize) {
        self.events.push(PresentationEvent::Highlight(cell, step));
    }

    fn game_over(&mut self, outcome: Outcome) {
        self.events.push(PresentationEvent::GameOver(outcome));
    }

    fn error(&mut self, error: &GameError) {
        self.events.push(PresentationEvent::Error(error.user_message()));
    }
}
