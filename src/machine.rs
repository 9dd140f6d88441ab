//! Turn-cycle state machine.
//!
//! The machine owns the local board, the turn and the status, and is the only
//! place they change. Every operation takes `&mut self` and runs to completion,
//! so the interval between sending a request and applying its response is a
//! locked window: no second human move can start until the first one settles.
//!
//! # Turn cycle
//!
//! 1. Fetch a snapshot and reconcile it, so a cell claimed from another window
//!    is never submitted.
//! 2. Mark the human cell, hand the turn to the computer, submit the move.
//! 3. Mark the computer's reply, hand the turn back, evaluate the status.
//!
//! Any failure restores the board and turn from before step 2 and re-enables
//! input; a rejected move additionally triggers a full resync.

use crate::error::GameError;
use crate::games::tictactoe::{BoardState, Cell, GameStatus, Role, Symbol, WinLine};
use crate::presentation::PresentationAdapter;
use crate::session::GameSession;
use crate::sync::{MoveResult, SyncClient, SyncSnapshot, reconcile};
use crate::turn::TurnController;
use tracing::{debug, info, instrument, warn};

/// Input consumed by [`GameStateMachine::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The human clicked a cell.
    CellClicked(Cell),
    /// The human asked for a new game.
    Restart,
    /// Periodic or manual re-fetch of the remote state.
    Refresh,
    /// The human asked the computer to move (opening move on an empty board,
    /// or a computer turn left pending by another window).
    ComputerMove,
}

/// Externally visible machine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineState {
    /// Nothing fetched yet.
    Idle,
    /// Game running.
    InProgress,
    /// Game won.
    Won {
        /// Winning role.
        winner: Role,
        /// Winning cells.
        line: WinLine,
    },
    /// Game tied.
    Tied,
    /// Restart in flight.
    Restarting,
}

/// What an operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Guard rejected the input; nothing happened.
    Ignored,
    /// Remote state matched local state.
    Unchanged,
    /// The clicked cell was claimed elsewhere; foreign moves were applied instead.
    Stale {
        /// Moves observed from other windows.
        foreign: Vec<(Cell, Symbol)>,
    },
    /// Foreign moves were applied without any request of our own.
    Merged {
        /// Moves observed from other windows.
        foreign: Vec<(Cell, Symbol)>,
    },
    /// Local state was replaced wholesale by a snapshot.
    Resynced,
    /// A turn cycle finished and the human is to move again.
    Continued,
    /// A turn cycle ended the game.
    Finished(GameStatus),
    /// The remote game was restarted.
    Restarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Restarting,
}

/// Orchestrates human input, remote requests and local state.
#[derive(Debug)]
pub struct GameStateMachine<C, P> {
    session: GameSession,
    client: C,
    presenter: P,
    board: BoardState,
    turn: TurnController,
    status: GameStatus,
    phase: Phase,
    input_enabled: bool,
}

impl<C: SyncClient, P: PresentationAdapter> GameStateMachine<C, P> {
    /// Creates an idle machine; call [`start`](Self::start) to load the remote game.
    #[instrument(skip(client, presenter))]
    pub fn new(session: GameSession, client: C, presenter: P) -> Self {
        Self {
            session,
            client,
            presenter,
            board: BoardState::new(),
            turn: TurnController::new(),
            status: GameStatus::InProgress,
            phase: Phase::Idle,
            input_enabled: false,
        }
    }

    /// Symbol bindings for this game.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Local board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Role to move.
    pub fn current_turn(&self) -> Role {
        self.turn.current()
    }

    /// Last status reported by the service.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// True while human clicks are accepted.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// The presentation adapter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable access to the presentation adapter.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// The service client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Current machine state.
    pub fn state(&self) -> MachineState {
        match self.phase {
            Phase::Idle => MachineState::Idle,
            Phase::Restarting => MachineState::Restarting,
            Phase::Running => match &self.status {
                GameStatus::InProgress => MachineState::InProgress,
                GameStatus::Tied => MachineState::Tied,
                GameStatus::Won { winner, line } => MachineState::Won {
                    winner: self.session.role_of(*winner),
                    line: *line,
                },
            },
        }
    }

    /// Dispatches one input event.
    pub async fn handle_event(&mut self, event: InputEvent) -> Result<Transition, GameError> {
        match event {
            InputEvent::CellClicked(cell) => self.handle_human_click(cell).await,
            InputEvent::Restart => self.handle_restart().await,
            InputEvent::Refresh => self.refresh().await,
            InputEvent::ComputerMove => self.handle_computer_move().await,
        }
    }

    /// Loads the remote game: fresh, resumed mid-game, or already finished.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<Transition, GameError> {
        info!("Loading remote game");
        let snapshot = match self.client.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => return Err(self.fail(e)),
        };
        self.full_resync(&snapshot);
        Ok(Transition::Resynced)
    }

    /// Runs one turn cycle for a click on `cell`.
    #[instrument(skip(self), fields(cell = %cell))]
    pub async fn handle_human_click(&mut self, cell: Cell) -> Result<Transition, GameError> {
        if !self.accepts_human_move() || !self.input_enabled || !self.board.is_empty(cell) {
            debug!(state = ?self.state(), turn = %self.turn.current(), "Click ignored");
            return Ok(Transition::Ignored);
        }
        self.set_input(false);

        let snapshot = match self.client.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => return Err(self.fail(e)),
        };
        let rec = reconcile(&self.board, &snapshot);
        if rec.is_diverged() || rec.is_foreign(cell) || snapshot.status.is_terminal() {
            info!(foreign = rec.foreign().len(), "Click is stale; applying remote state");
            return Ok(match self.sync_with(&snapshot) {
                Transition::Resynced => Transition::Resynced,
                _ => Transition::Stale {
                    foreign: rec.foreign().to_vec(),
                },
            });
        }
        if !rec.foreign().is_empty() {
            self.sync_with(&snapshot);
            if !self.accepts_human_move() {
                return Ok(Transition::Stale {
                    foreign: rec.foreign().to_vec(),
                });
            }
            self.set_input(false);
        }

        let checkpoint = (self.board.clone(), self.turn.current());
        self.mark(cell, Role::Human);
        self.toggle_turn();

        match self.client.submit_move(cell).await {
            Ok(result) => self.complete_turn(result).await,
            Err(e) => {
                self.rollback(checkpoint);
                self.recover(e).await
            }
        }
    }

    /// Asks the computer to move without a human move.
    #[instrument(skip(self))]
    pub async fn handle_computer_move(&mut self) -> Result<Transition, GameError> {
        if !self.accepts_computer_move() {
            debug!(state = ?self.state(), "Computer move ignored");
            return Ok(Transition::Ignored);
        }
        self.set_input(false);

        let snapshot = match self.client.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => return Err(self.fail(e)),
        };
        let synced = self.sync_with(&snapshot);
        if !self.accepts_computer_move() {
            return Ok(synced);
        }
        self.set_input(false);

        let checkpoint = (self.board.clone(), self.turn.current());
        if self.turn.is_human() {
            self.toggle_turn();
        }

        match self.client.request_remote_move().await {
            Ok(result) => self.complete_turn(result).await,
            Err(e) => {
                self.rollback(checkpoint);
                self.recover(e).await
            }
        }
    }

    /// Fetches the remote state and applies moves made by other windows.
    ///
    /// Issues no move requests.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<Transition, GameError> {
        match self.phase {
            Phase::Idle => return self.start().await,
            Phase::Restarting => return Ok(Transition::Ignored),
            Phase::Running => {}
        }
        let snapshot = match self.client.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => return Err(self.fail(e)),
        };
        Ok(self.sync_with(&snapshot))
    }

    /// Starts a new game once the current one is over.
    ///
    /// If another window already started a new game, that game is adopted and
    /// no restart request is sent.
    #[instrument(skip(self))]
    pub async fn handle_restart(&mut self) -> Result<Transition, GameError> {
        if self.phase != Phase::Running || !self.status.is_terminal() {
            debug!(state = ?self.state(), "Restart ignored");
            return Ok(Transition::Ignored);
        }
        self.phase = Phase::Restarting;
        self.set_input(false);

        let snapshot = match self.client.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.phase = Phase::Running;
                return Err(self.fail(e));
            }
        };
        if !snapshot.status.is_terminal() {
            info!("Remote game already restarted elsewhere; adopting it");
            self.full_resync(&snapshot);
            return Ok(Transition::Resynced);
        }

        if let Err(e) = self.client.request_restart().await {
            self.phase = Phase::Running;
            return Err(self.fail(e));
        }

        info!("Remote game restarted");
        self.board.reset();
        self.presenter.board_cleared();
        self.status = GameStatus::InProgress;
        self.phase = Phase::Running;
        self.set_turn(Role::Human);
        self.set_input(true);
        Ok(Transition::Restarted)
    }

    fn accepts_human_move(&self) -> bool {
        self.phase == Phase::Running && !self.status.is_terminal() && self.turn.is_human()
    }

    fn accepts_computer_move(&self) -> bool {
        self.phase == Phase::Running
            && !self.status.is_terminal()
            && (!self.turn.is_human() || self.board.is_blank())
    }

    /// Applies the service's reply to a submitted move.
    async fn complete_turn(&mut self, result: MoveResult) -> Result<Transition, GameError> {
        if let Some(reply) = result.response {
            if !self.mark(reply, Role::Remote) {
                warn!(cell = %reply, "Reply targets an occupied cell; not applied");
            }
            self.toggle_turn();
        }

        if result.status.is_terminal() {
            self.enter_terminal(result.status.clone());
            return Ok(Transition::Finished(result.status));
        }
        if result.response.is_none() {
            warn!("Computer did not move in a running game; resyncing");
            return self.resync().await;
        }
        self.status = GameStatus::InProgress;
        self.set_input(true);
        Ok(Transition::Continued)
    }

    /// Reports a failed move request. A rejected move means our view is out of
    /// date, so the remote state is re-fetched before input comes back.
    async fn recover(&mut self, error: GameError) -> Result<Transition, GameError> {
        warn!(error = %error, "Move request failed");
        if error.is_illegal_move() {
            match self.client.fetch_snapshot().await {
                Ok(snapshot) => self.full_resync(&snapshot),
                Err(fetch_error) => self.presenter.error(&fetch_error),
            }
        }
        Err(self.fail(error))
    }

    /// Re-fetches and replaces local state.
    async fn resync(&mut self) -> Result<Transition, GameError> {
        match self.client.fetch_snapshot().await {
            Ok(snapshot) => {
                self.full_resync(&snapshot);
                Ok(Transition::Resynced)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Surfaces `error` and restores input to what the current state allows.
    fn fail(&mut self, error: GameError) -> GameError {
        let enabled = self.accepts_human_move();
        self.set_input(enabled);
        self.presenter.error(&error);
        error
    }

    /// Merges a snapshot into local state.
    fn sync_with(&mut self, snapshot: &SyncSnapshot) -> Transition {
        let rec = reconcile(&self.board, snapshot);
        if rec.is_diverged() || (self.status.is_terminal() && !snapshot.status.is_terminal()) {
            info!(conflicts = rec.conflicts().len(), "Remote game replaced; resyncing");
            self.full_resync(snapshot);
            return Transition::Resynced;
        }
        if rec.is_clean() && snapshot.status == self.status {
            let enabled = self.accepts_human_move();
            self.set_input(enabled);
            return Transition::Unchanged;
        }

        for (cell, symbol) in rec.foreign() {
            info!(cell = %cell, symbol = %symbol, "Applying foreign move");
            let role = self.session.role_of(*symbol);
            self.mark(*cell, role);
        }
        self.settle(snapshot);
        Transition::Merged {
            foreign: rec.foreign().to_vec(),
        }
    }

    /// Replaces local state with `snapshot`.
    fn full_resync(&mut self, snapshot: &SyncSnapshot) {
        debug!(status = ?snapshot.status, "Full resync");
        self.board.reset();
        self.presenter.board_cleared();
        for (cell, symbol) in snapshot.board.occupied() {
            let role = self.session.role_of(symbol);
            self.mark(cell, role);
        }
        self.status = GameStatus::InProgress;
        self.phase = Phase::Running;
        self.settle(snapshot);
    }

    /// Adopts the snapshot's status and turn once its cells are applied.
    fn settle(&mut self, snapshot: &SyncSnapshot) {
        if snapshot.status.is_terminal() {
            if self.status != snapshot.status {
                self.enter_terminal(snapshot.status.clone());
            }
            return;
        }
        self.status = GameStatus::InProgress;
        let role = self.session.role_of(snapshot.implied_turn(&self.session));
        self.set_turn(role);
        self.set_input(role == Role::Human);
    }

    fn enter_terminal(&mut self, status: GameStatus) {
        info!(status = ?status, "Game over");
        self.set_input(false);
        if let Some(line) = status.win_line() {
            for (step, cell) in line.cells().iter().enumerate() {
                self.presenter.highlight(*cell, step);
            }
        }
        if let Some(outcome) = status.outcome(&self.session) {
            self.presenter.game_over(outcome);
        }
        self.status = status;
    }

    fn rollback(&mut self, (board, turn): (BoardState, Role)) {
        debug!("Rolling back optimistic move");
        self.board = board;
        self.presenter.board_cleared();
        for (cell, symbol) in self.board.occupied() {
            self.presenter.cell_marked(cell, symbol);
        }
        self.set_turn(turn);
    }

    fn mark(&mut self, cell: Cell, role: Role) -> bool {
        let symbol = self.session.symbol_of(role);
        let placed = self.board.mark(cell, symbol);
        if placed {
            self.presenter.cell_marked(cell, symbol);
        }
        placed
    }

    fn toggle_turn(&mut self) {
        let role = self.turn.toggle();
        self.presenter.turn_changed(role);
    }

    fn set_turn(&mut self, role: Role) {
        self.turn.set_current(role);
        self.presenter.turn_changed(role);
    }

    fn set_input(&mut self, enabled: bool) {
        if self.input_enabled != enabled {
            self.input_enabled = enabled;
            self.presenter.input_enabled(enabled);
        }
    }
}
