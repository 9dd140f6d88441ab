//! In-memory opponent service.
//!
//! Clones share one game, so two state machines holding clones behave like
//! two windows open on the same remote game.

use super::{Ack, MoveResult, SyncClient, SyncSnapshot};
use crate::error::GameError;
use crate::games::tictactoe::{BoardState, Cell, GameStatus, Symbol};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

/// Scriptable in-memory service.
///
/// Computer replies are taken from a queue of scripted responses; with an
/// empty queue the computer takes the first free cell.
#[derive(Debug, Clone)]
pub struct MockService {
    inner: Arc<Mutex<MockServiceInner>>,
}

#[derive(Debug)]
struct MockServiceInner {
    human: Symbol,
    board: BoardState,
    status: GameStatus,
    turn: Option<Symbol>,
    scripted: VecDeque<MoveResult>,
    fail_next: Option<GameError>,
    fail_next_move: Option<GameError>,
    fetches: usize,
    submitted: Vec<Option<Cell>>,
    restarts: usize,
}

impl MockService {
    /// Creates an empty game where the human plays `human`.
    pub fn new(human: Symbol) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockServiceInner {
                human,
                board: BoardState::new(),
                status: GameStatus::InProgress,
                turn: None,
                scripted: VecDeque::new(),
                fail_next: None,
                fail_next_move: None,
                fetches: 0,
                submitted: Vec::new(),
                restarts: 0,
            })),
        }
    }

    /// Queues the computer's next reply.
    pub fn script_response(&self, response: Option<Cell>, status: GameStatus) {
        let mut inner = self.inner.lock().unwrap();
        inner.scripted.push_back(MoveResult::new(response, status));
    }

    /// Makes the next call of any kind fail with `error`.
    pub fn fail_next(&self, error: GameError) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next = Some(error);
    }

    /// Makes the next move submission or computer-move request fail with
    /// `error`; snapshot fetches are unaffected.
    pub fn fail_next_move(&self, error: GameError) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_move = Some(error);
    }

    /// Places a mark directly, as another client would.
    pub fn place(&self, cell: Cell, symbol: Symbol) {
        let mut inner = self.inner.lock().unwrap();
        inner.board.mark(cell, symbol);
    }

    /// Overrides the remote status.
    pub fn set_status(&self, status: GameStatus) {
        let mut inner = self.inner.lock().unwrap();
        inner.status = status;
    }

    /// Sets the explicit turn field reported with each snapshot; `None`
    /// leaves the turn to mark parity.
    pub fn set_turn(&self, turn: Option<Symbol>) {
        let mut inner = self.inner.lock().unwrap();
        inner.turn = turn;
    }

    /// Current remote state.
    pub fn snapshot(&self) -> SyncSnapshot {
        let inner = self.inner.lock().unwrap();
        SyncSnapshot {
            board: inner.board.clone(),
            status: inner.status.clone(),
            turn: inner.turn,
        }
    }

    /// Number of snapshot fetches served.
    pub fn fetches(&self) -> usize {
        self.inner.lock().unwrap().fetches
    }

    /// Moves submitted so far; `None` marks a request for a computer move.
    pub fn submitted(&self) -> Vec<Option<Cell>> {
        self.inner.lock().unwrap().submitted.clone()
    }

    /// Number of restarts performed.
    pub fn restarts(&self) -> usize {
        self.inner.lock().unwrap().restarts
    }

    fn take_failure(inner: &mut MockServiceInner) -> Result<(), GameError> {
        match inner.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn take_move_failure(inner: &mut MockServiceInner) -> Result<(), GameError> {
        Self::take_failure(inner)?;
        match inner.fail_next_move.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn respond(inner: &mut MockServiceInner) -> MoveResult {
        let remote = inner.human.opposite();
        let result = inner.scripted.pop_front().unwrap_or_else(|| {
            let free = Cell::ALL.into_iter().find(|c| inner.board.is_empty(*c));
            let mut board = inner.board.clone();
            if let Some(cell) = free {
                board.mark(cell, remote);
            }
            let status = if Cell::ALL.into_iter().all(|c| !board.is_empty(c)) {
                GameStatus::Tied
            } else {
                GameStatus::InProgress
            };
            MoveResult::new(free, status)
        });
        if let Some(cell) = result.response {
            inner.board.mark(cell, remote);
        }
        inner.status = result.status.clone();
        inner.turn = None;
        debug!(response = ?result.response, status = ?result.status, "Mock computer moved");
        result
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new(Symbol::Ex)
    }
}

#[async_trait]
impl SyncClient for MockService {
    #[instrument(skip(self))]
    async fn fetch_snapshot(&self) -> Result<SyncSnapshot, GameError> {
        let mut inner = self.inner.lock().unwrap();
        Self::take_failure(&mut inner)?;
        inner.fetches += 1;
        Ok(SyncSnapshot {
            board: inner.board.clone(),
            status: inner.status.clone(),
            turn: inner.turn,
        })
    }

    #[instrument(skip(self), fields(cell = %cell))]
    async fn submit_move(&self, cell: Cell) -> Result<MoveResult, GameError> {
        let mut inner = self.inner.lock().unwrap();
        Self::take_move_failure(&mut inner)?;
        if inner.status.is_terminal() {
            return Err(GameError::illegal_move("Game is already over"));
        }
        if !inner.board.is_empty(cell) {
            return Err(GameError::illegal_move(format!("Cell {} is occupied", cell)));
        }
        let human = inner.human;
        inner.board.mark(cell, human);
        inner.submitted.push(Some(cell));
        Ok(Self::respond(&mut inner))
    }

    #[instrument(skip(self))]
    async fn request_remote_move(&self) -> Result<MoveResult, GameError> {
        let mut inner = self.inner.lock().unwrap();
        Self::take_move_failure(&mut inner)?;
        if inner.status.is_terminal() {
            return Err(GameError::illegal_move("Game is already over"));
        }
        inner.submitted.push(None);
        Ok(Self::respond(&mut inner))
    }

    #[instrument(skip(self))]
    async fn request_restart(&self) -> Result<Ack, GameError> {
        let mut inner = self.inner.lock().unwrap();
        Self::take_failure(&mut inner)?;
        inner.board.reset();
        inner.status = GameStatus::InProgress;
        inner.turn = None;
        inner.scripted.clear();
        inner.restarts += 1;
        Ok(Ack::new("OK".to_string()))
    }
}
