//! Synchronization with the remote opponent service.
//!
//! The service owns the authoritative game. [`SyncClient`] is the seam the
//! state machine talks through:
//! - `fetch_snapshot()` reads `GET /state`
//! - `submit_move()` sends the human move to `PUT /action/respond`
//! - `request_remote_move()` asks the computer to move without a human move
//! - `request_restart()` clears the remote game via `PUT /action/restart`
//!
//! [`HttpSyncClient`] speaks HTTP; [`MockService`] keeps a shared in-memory
//! game for tests.

mod http;
mod mock;
mod reconcile;
pub mod wire;

pub use http::HttpSyncClient;
pub use mock::MockService;
pub use reconcile::{Reconciliation, reconcile};

use crate::error::GameError;
use crate::games::tictactoe::{BoardState, Cell, GameStatus, Symbol};
use crate::session::GameSession;
use async_trait::async_trait;
use derive_new::new;

/// Board and status as last fetched from the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncSnapshot {
    /// Authoritative board.
    pub board: BoardState,
    /// Authoritative status.
    pub status: GameStatus,
    /// Symbol to move, when the service reports it explicitly.
    pub turn: Option<Symbol>,
}

impl SyncSnapshot {
    /// Symbol expected to move next: the explicit turn field if present,
    /// otherwise inferred from mark parity.
    pub fn implied_turn(&self, session: &GameSession) -> Symbol {
        self.turn
            .unwrap_or_else(|| session.symbol_of(session.infer_turn(&self.board)))
    }
}

/// Service reply to a move submission.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MoveResult {
    /// Cell the computer chose, if it had a move to make.
    pub response: Option<Cell>,
    /// Status after both moves.
    pub status: GameStatus,
}

/// Acknowledgement of a restart.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Ack {
    /// Status string reported by the service.
    pub status: String,
}

/// Request/response contract with the opponent service.
#[async_trait]
pub trait SyncClient: Send + Sync {
    /// Reads the authoritative board and status.
    async fn fetch_snapshot(&self) -> Result<SyncSnapshot, GameError>;

    /// Submits the human move at `cell` and returns the computer's reply.
    ///
    /// Fails with an illegal-move error when the cell is taken or the game is
    /// already over.
    async fn submit_move(&self, cell: Cell) -> Result<MoveResult, GameError>;

    /// Asks the computer to move without a preceding human move.
    async fn request_remote_move(&self) -> Result<MoveResult, GameError>;

    /// Clears the remote game.
    async fn request_restart(&self) -> Result<Ack, GameError>;
}
