//! Strictly Remote - tic-tac-toe client for a stateful opponent service
//!
//! The service owns the game; this crate keeps a local view of it consistent
//! across several windows open on the same game, and mediates strictly
//! alternating turns between the human and the computer.
//!
//! # Architecture
//!
//! - **Board / Turn**: local view of the board and whose turn it is
//! - **Sync**: snapshot fetches, move submission, and reconciliation of
//!   moves made in other windows
//! - **Machine**: the turn-cycle state machine driving everything
//! - **Presentation**: notification seam towards a front end (terminal UI)
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use strictly_remote::{GameSession, GameStateMachine, HttpSyncClient, TracingPresenter};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HttpSyncClient::new("http://127.0.0.1:5000", Duration::from_secs(5))?;
//! let mut machine = GameStateMachine::new(GameSession::default(), client, TracingPresenter);
//! machine.start().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod games;
mod machine;
mod presentation;
mod session;
mod turn;

pub mod sync;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ClientConfig, SERVER_URL_ENV};

// Crate-level exports - Errors
pub use error::{ConfigError, GameError, GameErrorKind};

// Crate-level exports - Game types
pub use games::tictactoe::{
    BOARD_SIZE, BoardState, Cell, GameStatus, Outcome, Role, Square, Symbol, WinLine,
};

// Crate-level exports - State machine
pub use machine::{GameStateMachine, InputEvent, MachineState, Transition};
pub use presentation::{
    PresentationAdapter, PresentationEvent, RecordingPresenter, TracingPresenter,
};
pub use session::GameSession;
pub use turn::TurnController;

// Crate-level exports - Sync
pub use sync::{
    Ack, HttpSyncClient, MockService, MoveResult, Reconciliation, SyncClient, SyncSnapshot,
    reconcile,
};
