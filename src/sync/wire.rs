//! JSON payloads exchanged with the opponent service.

use super::{Ack, MoveResult, SyncSnapshot};
use crate::error::GameError;
use crate::games::tictactoe::{BOARD_SIZE, BoardState, Cell, GameStatus, Square, Symbol, WinLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Winner value the service uses for a drawn game.
pub const TIE: &str = "tie";

/// Responses may arrive bare or wrapped in `{"resp": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `{"resp": payload}`.
    Wrapped {
        /// Wrapped payload.
        resp: T,
    },
    /// The payload itself.
    Bare(T),
}

impl<T> Envelope<T> {
    /// Unwraps the payload.
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { resp } => resp,
            Envelope::Bare(inner) => inner,
        }
    }
}

/// Body of `PUT /action/respond` for a human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row of the human's cell.
    pub row: u8,
    /// Column of the human's cell.
    pub col: u8,
}

impl From<Cell> for MoveRequest {
    fn from(cell: Cell) -> Self {
        Self {
            row: cell.row(),
            col: cell.col(),
        }
    }
}

/// Board encoding: rows of symbols, or a map keyed by cell id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireBoard {
    /// `[["ex", null, null], ...]`.
    Rows(Vec<Vec<Option<String>>>),
    /// `{"00": "ex", "01": null, ...}`.
    Cells(BTreeMap<String, Option<String>>),
}

/// `gameState` object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGameState {
    /// True once the game is won or tied.
    pub game_over: bool,
    /// Winning symbol, `"tie"`, or null.
    #[serde(default)]
    pub winner: Option<String>,
    /// Winning cells as `[row, col]` pairs.
    #[serde(default)]
    pub win_line: Option<Vec<(u8, u8)>>,
}

/// Payload of `GET /state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireState {
    /// Authoritative board.
    pub board: WireBoard,
    /// Game status.
    pub game_state: WireGameState,
    /// Symbol to move, when the service reports it.
    #[serde(default)]
    pub turn: Option<String>,
}

/// Payload of `PUT /action/respond`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMoveResponse {
    /// Row chosen by the computer.
    #[serde(default)]
    pub row: Option<u8>,
    /// Column chosen by the computer.
    #[serde(default)]
    pub col: Option<u8>,
    /// Status after the computer's move.
    pub game_state: WireGameState,
}

/// Payload of `PUT /action/restart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAck {
    /// Service status string, `"OK"` on success.
    #[serde(default)]
    pub status: Option<String>,
}

#[track_caller]
fn parse_symbol(value: &str) -> Result<Symbol, GameError> {
    Symbol::from_str(value)
        .map_err(|_| GameError::service(format!("Unknown symbol {:?}", value)))
}

#[track_caller]
fn parse_square(value: Option<&str>) -> Result<Square, GameError> {
    match value {
        None | Some("") => Ok(Square::Empty),
        Some(symbol) => parse_symbol(symbol).map(Square::Occupied),
    }
}

#[track_caller]
fn service_cell(row: u8, col: u8) -> Result<Cell, GameError> {
    Cell::new(row, col)
        .map_err(|_| GameError::service(format!("Service sent cell ({}, {}) off the board", row, col)))
}

impl WireBoard {
    /// Decodes into a local board.
    #[instrument(skip(self))]
    pub fn into_board(self) -> Result<BoardState, GameError> {
        let mut board = BoardState::new();
        match self {
            WireBoard::Rows(rows) => {
                let size = usize::from(BOARD_SIZE);
                if rows.len() != size || rows.iter().any(|r| r.len() != size) {
                    return Err(GameError::service("Board is not 3x3"));
                }
                for (row, values) in rows.iter().enumerate() {
                    for (col, value) in values.iter().enumerate() {
                        if let Square::Occupied(symbol) = parse_square(value.as_deref())? {
                            board.mark(service_cell(row as u8, col as u8)?, symbol);
                        }
                    }
                }
            }
            WireBoard::Cells(cells) => {
                for (id, value) in cells {
                    let cell = Cell::from_id(&id)
                        .map_err(|_| GameError::service(format!("Bad cell id {:?}", id)))?;
                    if let Square::Occupied(symbol) = parse_square(value.as_deref())? {
                        board.mark(cell, symbol);
                    }
                }
            }
        }
        Ok(board)
    }
}

impl WireGameState {
    /// Classifies the status; the service is the only judge of wins and ties.
    #[instrument(skip(self), fields(game_over = self.game_over, winner = ?self.winner))]
    pub fn into_status(self) -> Result<GameStatus, GameError> {
        if !self.game_over {
            return Ok(GameStatus::InProgress);
        }
        match self.winner.as_deref() {
            Some(TIE) => Ok(GameStatus::Tied),
            Some(symbol) => {
                let winner = parse_symbol(symbol)?;
                let cells = self
                    .win_line
                    .ok_or_else(|| GameError::service("Win reported without winLine"))?
                    .into_iter()
                    .map(|(row, col)| service_cell(row, col))
                    .collect::<Result<Vec<_>, _>>()?;
                let cells: [Cell; 3] = cells
                    .try_into()
                    .map_err(|_| GameError::service("winLine must have exactly 3 cells"))?;
                Ok(GameStatus::Won {
                    winner,
                    line: WinLine::new(cells),
                })
            }
            None => Err(GameError::service("Game over without a winner")),
        }
    }
}

impl WireState {
    /// Decodes into a snapshot.
    #[instrument(skip(self))]
    pub fn into_snapshot(self) -> Result<SyncSnapshot, GameError> {
        let turn = match self.turn.as_deref() {
            None | Some("") => None,
            Some(symbol) => Some(parse_symbol(symbol)?),
        };
        let snapshot = SyncSnapshot {
            board: self.board.into_board()?,
            status: self.game_state.into_status()?,
            turn,
        };
        debug!(status = ?snapshot.status, "Decoded snapshot");
        Ok(snapshot)
    }
}

impl WireMoveResponse {
    /// Decodes into a move result.
    #[instrument(skip(self), fields(row = ?self.row, col = ?self.col))]
    pub fn into_move_result(self) -> Result<MoveResult, GameError> {
        let response = match (self.row, self.col) {
            (Some(row), Some(col)) => Some(service_cell(row, col)?),
            (None, None) => None,
            _ => return Err(GameError::service("Response has only one of row/col")),
        };
        Ok(MoveResult::new(response, self.game_state.into_status()?))
    }
}

impl From<WireAck> for Ack {
    fn from(ack: WireAck) -> Self {
        Ack::new(ack.status.unwrap_or_else(|| "OK".to_string()))
    }
}
