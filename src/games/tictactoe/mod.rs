mod board;
mod cell;
mod status;
mod types;

pub use board::BoardState;
pub use cell::{BOARD_SIZE, Cell};
pub use status::{GameStatus, Outcome, WinLine};
pub use types::{Role, Square, Symbol};
