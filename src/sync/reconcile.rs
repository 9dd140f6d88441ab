//! Diffing fetched snapshots against the local board.

use super::SyncSnapshot;
use crate::games::tictactoe::{BoardState, Cell, Square, Symbol};
use tracing::{debug, instrument};

/// Result of comparing a snapshot with the local board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    foreign: Vec<(Cell, Symbol)>,
    conflicts: Vec<Cell>,
}

impl Reconciliation {
    /// Cells occupied remotely that are still empty locally: moves made by
    /// another observer of the same game.
    pub fn foreign(&self) -> &[(Cell, Symbol)] {
        &self.foreign
    }

    /// Cells occupied locally that the snapshot shows empty or held by the
    /// other symbol. Any conflict means the game was restarted or replaced
    /// elsewhere and cannot be merged.
    pub fn conflicts(&self) -> &[Cell] {
        &self.conflicts
    }

    /// True when `cell` was claimed by another observer.
    pub fn is_foreign(&self, cell: Cell) -> bool {
        self.foreign.iter().any(|(c, _)| *c == cell)
    }

    /// True when there are no foreign updates and no conflicts.
    pub fn is_clean(&self) -> bool {
        self.foreign.is_empty() && self.conflicts.is_empty()
    }

    /// True when the local board cannot be merged with the snapshot.
    pub fn is_diverged(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Compares `local` with `snapshot` cell by cell.
#[instrument(skip_all)]
pub fn reconcile(local: &BoardState, snapshot: &SyncSnapshot) -> Reconciliation {
    let mut result = Reconciliation::default();
    for cell in Cell::ALL {
        match (local.get(cell), snapshot.board.get(cell)) {
            (Square::Empty, Square::Occupied(symbol)) => result.foreign.push((cell, symbol)),
            (Square::Occupied(mine), theirs) if theirs != Square::Occupied(mine) => {
                result.conflicts.push(cell)
            }
            _ => {}
        }
    }
    debug!(
        foreign = result.foreign.len(),
        conflicts = result.conflicts.len(),
        "Reconciled snapshot"
    );
    result
}
