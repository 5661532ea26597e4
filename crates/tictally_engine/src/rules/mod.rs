//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Nothing here mutates state, so the
//! outcome can be recomputed on every query instead of being stored.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{LINES, Line, check_winner};

use super::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of a board, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// No line is complete and at least one square is empty.
    InProgress,
    /// A player completed a line.
    Win {
        /// The player holding the line.
        winner: Player,
        /// The first complete line in scan order.
        line: Line,
    },
    /// All squares filled with no complete line.
    Tie,
}

impl GameOutcome {
    /// Returns true while moves are still accepted.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, GameOutcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Win { winner, .. } => Some(*winner),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn line(&self) -> Option<Line> {
        match self {
            GameOutcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Evaluates a board.
///
/// Total over every configuration of nine squares, legal or not. When more
/// than one line is complete the first one in [`LINES`] order is reported.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameOutcome {
    if let Some((winner, line)) = check_winner(board) {
        GameOutcome::Win { winner, line }
    } else if is_full(board) {
        GameOutcome::Tie
    } else {
        GameOutcome::InProgress
    }
}
