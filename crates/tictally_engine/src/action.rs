//! Move results and errors.
//!
//! A rejected move is an ordinary result, not an error: clicking an occupied
//! square or playing after the round ended simply does nothing. Only a cell
//! index outside the board is treated as a caller bug.

use super::rules::GameOutcome;
use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// Why a move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Rejection {
    /// The square is already taken.
    #[display("Square {} is already occupied", _0)]
    Occupied(Position),

    /// The round has a winner or is tied.
    #[display("The round is over")]
    RoundOver,

    /// The computer owns the current turn.
    #[display("Waiting for the computer to play {}", _0)]
    ComputerTurn(Player),
}

/// What happened when a move was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveReport {
    /// The mark was placed.
    Placed {
        /// Where the mark went.
        position: Position,
        /// Whose mark it was.
        player: Player,
        /// Board outcome right after the move.
        outcome: GameOutcome,
    },
    /// Nothing changed.
    Rejected(Rejection),
}

impl MoveReport {
    /// Returns true if the move changed the board.
    pub fn is_placed(&self) -> bool {
        matches!(self, MoveReport::Placed { .. })
    }

    /// Returns true if this move ended the round.
    pub fn concluded(&self) -> bool {
        matches!(self, MoveReport::Placed { outcome, .. } if !outcome.is_in_progress())
    }
}

/// Error raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The cell index is outside 0-8.
    #[display("Cell index {} is out of range (must be 0-8)", _0)]
    InvalidCell(usize),
}

impl std::error::Error for SessionError {}
