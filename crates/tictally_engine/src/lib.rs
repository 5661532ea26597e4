//! Tictally engine - pure tic-tac-toe game logic.
//!
//! The engine owns every rule of the game and none of its presentation.
//!
//! # Architecture
//!
//! - **Types**: board, squares and players
//! - **Rules**: win/tie evaluation over the eight fixed lines
//! - **Computer**: the win/block/center/random move cascade
//! - **Session**: the single authoritative state object a front end drives
//!
//! # Example
//!
//! ```
//! use tictally_engine::{GameOutcome, MoveReport, Player, Session};
//!
//! # fn main() -> Result<(), tictally_engine::SessionError> {
//! let mut session = Session::new();
//! let report = session.apply_move(4)?;
//! assert!(matches!(report, MoveReport::Placed { player: Player::X, .. }));
//! assert_eq!(session.turn(), Player::O);
//! assert_eq!(session.outcome(), GameOutcome::InProgress);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod computer;
mod position;
mod rules;
mod score;
mod session;
mod types;

// Crate-level exports - Domain types
pub use types::{Board, Mode, Player, Square};

// Crate-level exports - Positions and lines
pub use position::Position;
pub use rules::{GameOutcome, LINES, Line, check_winner, evaluate, is_full};

// Crate-level exports - Moves
pub use action::{MoveReport, Rejection, SessionError};

// Crate-level exports - Computer opponent
pub use computer::{Tier, completing_cell, select_move};

// Crate-level exports - Score
pub use score::ScoreTally;

// Crate-level exports - Session
pub use session::{ReplyResult, ReplyTicket, Session};
