//! Naive computer opponent.
//!
//! The opponent runs a fixed cascade: finish its own line, block the other
//! player's line, take the center, otherwise pick any empty square at random.

use super::rules::LINES;
use super::{Board, Player, Position, Square};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which step of the cascade produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Tier {
    /// Completes the computer's own line.
    #[display("win")]
    Win,
    /// Stops the opponent's line.
    #[display("block")]
    Block,
    /// Takes the center square.
    #[display("center")]
    Center,
    /// Uniform pick among the empty squares.
    #[display("random")]
    Random,
}

/// Finds the empty square that would complete a line for `player`.
///
/// A line qualifies when it holds exactly two of `player`'s marks and one
/// empty square. Lines are scanned in [`LINES`] order.
#[instrument(skip(board))]
pub fn completing_cell(board: &Board, player: Player) -> Option<Position> {
    LINES.iter().find_map(|line| {
        let mine = line
            .iter()
            .filter(|&&pos| board.get(pos) == Square::Occupied(player))
            .count();
        let mut empty = line.iter().copied().filter(|&pos| board.is_empty(pos));
        match (mine, empty.next(), empty.next()) {
            (2, Some(pos), None) => Some(pos),
            _ => None,
        }
    })
}

/// Chooses the computer's next square.
///
/// Returns `None` only when the board has no empty square.
#[instrument(skip(board, rng))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    computer: Player,
    rng: &mut R,
) -> Option<(Position, Tier)> {
    let choice = if let Some(pos) = completing_cell(board, computer) {
        Some((pos, Tier::Win))
    } else if let Some(pos) = completing_cell(board, computer.opponent()) {
        Some((pos, Tier::Block))
    } else if board.is_empty(Position::Center) {
        Some((Position::Center, Tier::Center))
    } else {
        board
            .empty_positions()
            .choose(rng)
            .map(|&pos| (pos, Tier::Random))
    };

    if let Some((pos, tier)) = choice {
        debug!(position = %pos, %tier, "Computer chose square");
    }
    choice
}
