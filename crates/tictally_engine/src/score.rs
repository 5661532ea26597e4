//! Running score across rounds.

use super::Player;
use super::rules::GameOutcome;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Wins per player and ties for the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct ScoreTally {
    /// Rounds won by X.
    x_wins: u32,
    /// Rounds won by O.
    o_wins: u32,
    /// Tied rounds.
    ties: u32,
}

impl ScoreTally {
    /// Creates an all-zero tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins for the given player.
    pub fn wins_for(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Rounds counted so far.
    pub fn rounds(&self) -> u32 {
        self.x_wins + self.o_wins + self.ties
    }

    /// Counts a concluded round. An in-progress outcome is ignored.
    #[instrument(skip(self))]
    pub(crate) fn record(&mut self, outcome: &GameOutcome) {
        match outcome {
            GameOutcome::Win {
                winner: Player::X, ..
            } => self.x_wins += 1,
            GameOutcome::Win {
                winner: Player::O, ..
            } => self.o_wins += 1,
            GameOutcome::Tie => self.ties += 1,
            GameOutcome::InProgress => return,
        }
        debug!(x = self.x_wins, o = self.o_wins, ties = self.ties, "Score updated");
    }
}
