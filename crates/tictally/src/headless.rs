//! Scripted, non-interactive games.
//!
//! The computer answers immediately instead of waiting out the reply delay,
//! so a script runs to completion in one pass.

use crate::config::Settings;
use anyhow::{Context, Result};
use serde::Serialize;
use tictally_engine::{
    Board, GameOutcome, Mode, MoveReport, Player, Position, ScoreTally, Session, Square,
};
use tracing::{debug, info, instrument, warn};

/// Final state of a scripted game.
#[derive(Debug, Clone, Serialize)]
pub struct PlayReport {
    /// Opponent mode.
    pub mode: Mode,
    /// Squares in row-major order, `null` when empty.
    pub board: Vec<Option<Player>>,
    /// Player to move (or the final mover if the round is over).
    pub turn: Player,
    /// Board outcome.
    pub outcome: GameOutcome,
    /// Status line as the TUI would show it.
    pub status: String,
    /// Running score.
    pub score: ScoreTally,
    /// Moves that were ignored, with the reason.
    pub rejected: Vec<String>,
}

impl PlayReport {
    fn from_session(session: &Session, rejected: Vec<String>) -> Self {
        Self {
            mode: session.mode(),
            board: session.board().squares().iter().map(|s| s.player()).collect(),
            turn: session.turn(),
            outcome: session.outcome(),
            status: session.status(),
            score: session.score(),
            rejected,
        }
    }

    /// Rebuilds the final board from the reported squares.
    pub fn grid(&self) -> Board {
        Board::from_squares(std::array::from_fn(|i| {
            self.board
                .get(i)
                .copied()
                .flatten()
                .map_or(Square::Empty, Square::Occupied)
        }))
    }
}

/// Resolves a cell given as an index or a position label.
///
/// Indices are passed through unchecked so the session can reject
/// out-of-range values itself.
fn parse_cell(raw: &str) -> Result<usize> {
    let raw = raw.trim();
    if let Ok(index) = raw.parse::<usize>() {
        return Ok(index);
    }
    Position::from_label_or_number(raw)
        .map(Position::to_index)
        .with_context(|| format!("Unknown cell: {:?}", raw))
}

/// Plays `moves` on a session built from `settings`.
///
/// # Errors
///
/// Fails on an unknown label or a cell index outside 0-8.
#[instrument(skip(settings))]
pub fn play(settings: &Settings, moves: &[String]) -> Result<PlayReport> {
    let mut session = settings.session();
    let mut rejected = Vec::new();

    computer_reply(&mut session);
    for raw in moves {
        let index = parse_cell(raw)?;
        match session.apply_move(index)? {
            MoveReport::Rejected(reason) => {
                warn!(cell = index, %reason, "Move ignored");
                rejected.push(format!("{}: {}", raw, reason));
            }
            MoveReport::Placed { .. } => computer_reply(&mut session),
        }
    }

    info!(status = %session.status(), "Script finished");
    Ok(PlayReport::from_session(&session, rejected))
}

fn computer_reply(session: &mut Session) {
    if let Some(report) = session.play_computer_now() {
        debug!(?report, "Computer replied");
    }
}

/// Renders a report as plain text.
pub fn render_text(report: &PlayReport) -> String {
    let mut out = report.grid().display();
    out.push_str("\n\n");
    out.push_str(&report.status);
    out.push('\n');
    out.push_str(&format!(
        "Score  X: {}  Ties: {}  O: {}\n",
        report.score.wins_for(Player::X),
        report.score.ties(),
        report.score.wins_for(Player::O)
    ));
    for note in &report.rejected {
        out.push_str(&format!("ignored {}\n", note));
    }
    out
}
