//! The authoritative game session.
//!
//! A [`Session`] owns everything that changes while people play: the board,
//! whose turn it is, the running score and the opponent mode. Front ends read
//! it through query methods and change it only through the operations below.
//!
//! The outcome is never stored. [`Session::outcome`] evaluates the board on
//! every call, so it cannot drift out of sync with the squares.
//!
//! # Deferred computer replies
//!
//! Every accepted mutation bumps a generation counter. When the computer owes
//! a move, [`Session::pending_reply`] hands out a [`ReplyTicket`] stamped with
//! the current generation. The front end may hold the ticket for a while (the
//! TUI waits half a second) and then redeem it with
//! [`Session::play_computer_reply`]. If anything happened in between, such as
//! a new game or a mode switch, the generations no longer match and the
//! ticket is discarded.

use super::action::{MoveReport, Rejection, SessionError};
use super::computer::select_move;
use super::rules::{GameOutcome, Line, evaluate};
use super::score::ScoreTally;
use super::{Board, Mode, Player, Position, Square};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Claim on the computer's next move, valid for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyTicket {
    generation: u64,
    player: Player,
}

impl ReplyTicket {
    /// Session generation the ticket was issued at.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Symbol the computer will place.
    pub fn player(&self) -> Player {
        self.player
    }
}

/// Result of redeeming a [`ReplyTicket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyResult {
    /// The computer moved.
    Played(MoveReport),
    /// The session moved on since the ticket was issued; nothing changed.
    Stale,
}

/// Single source of truth for one player-facing game session.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    turn: Player,
    score: ScoreTally,
    mode: Mode,
    computer: Player,
    generation: u64,
    rng: StdRng,
}

impl Session {
    /// Creates a multiplayer session with an entropy-seeded opponent.
    #[instrument]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a session whose random opponent moves are reproducible.
    #[instrument]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            board: Board::new(),
            turn: Player::X,
            score: ScoreTally::new(),
            mode: Mode::default(),
            computer: Player::O,
            generation: 0,
            rng,
        }
    }

    /// Sets the starting mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets which symbol the computer plays.
    pub fn with_computer(mut self, computer: Player) -> Self {
        self.computer = computer;
        self
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    ///
    /// After a round concludes this stays on the player who made the final
    /// move until the next reset.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Evaluates the board.
    pub fn outcome(&self) -> GameOutcome {
        evaluate(&self.board)
    }

    /// Returns the running score.
    pub fn score(&self) -> ScoreTally {
        self.score
    }

    /// Returns the opponent mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the symbol the computer plays in [`Mode::VsComputer`].
    pub fn computer_symbol(&self) -> Player {
        self.computer
    }

    /// Returns the mutation counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Squares to highlight, if the round was won.
    pub fn winning_line(&self) -> Option<Line> {
        self.outcome().line()
    }

    /// True when it is the computer's turn in an unfinished vs-computer round.
    pub fn is_computer_turn(&self) -> bool {
        self.mode == Mode::VsComputer
            && self.turn == self.computer
            && self.outcome().is_in_progress()
    }

    /// One-line summary for the status bar.
    pub fn status(&self) -> String {
        match self.outcome() {
            GameOutcome::InProgress => format!("Next player: {}", self.turn),
            GameOutcome::Win { winner, .. } => format!("Player {} wins!", winner),
            GameOutcome::Tie => "Game ended in a tie!".to_string(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Places the current player's mark at `index` (0-8, row-major).
    ///
    /// Occupied squares, concluded rounds and the computer's turn are
    /// reported as [`MoveReport::Rejected`] and leave the session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCell`] if `index` is 9 or more.
    #[instrument(skip(self), fields(turn = %self.turn, generation = self.generation))]
    pub fn apply_move(&mut self, index: usize) -> Result<MoveReport, SessionError> {
        let pos = Position::from_index(index).ok_or(SessionError::InvalidCell(index))?;

        if !self.outcome().is_in_progress() {
            debug!(position = %pos, "Move after round end ignored");
            return Ok(MoveReport::Rejected(Rejection::RoundOver));
        }

        if !self.board.is_empty(pos) {
            debug!(position = %pos, "Move on occupied square ignored");
            return Ok(MoveReport::Rejected(Rejection::Occupied(pos)));
        }

        if self.is_computer_turn() {
            debug!(position = %pos, "Move during computer turn ignored");
            return Ok(MoveReport::Rejected(Rejection::ComputerTurn(self.computer)));
        }

        Ok(self.place(pos))
    }

    /// Issues a ticket if the computer owes a move right now.
    pub fn pending_reply(&self) -> Option<ReplyTicket> {
        self.is_computer_turn().then_some(ReplyTicket {
            generation: self.generation,
            player: self.computer,
        })
    }

    /// Plays the computer's move if `ticket` is still current.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn play_computer_reply(&mut self, ticket: ReplyTicket) -> ReplyResult {
        if self.pending_reply() != Some(ticket) {
            debug!(?ticket, "Discarding stale computer reply");
            return ReplyResult::Stale;
        }

        match select_move(&self.board, self.computer, &mut self.rng) {
            Some((pos, _tier)) => ReplyResult::Played(self.place(pos)),
            None => {
                // pending_reply only issues tickets for unfinished rounds,
                // so a full board here means the session invariants broke.
                debug!(?ticket, "No empty square for computer reply");
                ReplyResult::Stale
            }
        }
    }

    /// Plays any owed computer move immediately, skipping the delay.
    pub fn play_computer_now(&mut self) -> Option<MoveReport> {
        let ticket = self.pending_reply()?;
        match self.play_computer_reply(ticket) {
            ReplyResult::Played(report) => Some(report),
            ReplyResult::Stale => None,
        }
    }

    fn place(&mut self, pos: Position) -> MoveReport {
        let player = self.turn;
        self.board.set(pos, Square::Occupied(player));
        self.generation += 1;

        let outcome = self.outcome();
        if outcome.is_in_progress() {
            self.turn = player.opponent();
        } else {
            self.score.record(&outcome);
            info!(?outcome, "Round concluded");
        }

        debug!(position = %pos, %player, "Mark placed");
        MoveReport::Placed {
            position: pos,
            player,
            outcome,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Resets
    // ─────────────────────────────────────────────────────────────

    /// Clears the board for a new round. The score is kept.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.turn = Player::X;
        self.generation += 1;
        info!(generation = self.generation, "New round");
    }

    /// Clears the board and the score.
    #[instrument(skip(self))]
    pub fn reset_all(&mut self) {
        self.new_game();
        self.score = ScoreTally::new();
        info!("Score reset");
    }

    /// Switches opponent mode and starts a new round. The score is kept.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.new_game();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(session: &mut Session, moves: &[usize]) {
        for &index in moves {
            let report = session.apply_move(index).unwrap();
            assert!(report.is_placed(), "move {index} rejected: {report:?}");
        }
    }

    #[test]
    fn test_turn_alternates() {
        let mut session = Session::with_seed(1);
        assert_eq!(session.turn(), Player::X);
        play(&mut session, &[4]);
        assert_eq!(session.turn(), Player::O);
        play(&mut session, &[0]);
        assert_eq!(session.turn(), Player::X);
    }

    #[test]
    fn test_out_of_range_is_error() {
        let mut session = Session::with_seed(1);
        assert_eq!(session.apply_move(9), Err(SessionError::InvalidCell(9)));
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_occupied_square_rejected() {
        let mut session = Session::with_seed(1);
        play(&mut session, &[4]);
        let board = session.board().clone();
        let report = session.apply_move(4).unwrap();
        assert_eq!(
            report,
            MoveReport::Rejected(Rejection::Occupied(Position::Center))
        );
        assert_eq!(session.board(), &board);
        assert_eq!(session.turn(), Player::O);
    }

    #[test]
    fn test_winning_move_keeps_turn_and_scores_once() {
        let mut session = Session::with_seed(1);
        // X: 0 1 2, O: 3 4
        play(&mut session, &[0, 3, 1, 4, 2]);
        assert_eq!(session.outcome().winner(), Some(Player::X));
        assert_eq!(session.turn(), Player::X);
        assert_eq!(*session.score().x_wins(), 1);
        assert_eq!(session.status(), "Player X wins!");

        let report = session.apply_move(8).unwrap();
        assert_eq!(report, MoveReport::Rejected(Rejection::RoundOver));
        assert_eq!(*session.score().x_wins(), 1);
    }

    #[test]
    fn test_computer_turn_blocks_human_input() {
        let mut session = Session::with_seed(1).with_mode(Mode::VsComputer);
        play(&mut session, &[4]);
        let report = session.apply_move(0).unwrap();
        assert_eq!(
            report,
            MoveReport::Rejected(Rejection::ComputerTurn(Player::O))
        );
        assert!(session.pending_reply().is_some());
    }

    #[test]
    fn test_multiplayer_never_issues_tickets() {
        let mut session = Session::with_seed(1);
        play(&mut session, &[4]);
        assert_eq!(session.pending_reply(), None);
    }

    #[test]
    fn test_stale_ticket_after_new_game() {
        let mut session = Session::with_seed(1).with_mode(Mode::VsComputer);
        play(&mut session, &[4]);
        let ticket = session.pending_reply().unwrap();
        session.new_game();
        assert_eq!(session.play_computer_reply(ticket), ReplyResult::Stale);
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.turn(), Player::X);
    }

    #[test]
    fn test_ticket_is_single_use() {
        let mut session = Session::with_seed(1).with_mode(Mode::VsComputer);
        play(&mut session, &[4]);
        let ticket = session.pending_reply().unwrap();
        assert!(matches!(
            session.play_computer_reply(ticket),
            ReplyResult::Played(_)
        ));
        assert_eq!(session.play_computer_reply(ticket), ReplyResult::Stale);
        assert_eq!(session.board().filled(), 2);
    }

    #[test]
    fn test_computer_playing_x_opens() {
        let mut session = Session::with_seed(3)
            .with_mode(Mode::VsComputer)
            .with_computer(Player::X);
        assert!(session.is_computer_turn());
        let report = session.play_computer_now().unwrap();
        assert_eq!(
            report,
            MoveReport::Placed {
                position: Position::Center,
                player: Player::X,
                outcome: GameOutcome::InProgress,
            }
        );
        assert_eq!(session.turn(), Player::O);
    }
}
