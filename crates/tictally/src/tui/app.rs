//! Application state and logic.

use super::input::{Command, command_for, move_cursor};
use crossterm::event::KeyEvent;
use tictally_engine::{
    Mode, MoveReport, Position, ReplyResult, ReplyTicket, Session, SessionError,
};
use tracing::{debug, info, instrument, warn};

/// Whether the event loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    session: Session,
    cursor: Position,
    notice: Option<String>,
    scheduled: Option<ReplyTicket>,
}

impl App {
    /// Creates a new application around a session.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            cursor: Position::Center,
            notice: None,
            scheduled: None,
        }
    }

    /// Gets the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the status message.
    ///
    /// A notice about the last key press wins over the game status.
    pub fn status_message(&self) -> String {
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        if self.session.is_computer_turn() {
            return format!("Computer ({}) is thinking...", self.session.computer_symbol());
        }
        self.session.status()
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        let Some(command) = command_for(key) else {
            return Control::Continue;
        };
        debug!(?command, "Handling command");
        self.notice = None;

        match command {
            Command::Quit => return Control::Quit,
            Command::Cursor(code) => self.cursor = move_cursor(self.cursor, code),
            Command::PlayCursor => self.play(self.cursor),
            Command::Play(pos) => {
                self.cursor = pos;
                self.play(pos);
            }
            Command::SwitchMode(mode) => self.switch_mode(mode),
            Command::NewGame => self.session.new_game(),
            Command::ResetAll => self.session.reset_all(),
        }
        Control::Continue
    }

    fn play(&mut self, pos: Position) {
        match self.session.apply_move(pos.to_index()) {
            Ok(MoveReport::Placed { .. }) => {}
            Ok(MoveReport::Rejected(reason)) => {
                self.notice = Some(reason.to_string());
            }
            Err(SessionError::InvalidCell(index)) => {
                warn!(index, "Cursor produced an invalid cell");
            }
        }
    }

    fn switch_mode(&mut self, mode: Mode) {
        info!(%mode, "Switching mode");
        self.session.set_mode(mode);
    }

    /// Returns a computer reply that still needs a timer.
    ///
    /// Each ticket is handed out once; the caller sleeps and passes it back to
    /// [`App::handle_reply`].
    pub fn next_reply(&mut self) -> Option<ReplyTicket> {
        let ticket = self.session.pending_reply()?;
        if self.scheduled == Some(ticket) {
            return None;
        }
        self.scheduled = Some(ticket);
        Some(ticket)
    }

    /// Redeems a ticket whose delay has elapsed.
    #[instrument(skip(self))]
    pub fn handle_reply(&mut self, ticket: ReplyTicket) {
        if self.scheduled == Some(ticket) {
            self.scheduled = None;
        }
        match self.session.play_computer_reply(ticket) {
            ReplyResult::Played(report) => debug!(?report, "Computer replied"),
            ReplyResult::Stale => debug!("Computer reply arrived after a reset"),
        }
    }
}
