//! Terminal UI for tictally.
//!
//! Everything runs on one loop: draw, apply any computer replies whose timer
//! fired, then read one key. The only concurrency is the reply timer, a tokio
//! task that sleeps and sends its [`ReplyTicket`] back over a channel. The
//! session decides on arrival whether the ticket is still good.

mod app;
mod input;
mod ui;

pub use app::{App, Control};

use crate::config::Settings;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tictally_engine::ReplyTicket;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Runs the terminal UI until the user quits.
pub async fn run_tui(settings: Settings) -> Result<()> {
    // Log to a file so tracing output doesn't draw over the board
    let log_file = std::fs::File::create(settings.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(mode = %settings.mode(), delay_ms = settings.reply_delay_ms(), "Starting tictally TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
    let app = App::new(settings.session());
    let res = run_app(&mut terminal, app, settings.reply_delay(), reply_tx, &mut reply_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("TUI closed");
    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    delay: Duration,
    reply_tx: mpsc::UnboundedSender<ReplyTicket>,
    reply_rx: &mut mpsc::UnboundedReceiver<ReplyTicket>,
) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        while let Ok(ticket) = reply_rx.try_recv() {
            app.handle_reply(ticket);
        }

        if let Some(ticket) = app.next_reply() {
            schedule_reply(ticket, delay, reply_tx.clone());
        }

        // Short poll keeps replies landing close to their deadline. The poll
        // blocks this worker thread, so timer tasks rely on the multi-threaded
        // runtime from #[tokio::main].
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release on some platforms).
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if app.handle_key(key) == Control::Quit {
                info!("User quit");
                return Ok(());
            }
        }
    }
}

/// Sends `ticket` back after `delay`.
fn schedule_reply(ticket: ReplyTicket, delay: Duration, tx: mpsc::UnboundedSender<ReplyTicket>) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        // The receiver is gone once the UI has quit.
        let _ = tx.send(ticket);
    });
}
