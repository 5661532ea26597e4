//! Tictally - tic-tac-toe in the terminal
//!
//! Runs the interactive board or plays a scripted game.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use tictally::{Cli, Command, GameArgs, Settings, play, render_text, run_tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;

    match cli.command {
        Command::Tui { game, delay_ms } => run_tui(settings.with_overrides(&game, delay_ms)).await,
        Command::Play { game, moves, json } => run_play(settings, game, moves, json),
    }
}

/// Play a scripted game and print the final board
fn run_play(settings: Settings, game: GameArgs, moves: Vec<String>, json: bool) -> Result<()> {
    // Logs go to stderr so stdout stays clean for the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let settings = settings.with_overrides(&game, None);
    info!(mode = %settings.mode(), moves = moves.len(), "Playing scripted game");

    let report = play(&settings, &moves)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}
