//! Command-line interface for tictally.

use clap::{Args, Parser, Subcommand};
use tictally_engine::Mode;

/// Tictally - tic-tac-toe with a running score
#[derive(Parser, Debug)]
#[command(name = "tictally")]
#[command(about = "Tic-tac-toe in the terminal, with a score tally and a naive computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file (ignored if it doesn't exist)
    #[arg(long, global = true, default_value = "tictally.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every way of playing.
#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// Opponent mode: multiplayer or computer
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Seed for the computer's random moves
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Tui {
        #[command(flatten)]
        game: GameArgs,

        /// Delay before the computer replies, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Apply a scripted list of moves and print the result
    Play {
        #[command(flatten)]
        game: GameArgs,

        /// Comma-separated cells: indices 0-8 or labels like "center"
        #[arg(long, value_delimiter = ',', required = true)]
        moves: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}
