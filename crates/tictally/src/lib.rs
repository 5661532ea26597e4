//! Tictally - terminal front end for the tictally engine.
//!
//! # Architecture
//!
//! - **Cli**: `tui` and `play` subcommands
//! - **Settings**: TOML file merged with command-line overrides
//! - **Tui**: ratatui board, scoreboard and the delayed computer reply
//! - **Headless**: scripted games for quick checks and shell pipelines

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod headless;
mod tui;

// Crate-level exports - Command line
pub use cli::{Cli, Command, GameArgs};

// Crate-level exports - Configuration
pub use config::{ConfigError, Settings};

// Crate-level exports - Front ends
pub use headless::{PlayReport, play, render_text};
pub use tui::{App, Control, run_tui};
