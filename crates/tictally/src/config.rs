//! Settings loaded from TOML and overridden from the command line.

use crate::cli::GameArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tictally_engine::{Mode, Player, Session};
use tracing::{debug, info, instrument};

/// User-configurable settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Opponent mode at startup.
    #[serde(default)]
    mode: Mode,

    /// Delay before the computer's reply, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    reply_delay_ms: u64,

    /// Symbol the computer plays.
    #[serde(default = "default_computer")]
    computer: Player,

    /// Fixed seed for the computer's random moves.
    #[serde(default)]
    seed: Option<u64>,

    /// Where the terminal UI writes its log.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_reply_delay_ms() -> u64 {
    500
}

fn default_computer() -> Player {
    Player::O
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictally_tui.log")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            reply_delay_ms: default_reply_delay_ms(),
            computer: default_computer(),
            seed: None,
            log_file: default_log_file(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;

        info!(mode = %settings.mode, "Settings loaded successfully");
        Ok(settings)
    }

    /// Loads settings from `path` if it exists, otherwise uses defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Settings file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, game: &GameArgs, reply_delay_ms: Option<u64>) -> Self {
        if let Some(mode) = game.mode {
            self.mode = mode;
        }
        if let Some(seed) = game.seed {
            self.seed = Some(seed);
        }
        if let Some(delay) = reply_delay_ms {
            self.reply_delay_ms = delay;
        }
        self
    }

    /// Delay before the computer's reply.
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Builds a fresh session from these settings.
    #[instrument(skip(self))]
    pub fn session(&self) -> Session {
        let session = match self.seed {
            Some(seed) => Session::with_seed(seed),
            None => Session::new(),
        };
        session.with_mode(self.mode).with_computer(self.computer)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
