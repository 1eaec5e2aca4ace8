//! Configuration file loading for the game driver.
//!
//! Settings come from an optional TOML file; command-line flags override
//! them in `main`.

use std::path::Path;

use chess_core::{Color, FormatError};
use chess_engine::Position;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::parse_player_color;

/// Errors that can occur when loading or interpreting configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A value was read but does not describe a color or position.
    #[error("Invalid config value: {0}")]
    InvalidValue(#[from] FormatError),
}

/// Driver settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct PlayConfig {
    /// Color the human plays, `w` or `b`. Unset means ask at startup.
    #[serde(default)]
    pub player_color: Option<String>,
    /// FEN to start from. Defaults to the standard starting position.
    #[serde(default)]
    pub start_fen: Option<String>,
    /// Seed for the computer player. Unset means a fresh seed every run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Print the white and black occupancy bitboards after every move.
    #[serde(default)]
    pub show_bitboards: bool,
}

impl PlayConfig {
    /// Default configuration file name, looked up in the working directory.
    pub const FILE_NAME: &'static str = "chess-play.toml";

    /// Loads the configuration at `path`, or the defaults if there is no
    /// file there.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the configured human color, if one is set.
    pub fn player_color(&self) -> Result<Option<Color>, ConfigError> {
        match &self.player_color {
            Some(text) => Ok(Some(parse_player_color(text)?)),
            None => Ok(None),
        }
    }

    /// Builds the starting position.
    pub fn start_position(&self) -> Result<Position, ConfigError> {
        match &self.start_fen {
            Some(fen) => Ok(Position::from_fen(fen)?),
            None => Ok(Position::startpos()),
        }
    }
}
