//! Error types for the snake crate.

use thiserror::Error;

/// Errors from the game's files and the terminal.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error, including terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config or score file exists but is not valid TOML for its shape.
    #[error("could not parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration parsed but holds unusable values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The best score could not be serialized.
    #[error("could not serialize score file: {0}")]
    ScoreSerialize(#[from] toml::ser::Error),

    /// The terminal cannot fit the board and its controls.
    #[error("terminal too small: need {needed_cols}x{needed_rows}, have {cols}x{rows}")]
    TerminalTooSmall {
        needed_cols: u16,
        needed_rows: u16,
        cols: u16,
        rows: u16,
    },
}

/// A specialized `Result` type for snake operations.
pub type Result<T> = std::result::Result<T, Error>;
