use thiserror::Error;

use crate::board::Position;

/// Errors surfaced by the engine to the game loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid move at {position}: {reason}")]
    InvalidMove {
        position: Position,
        reason: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Cannot undo {0}: it is not the most recent move")]
    UndoMismatch(Position),

    #[error("Game is already over")]
    GameOver,

    #[error("No moves available")]
    NoMovesAvailable,

    #[error("Search worker failed: {0}")]
    WorkerFailure(String),

    #[error("Every root search branch failed ({0} branches)")]
    SearchFailure(usize),

    #[error("Search timed out before any root branch completed")]
    SearchTimedOut,

    #[error("Search cancelled")]
    SearchCancelled,
}

/// Errors from loading or storing settings files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write config file: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to deserialize config: {0}")]
    Parse(#[source] serde_yaml_ng::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("Config validation error: {0}")]
    Invalid(String),
}
