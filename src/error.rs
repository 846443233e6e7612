use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the I/O edges of the game (terminal, config, logging).
///
/// Game over is a normal state and never surfaces here.
#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SnakeError>;
