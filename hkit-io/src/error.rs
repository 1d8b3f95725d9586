use std::io;

use hkit_core::CoreError;
use thiserror::Error;

/// Error type for hkit-io operations.
#[derive(Error, Debug)]
pub enum PairsError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A data or header line could not be parsed.
    #[error("Malformed pairs record at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for hkit-io operations.
pub type Result<T> = std::result::Result<T, PairsError>;
