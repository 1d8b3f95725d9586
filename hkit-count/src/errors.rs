use hkit_core::CoreError;
use thiserror::Error;

/// Errors raised before a counting pass starts.
///
/// Invariant violations found during a pass (negative counts, an unsorted window) are
/// programming errors and panic instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Too many records for one counting pass: {0}")]
    TooManyRecords(usize),
}

pub type Result<T> = std::result::Result<T, CountError>;
