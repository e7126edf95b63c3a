//! Core error types.
//!
//! These error types separate parse faults, storage faults, and aggregator
//! faults so callers can classify failures without string matching.

use thiserror::Error;

/// Errors surfaced by the questionary parser.
///
/// Malformed lines are skipped, never reported. A `ParseError` only occurs
/// when a rule evaluation itself faults (e.g. a numeric field too large to
/// represent), and it carries the underlying message.
#[derive(Debug, Error)]
pub enum ParseError {
    /// An internal rule evaluation failed while classifying a line.
    #[error("error parsing questionary: {message}")]
    Internal { message: String },
}

/// Errors from a statistics storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not read or write its medium.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted payload could not be decoded.
    #[error("corrupt statistics payload: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors surfaced by the statistics aggregator.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The caller handed in a result that violates its contract.
    #[error("invalid result: {0}")]
    InvalidResult(String),

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StatsError {
    /// Returns `true` if this error came from the storage backend rather
    /// than from the caller's input.
    pub fn is_store(&self) -> bool {
        matches!(self, StatsError::Store(_))
    }
}
