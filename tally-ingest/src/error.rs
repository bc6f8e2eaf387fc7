//! Error types for the ledger layer

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Reading records failed; callers show a retryable message and analyze an empty list.
    #[error("Data unavailable ({path}): {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    #[error("Could not save ledger ({path}): {reason}")]
    PersistenceWriteFailed { path: PathBuf, reason: String },

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

impl LedgerError {
    /// Whether trying the same read again might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::DataUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
