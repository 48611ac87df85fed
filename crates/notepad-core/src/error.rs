//! Error types for notepad-core

use thiserror::Error;

use crate::reminder::ReminderError;

/// Result type alias using notepad-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notepad-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note, category or tag not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A category or tag is still referenced by at least one note
    #[error("{0} is still used by {1} note(s)")]
    InUse(String, usize),

    /// Reminder could not be scheduled
    #[error(transparent)]
    Reminder(#[from] ReminderError),
}
