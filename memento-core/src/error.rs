//! Error types for the memento ecosystem.

use thiserror::Error;

/// Errors that can occur in memento operations.
#[derive(Error, Debug)]
pub enum MementoError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("No event with id {0}")]
    EventNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Notification error: {0}")]
    Notify(String),
}

/// Result type alias for memento operations.
pub type MementoResult<T> = Result<T, MementoError>;
