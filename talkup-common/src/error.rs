//! Common error types for TalkUp

use thiserror::Error;

/// Common result type for TalkUp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the TalkUp service
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// External generation provider failure (transport, status, payload)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Snapshot persistence failure (logged and swallowed by callers)
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
