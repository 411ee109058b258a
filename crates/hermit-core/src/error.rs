//! Error types for hermit-core

use thiserror::Error;

/// Result type alias using hermit-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hermit-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Remote container error
    #[error("Storage error: {0}")]
    Storage(String),
}
