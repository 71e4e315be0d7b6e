//! Error types for dbmslink

use thiserror::Error;

/// Core error type for dbmslink operations
#[derive(Error, Debug)]
pub enum DbmsLinkError {
    /// An operation was called on a value that is missing data it needs
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for dbmslink operations
pub type Result<T> = std::result::Result<T, DbmsLinkError>;
