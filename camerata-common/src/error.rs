//! Common error types for camerata

use thiserror::Error;

/// Common result type for camerata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the camerata crates
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error (wraps reqwest::Error)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend service rejected the request
    #[error("Backend error {status}: {message}")]
    Backend { status: u16, message: String },

    /// Authentication failed (wrong credentials, expired session)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Backend connection parameters are absent
    #[error("Backend not configured")]
    NotConfigured,

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
