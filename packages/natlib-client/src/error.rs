//! Error types for the National Library client.

use thiserror::Error;

/// Result type for National Library client operations.
pub type Result<T> = std::result::Result<T, NatLibError>;

/// National Library client errors.
#[derive(Debug, Error)]
pub enum NatLibError {
    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response)
    #[error("national library API error ({status}): {message}")]
    Api { status: u16, message: String },
}
