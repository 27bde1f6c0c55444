//! Error types for the Aladin list client.

use thiserror::Error;

/// Result type for Aladin client operations.
pub type Result<T> = std::result::Result<T, AladinError>;

/// Aladin client errors.
#[derive(Debug, Error)]
pub enum AladinError {
    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response)
    #[error("aladin API error ({status}): {message}")]
    Api { status: u16, message: String },
}
