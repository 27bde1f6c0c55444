//! Error types for the Kakao book search client.

use thiserror::Error;

/// Result type for Kakao client operations.
pub type Result<T> = std::result::Result<T, KakaoError>;

/// Kakao client errors.
#[derive(Debug, Error)]
pub enum KakaoError {
    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response)
    #[error("kakao API error ({status}): {message}")]
    Api { status: u16, message: String },
}
