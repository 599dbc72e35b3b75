//! Internal error types for Immich operations.
//!
//! These errors are internal to `albumatic-immich` and are mapped to core
//! port errors at the boundary.

use thiserror::Error;

/// Result type alias for Immich operations.
pub type ImmichResult<T> = Result<T, ImmichError>;

/// Errors related to Immich API operations.
#[derive(Debug, Error)]
pub enum ImmichError {
    /// API request failed with an HTTP error status.
    #[error("Immich API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The server rejected the API key.
    #[error("the Immich server rejected the API key")]
    Unauthorized,

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from Immich API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
