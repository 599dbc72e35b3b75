//! Error types for Immich port operations.

use thiserror::Error;

/// Errors from Immich port operations.
///
/// These are domain-level errors that consumers can handle.
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Error)]
pub enum ImmichPortError {
    /// The referenced album or asset does not exist on the server.
    #[error("Immich resource not found: {resource}")]
    NotFound {
        /// Description of what was looked up
        resource: String,
    },

    /// The API key was rejected.
    #[error("authentication with the Immich server failed")]
    Auth,

    /// Network or connectivity error.
    #[error("network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("Immich API returned status {status} for {endpoint}")]
    ApiStatus {
        /// HTTP status code
        status: u16,
        /// The endpoint that was called
        endpoint: String,
    },

    /// The server answered with something the client could not interpret.
    #[error("invalid response from the Immich API: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },
}

/// Result type alias for Immich port operations.
pub type ImmichPortResult<T> = Result<T, ImmichPortError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = ImmichPortError::ApiStatus {
            status: 500,
            endpoint: "/albums".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("/albums"));

        let err = ImmichPortError::NotFound {
            resource: "album 123".to_string(),
        };
        assert!(err.to_string().contains("album 123"));
    }
}
