//! Public configuration for the Immich client.

use std::time::Duration;

/// Configuration for the Immich client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use albumatic_immich::ImmichClientConfig;
/// use std::time::Duration;
///
/// let config = ImmichClientConfig::new("http://immich.local:2283/api", "secret-key")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ImmichClientConfig {
    /// Base URL of the Immich API, typically ending in `/api`
    pub(crate) base_url: String,
    /// API key sent as `X-API-Key`
    pub(crate) api_key: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl ImmichClientConfig {
    /// Create a configuration for the given endpoint and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            user_agent: concat!("albumatic/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds. This is the only time bound the client
    /// imposes; there are no automatic retries.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
