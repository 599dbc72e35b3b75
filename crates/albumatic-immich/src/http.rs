//! HTTP backend abstraction for the Immich API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest. There is deliberately no retry logic: runs are idempotent
//! and failures surface as per-album outcomes.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::ImmichClientConfig;
use crate::error::{ImmichError, ImmichResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends speaking JSON to the Immich API.
///
/// This is an implementation detail - external code should use the
/// `ImmichClientPort` trait from `albumatic-core`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET a URL and deserialize the JSON response.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ImmichResult<T>;

    /// POST a JSON body and deserialize the JSON response.
    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &Value,
    ) -> ImmichResult<T>;

    /// PUT a JSON body, discarding the response body.
    async fn put_json(&self, url: &Url, body: &Value) -> ImmichResult<()>;

    /// DELETE a URL, discarding the response body.
    async fn delete(&self, url: &Url) -> ImmichResult<()>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// Adds the `X-API-Key` header to every request and enforces the configured
/// timeout; everything else is left to the transport.
pub struct ReqwestBackend {
    client: reqwest::Client,
    api_key: String,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &ImmichClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
        }
    }

    fn request(&self, method: reqwest::Method, url: &Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url.as_str())
            .header("X-API-Key", &self.api_key)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> ImmichResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ImmichError::Unauthorized);
        }
        Err(ImmichError::ApiRequestFailed {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ImmichResult<T> {
        let response = self.send(self.request(reqwest::Method::GET, url), url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &Value,
    ) -> ImmichResult<T> {
        let request = self.request(reqwest::Method::POST, url).json(body);
        let response = self.send(request, url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn put_json(&self, url: &Url, body: &Value) -> ImmichResult<()> {
        let request = self.request(reqwest::Method::PUT, url).json(body);
        self.send(request, url).await?;
        Ok(())
    }

    async fn delete(&self, url: &Url) -> ImmichResult<()> {
        self.send(self.request(reqwest::Method::DELETE, url), url)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
