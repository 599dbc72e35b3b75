//! Immich client: the `ImmichClientPort` implementation used in production.

use std::collections::BTreeSet;
use std::path::Path;

use async_trait::async_trait;
use url::Url;

use albumatic_core::ports::{AlbumSummary, ImmichClientPort, ImmichPortError, ImmichPortResult};

use crate::config::ImmichClientConfig;
use crate::error::{ImmichError, ImmichResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{
    AlbumDetailResponse, AlbumResponse, BulkIdsRequest, CreateAlbumRequest,
    SearchMetadataRequest, SearchMetadataResponse,
};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default Immich client using the reqwest HTTP backend.
pub type DefaultImmichClient = ImmichClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Immich server API.
///
/// Generic over an HTTP backend for testability; use `DefaultImmichClient`
/// in production code.
pub struct ImmichClient<B: HttpBackend> {
    backend: B,
    base_url: Url,
}

impl DefaultImmichClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Fails when the configured base URL does not parse.
    pub fn new(config: &ImmichClientConfig) -> Result<Self, ImmichError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))?;
        Ok(Self {
            backend: ReqwestBackend::new(config),
            base_url,
        })
    }
}

impl<B: HttpBackend> ImmichClient<B> {
    /// Create a client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, backend: B) -> Self {
        Self {
            backend,
            base_url: Url::parse(base_url).expect("test base URL is valid"),
        }
    }

    fn endpoint(&self, path: &str) -> ImmichResult<Url> {
        Url::parse(&format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path))
            .map_err(Into::into)
    }
}

/// Map internal client errors to the core port error vocabulary.
fn to_port_error(err: ImmichError) -> ImmichPortError {
    match err {
        ImmichError::ApiRequestFailed { status: 404, url } => {
            ImmichPortError::NotFound { resource: url }
        }
        ImmichError::ApiRequestFailed { status, url } => ImmichPortError::ApiStatus {
            status,
            endpoint: url,
        },
        ImmichError::Unauthorized => ImmichPortError::Auth,
        ImmichError::InvalidResponse { message } => ImmichPortError::InvalidResponse { message },
        ImmichError::Network(err) => ImmichPortError::Network {
            message: err.to_string(),
        },
        ImmichError::InvalidUrl(err) => ImmichPortError::InvalidResponse {
            message: err.to_string(),
        },
        ImmichError::JsonParse(err) => ImmichPortError::InvalidResponse {
            message: err.to_string(),
        },
    }
}

#[async_trait]
impl<B: HttpBackend> ImmichClientPort for ImmichClient<B> {
    async fn list_albums(&self) -> ImmichPortResult<Vec<AlbumSummary>> {
        let url = self.endpoint("albums").map_err(to_port_error)?;
        let albums: Vec<AlbumResponse> =
            self.backend.get_json(&url).await.map_err(to_port_error)?;
        Ok(albums
            .into_iter()
            .map(|album| AlbumSummary::new(album.id, album.album_name))
            .collect())
    }

    async fn create_album(&self, name: &str, description: &str) -> ImmichPortResult<AlbumSummary> {
        let url = self.endpoint("albums").map_err(to_port_error)?;
        let body = serde_json::to_value(CreateAlbumRequest {
            album_name: name,
            description,
            asset_ids: &[],
        })
        .map_err(|err| to_port_error(err.into()))?;
        let album: AlbumResponse = self
            .backend
            .post_json(&url, &body)
            .await
            .map_err(to_port_error)?;
        Ok(AlbumSummary::new(album.id, album.album_name))
    }

    async fn album_assets(&self, album_id: &str) -> ImmichPortResult<BTreeSet<String>> {
        let url = self
            .endpoint(&format!("albums/{album_id}"))
            .map_err(to_port_error)?;
        let detail: AlbumDetailResponse =
            self.backend.get_json(&url).await.map_err(to_port_error)?;
        Ok(detail.assets.into_iter().map(|asset| asset.id).collect())
    }

    async fn add_assets(&self, album_id: &str, asset_ids: &[String]) -> ImmichPortResult<()> {
        let url = self
            .endpoint(&format!("albums/{album_id}/assets"))
            .map_err(to_port_error)?;
        let body = serde_json::to_value(BulkIdsRequest { ids: asset_ids })
            .map_err(|err| to_port_error(err.into()))?;
        self.backend
            .put_json(&url, &body)
            .await
            .map_err(to_port_error)
    }

    async fn delete_album(&self, album_id: &str) -> ImmichPortResult<()> {
        let url = self
            .endpoint(&format!("albums/{album_id}"))
            .map_err(to_port_error)?;
        self.backend.delete(&url).await.map_err(to_port_error)
    }

    async fn find_asset_by_path(&self, path: &Path) -> ImmichPortResult<Option<String>> {
        let url = self.endpoint("search/metadata").map_err(to_port_error)?;
        let original_path = path.to_string_lossy();
        let body = serde_json::to_value(SearchMetadataRequest {
            original_path: original_path.as_ref(),
        })
        .map_err(|err| to_port_error(err.into()))?;
        let response: SearchMetadataResponse = self
            .backend
            .post_json(&url, &body)
            .await
            .map_err(to_port_error)?;
        Ok(response.assets.items.into_iter().next().map(|asset| asset.id))
    }
}
