//! Internal API wire types for the Immich server.
//!
//! These types are internal to `albumatic-immich` and are not exposed to
//! consumers. External consumers use the port DTOs from `albumatic-core`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Responses
// ============================================================================

/// One album as returned by `GET /albums`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    pub id: String,
    pub album_name: String,
}

/// Album detail as returned by `GET /albums/{id}`, members included.
#[derive(Debug, Deserialize)]
pub struct AlbumDetailResponse {
    #[serde(default)]
    pub assets: Vec<AssetResponse>,
}

/// A single asset reference. Only the id is ever needed.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetResponse {
    pub id: String,
}

/// Response of `POST /search/metadata`.
#[derive(Debug, Deserialize)]
pub struct SearchMetadataResponse {
    pub assets: SearchAssetsPage,
}

/// One page of search hits.
#[derive(Debug, Deserialize)]
pub struct SearchAssetsPage {
    #[serde(default)]
    pub items: Vec<AssetResponse>,
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /albums`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest<'a> {
    pub album_name: &'a str,
    pub description: &'a str,
    pub asset_ids: &'a [String],
}

/// Body of `PUT /albums/{id}/assets`.
#[derive(Debug, Serialize)]
pub struct BulkIdsRequest<'a> {
    pub ids: &'a [String],
}

/// Body of `POST /search/metadata`: filter assets by recorded original path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadataRequest<'a> {
    pub original_path: &'a str,
}
