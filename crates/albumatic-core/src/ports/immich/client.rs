//! Immich client port trait.

use std::collections::BTreeSet;
use std::path::Path;

use async_trait::async_trait;

use super::error::ImmichPortResult;
use super::types::AlbumSummary;

/// Port trait for the Immich album and asset surface the reconciler needs.
///
/// # Design
///
/// - Uses core-owned DTOs, not Immich API wire types
/// - Returns `ImmichPortError` for all failures
/// - Async methods for network operations
/// - Albums are only ever created, extended, or deleted wholesale; the
///   reconciler never removes individual assets from an album
#[async_trait]
pub trait ImmichClientPort: Send + Sync {
    /// List all albums visible to the API key.
    async fn list_albums(&self) -> ImmichPortResult<Vec<AlbumSummary>>;

    /// Create an empty album and return its summary.
    async fn create_album(&self, name: &str, description: &str) -> ImmichPortResult<AlbumSummary>;

    /// Fetch the ids of all assets currently in an album.
    async fn album_assets(&self, album_id: &str) -> ImmichPortResult<BTreeSet<String>>;

    /// Add assets to an album. Ids already present are ignored server-side.
    async fn add_assets(&self, album_id: &str, asset_ids: &[String]) -> ImmichPortResult<()>;

    /// Delete an album (its assets survive outside the album).
    async fn delete_album(&self, album_id: &str) -> ImmichPortResult<()>;

    /// Find the asset whose recorded original path matches `path`.
    ///
    /// Returns `Ok(None)` when the server has not indexed that file, which
    /// callers treat as a warning rather than an error.
    async fn find_asset_by_path(&self, path: &Path) -> ImmichPortResult<Option<String>>;
}
