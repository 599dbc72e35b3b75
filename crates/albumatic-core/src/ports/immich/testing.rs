//! A recording fake Immich server for tests.
//!
//! Holds in-memory albums, members and path-indexed assets, records every
//! port call, and can be told to fail specific calls so that chunked-add
//! and purge failure paths can be exercised.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::client::ImmichClientPort;
use super::error::{ImmichPortError, ImmichPortResult};
use super::types::AlbumSummary;

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListAlbums,
    CreateAlbum(String),
    AlbumAssets(String),
    AddAssets { album_id: String, count: usize },
    DeleteAlbum(String),
    FindAsset(PathBuf),
}

impl Call {
    /// Whether this call mutates server state.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::CreateAlbum(_) | Self::AddAssets { .. } | Self::DeleteAlbum(_)
        )
    }
}

#[derive(Default)]
struct State {
    albums: Vec<AlbumSummary>,
    members: HashMap<String, BTreeSet<String>>,
    assets_by_path: HashMap<PathBuf, String>,
}

/// In-memory fake implementing [`ImmichClientPort`].
#[derive(Default)]
pub struct FakeImmich {
    state: Mutex<State>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicUsize,
    fail_add_on_call: Option<usize>,
    fail_deletes: bool,
}

impl FakeImmich {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing album with the given member asset ids.
    pub fn with_album(self, id: &str, name: &str, members: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.albums.push(AlbumSummary::new(id, name));
            state
                .members
                .insert(id.to_string(), members.iter().map(|&m| m.to_string()).collect());
        }
        self
    }

    /// Seed an asset the server knows under the given original path.
    pub fn with_asset(self, path: impl Into<PathBuf>, asset_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .assets_by_path
            .insert(path.into(), asset_id.to_string());
        self
    }

    /// Make the n-th `add_assets` call fail (1-based).
    pub fn fail_add_on_call(mut self, n: usize) -> Self {
        self.fail_add_on_call = Some(n);
        self
    }

    /// Make every `delete_album` call fail.
    pub fn fail_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Current albums on the fake server.
    pub fn albums(&self) -> Vec<AlbumSummary> {
        self.state.lock().unwrap().albums.clone()
    }

    /// Current members of the album with the given name, if it exists.
    pub fn members_of(&self, name: &str) -> Option<BTreeSet<String>> {
        let state = self.state.lock().unwrap();
        let album = state.albums.iter().find(|a| a.name == name)?;
        state.members.get(&album.id).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn add_calls_so_far(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, Call::AddAssets { .. }))
            .count()
    }
}

#[async_trait]
impl ImmichClientPort for FakeImmich {
    async fn list_albums(&self) -> ImmichPortResult<Vec<AlbumSummary>> {
        self.record(Call::ListAlbums);
        Ok(self.state.lock().unwrap().albums.clone())
    }

    async fn create_album(&self, name: &str, _description: &str) -> ImmichPortResult<AlbumSummary> {
        self.record(Call::CreateAlbum(name.to_string()));
        let id = format!("album-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let summary = AlbumSummary::new(id.clone(), name);
        let mut state = self.state.lock().unwrap();
        state.albums.push(summary.clone());
        state.members.insert(id, BTreeSet::new());
        Ok(summary)
    }

    async fn album_assets(&self, album_id: &str) -> ImmichPortResult<BTreeSet<String>> {
        self.record(Call::AlbumAssets(album_id.to_string()));
        self.state
            .lock()
            .unwrap()
            .members
            .get(album_id)
            .cloned()
            .ok_or_else(|| ImmichPortError::NotFound {
                resource: format!("album {album_id}"),
            })
    }

    async fn add_assets(&self, album_id: &str, asset_ids: &[String]) -> ImmichPortResult<()> {
        self.record(Call::AddAssets {
            album_id: album_id.to_string(),
            count: asset_ids.len(),
        });
        if self.fail_add_on_call == Some(self.add_calls_so_far()) {
            return Err(ImmichPortError::ApiStatus {
                status: 500,
                endpoint: format!("/albums/{album_id}/assets"),
            });
        }
        let mut state = self.state.lock().unwrap();
        state
            .members
            .entry(album_id.to_string())
            .or_default()
            .extend(asset_ids.iter().cloned());
        Ok(())
    }

    async fn delete_album(&self, album_id: &str) -> ImmichPortResult<()> {
        self.record(Call::DeleteAlbum(album_id.to_string()));
        if self.fail_deletes {
            return Err(ImmichPortError::ApiStatus {
                status: 500,
                endpoint: format!("/albums/{album_id}"),
            });
        }
        let mut state = self.state.lock().unwrap();
        state.albums.retain(|a| a.id != album_id);
        state.members.remove(album_id);
        Ok(())
    }

    async fn find_asset_by_path(&self, path: &Path) -> ImmichPortResult<Option<String>> {
        self.record(Call::FindAsset(path.to_path_buf()));
        Ok(self.state.lock().unwrap().assets_by_path.get(path).cloned())
    }
}

/// A port whose asset lookups always fail, for unreachable-server tests.
pub struct UnreachableImmich;

#[async_trait]
impl ImmichClientPort for UnreachableImmich {
    async fn list_albums(&self) -> ImmichPortResult<Vec<AlbumSummary>> {
        Err(network_down())
    }

    async fn create_album(&self, _name: &str, _description: &str) -> ImmichPortResult<AlbumSummary> {
        Err(network_down())
    }

    async fn album_assets(&self, _album_id: &str) -> ImmichPortResult<BTreeSet<String>> {
        Err(network_down())
    }

    async fn add_assets(&self, _album_id: &str, _asset_ids: &[String]) -> ImmichPortResult<()> {
        Err(network_down())
    }

    async fn delete_album(&self, _album_id: &str) -> ImmichPortResult<()> {
        Err(network_down())
    }

    async fn find_asset_by_path(&self, _path: &Path) -> ImmichPortResult<Option<String>> {
        Err(network_down())
    }
}

fn network_down() -> ImmichPortError {
    ImmichPortError::Network {
        message: "connection refused".to_string(),
    }
}
