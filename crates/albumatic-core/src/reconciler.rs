//! The reconciliation engine: converge remote albums to the filesystem's
//! desired state.
//!
//! Specifications are processed strictly one at a time, in scan order. A
//! failing specification is recorded and the run moves on; only the purge
//! phase (and the initial album listing) can abort a whole run, because
//! every later decision would be based on unknown remote state.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::assets::resolve_assets;
use crate::domain::AlbumSpec;
use crate::name::{NamePattern, resolve_name};
use crate::ports::{ImmichClientPort, ImmichPortError};
use crate::report::{RunReport, SpecOutcome, SpecReport};
use crate::scanner::DEFAULT_MARKER_NAME;

/// Options for one reconciliation run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Perform every decision step but suppress create/add calls.
    /// Deletion via `delete_all_first` is deliberately NOT suppressed, so an
    /// operator can preview wipe-then-recreate risk.
    pub dry_run: bool,
    /// Delete every remote album before reconciling.
    pub delete_all_first: bool,
    /// Split add-asset calls into chunks of at most this many ids.
    /// Unset means one unchunked call per album.
    pub chunk_size: Option<NonZeroUsize>,
    /// Optional transform from directory name to album name.
    pub pattern: Option<NamePattern>,
    /// Marker filename, used to exclude nested album subtrees during asset
    /// resolution.
    pub marker_name: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            delete_all_first: false,
            chunk_size: None,
            pattern: None,
            marker_name: DEFAULT_MARKER_NAME.to_string(),
        }
    }
}

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum FatalError {
    /// A delete call in the purge phase failed; remote state is now
    /// undefined, so nothing further is attempted.
    #[error("failed to purge existing albums: {source}")]
    Purge {
        /// Underlying port error
        #[source]
        source: ImmichPortError,
    },

    /// The initial album listing failed; without it no per-spec decision
    /// can be made.
    #[error("failed to list remote albums: {source}")]
    ListAlbums {
        /// Underlying port error
        #[source]
        source: ImmichPortError,
    },
}

/// The orchestrating core: drives purge, lookup, create and add decisions
/// for every specification of a run.
pub struct Reconciler {
    client: Arc<dyn ImmichClientPort>,
}

enum AddResult {
    Complete,
    Partial { added: usize, reason: String },
    Failed { reason: String },
}

impl Reconciler {
    /// Create a reconciler on top of any Immich port implementation.
    pub fn new(client: Arc<dyn ImmichClientPort>) -> Self {
        Self { client }
    }

    /// Run one reconciliation pass over the given specifications.
    ///
    /// Returns a [`RunReport`] with one entry per specification. Only purge
    /// failures and an unreadable remote album list are fatal.
    pub async fn run(
        &self,
        specs: &[AlbumSpec],
        options: &RunOptions,
    ) -> Result<RunReport, FatalError> {
        let mut report = RunReport::default();

        if options.delete_all_first {
            report.albums_deleted = self.purge_all_albums().await?;
        }

        let remote = self
            .client
            .list_albums()
            .await
            .map_err(|source| FatalError::ListAlbums { source })?;
        let mut remote_by_name: HashMap<String, String> = remote
            .into_iter()
            .map(|album| (album.name, album.id))
            .collect();

        // Resolve every name up front so that collisions can be flagged
        // before any call references a contested name.
        let resolved: Vec<Result<String, String>> = specs
            .iter()
            .map(|spec| {
                resolve_name(
                    &spec.raw_name,
                    spec.override_name.as_deref(),
                    options.pattern.as_ref(),
                )
                .map_err(|err| err.to_string())
            })
            .collect();

        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for name in resolved.iter().flatten() {
            *name_counts.entry(name.as_str()).or_default() += 1;
        }

        for (spec, name_result) in specs.iter().zip(&resolved) {
            let outcome = match name_result {
                Err(reason) => SpecOutcome::NameFailed {
                    reason: reason.clone(),
                },
                Ok(name) if name_counts.get(name.as_str()).copied().unwrap_or(0) > 1 => {
                    SpecOutcome::NameCollision
                }
                Ok(name) => {
                    self.converge(spec, name, &mut remote_by_name, options)
                        .await
                }
            };

            let album_name = match name_result {
                Ok(name) => name.clone(),
                Err(_) => spec.raw_name.clone(),
            };
            info!(
                "{} ({}): {:?}",
                album_name,
                spec.source_path.display(),
                outcome
            );
            report.reports.push(SpecReport {
                source_path: spec.source_path.clone(),
                album_name,
                outcome,
            });
        }

        Ok(report)
    }

    async fn purge_all_albums(&self) -> Result<usize, FatalError> {
        let albums = self
            .client
            .list_albums()
            .await
            .map_err(|source| FatalError::Purge { source })?;

        let mut deleted = 0;
        for album in albums {
            debug!("deleting album '{}' ({})", album.name, album.id);
            self.client
                .delete_album(&album.id)
                .await
                .map_err(|source| FatalError::Purge { source })?;
            deleted += 1;
        }
        Ok(deleted)
    }

    /// Converge one specification with an already-resolved, collision-free
    /// name. Never fails the run; everything becomes an outcome.
    async fn converge(
        &self,
        spec: &AlbumSpec,
        name: &str,
        remote_by_name: &mut HashMap<String, String>,
        options: &RunOptions,
    ) -> SpecOutcome {
        let assets = match resolve_assets(spec, &options.marker_name, self.client.as_ref()).await {
            Ok(assets) => assets,
            Err(err) => {
                return SpecOutcome::AssetsFailed {
                    reason: err.to_string(),
                };
            }
        };

        let Some(album_id) = remote_by_name.get(name).cloned() else {
            // Absent remotely: create (or simulate) with the full asset set.
            if options.dry_run {
                return SpecOutcome::WouldCreate {
                    asset_count: assets.len(),
                };
            }

            let album = match self.client.create_album(name, &spec.description).await {
                Ok(album) => album,
                Err(err) => {
                    return SpecOutcome::CreateFailed {
                        reason: err.to_string(),
                    };
                }
            };
            remote_by_name.insert(name.to_string(), album.id.clone());

            let delta: Vec<String> = assets.into_iter().collect();
            return match self.add_in_chunks(&album.id, &delta, options.chunk_size).await {
                AddResult::Complete => SpecOutcome::Created {
                    assets_added: delta.len(),
                },
                AddResult::Partial { added, reason } => SpecOutcome::PartialAdd {
                    added,
                    remaining: delta.len() - added,
                    reason,
                },
                AddResult::Failed { reason } => SpecOutcome::AddFailed { reason },
            };
        };

        // Present remotely: add only what's missing.
        let members = match self.client.album_assets(&album_id).await {
            Ok(members) => members,
            Err(err) => {
                return SpecOutcome::AssetsFailed {
                    reason: err.to_string(),
                };
            }
        };

        let delta: Vec<String> = assets.difference(&members).cloned().collect();
        if delta.is_empty() {
            return SpecOutcome::NoChange;
        }
        if options.dry_run {
            return SpecOutcome::WouldAddAssets { delta: delta.len() };
        }

        match self.add_in_chunks(&album_id, &delta, options.chunk_size).await {
            AddResult::Complete => SpecOutcome::AssetsAdded { added: delta.len() },
            AddResult::Partial { added, reason } => SpecOutcome::PartialAdd {
                added,
                remaining: delta.len() - added,
                reason,
            },
            AddResult::Failed { reason } => SpecOutcome::AddFailed { reason },
        }
    }

    /// Issue the add-asset calls for one delta, chunked when configured.
    ///
    /// Chunks are attempted in order and the first failure stops the
    /// remainder; there is no rollback of already-applied chunks.
    async fn add_in_chunks(
        &self,
        album_id: &str,
        delta: &[String],
        chunk_size: Option<NonZeroUsize>,
    ) -> AddResult {
        if delta.is_empty() {
            return AddResult::Complete;
        }

        let Some(chunk_size) = chunk_size else {
            return match self.client.add_assets(album_id, delta).await {
                Ok(()) => AddResult::Complete,
                Err(err) => AddResult::Failed {
                    reason: err.to_string(),
                },
            };
        };

        let mut added = 0;
        for chunk in delta.chunks(chunk_size.get()) {
            debug!("adding {} assets to album {}", chunk.len(), album_id);
            match self.client.add_assets(album_id, chunk).await {
                Ok(()) => added += chunk.len(),
                Err(err) => {
                    return AddResult::Partial {
                        added,
                        reason: err.to_string(),
                    };
                }
            }
        }
        AddResult::Complete
    }
}
