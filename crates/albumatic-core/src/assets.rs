//! Asset resolution: map the files under a specification's directory to
//! remote asset identifiers.
//!
//! Which files count as assets is the server's call, not ours: every
//! candidate file is looked up by its original path and files the server
//! has not indexed are skipped with a warning. No local content sniffing.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

use crate::domain::AlbumSpec;
use crate::ports::{ImmichClientPort, ImmichPortError};

/// Errors that fail asset resolution for one specification.
///
/// Zero matched assets is NOT an error; an album may legitimately be empty
/// while the server catches up on indexing.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The specification's directory could not be enumerated.
    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        /// The directory being enumerated
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The server could not be queried for an asset.
    #[error("asset lookup failed for '{path}': {source}")]
    Lookup {
        /// The local file being looked up
        path: PathBuf,
        /// Underlying port error
        #[source]
        source: ImmichPortError,
    },
}

/// Resolve the member asset set for one specification.
///
/// Direct children of `spec.source_path` always participate; descendants
/// participate only when `spec.recursive` is set, and any subtree rooted at
/// a directory carrying its own marker is excluded (it belongs to its own
/// specification). The marker file itself is never a candidate.
pub async fn resolve_assets(
    spec: &AlbumSpec,
    marker_name: &str,
    port: &dyn ImmichClientPort,
) -> Result<BTreeSet<String>, AssetError> {
    let candidates = if spec.recursive {
        collect_recursive(&spec.source_path, marker_name)
    } else {
        collect_direct(&spec.source_path, marker_name)?
    };

    let mut assets = BTreeSet::new();
    for path in candidates {
        match port.find_asset_by_path(&path).await {
            Ok(Some(asset_id)) => {
                assets.insert(asset_id);
            }
            Ok(None) => {
                warn!("no indexed asset for '{}', skipping", path.display());
            }
            Err(source) => return Err(AssetError::Lookup { path, source }),
        }
    }
    Ok(assets)
}

/// Files directly inside the directory, sorted, marker excluded.
fn collect_direct(dir: &Path, marker_name: &str) -> Result<Vec<PathBuf>, AssetError> {
    let entries = fs::read_dir(dir).map_err(|source| AssetError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AssetError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && !is_marker(&path, marker_name) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// All files under the directory, sorted, pruning nested marker subtrees.
fn collect_recursive(dir: &Path, marker_name: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // Keep the spec's own root; prune any nested directory that
            // carries its own marker.
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !entry.path().join(marker_name).is_file()
        })
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry under {}: {err}", dir.display());
                    return None;
                }
            };
            let path = entry.path();
            (entry.file_type().is_file() && !is_marker(path, marker_name))
                .then(|| path.to_path_buf())
        })
        .collect();
    files.sort();
    files
}

fn is_marker(path: &Path, marker_name: &str) -> bool {
    path.file_name().is_some_and(|name| name == marker_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::immich::testing::{Call, FakeImmich, UnreachableImmich};
    use crate::scanner::DEFAULT_MARKER_NAME;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    fn spec_at(dir: &Path, recursive: bool) -> AlbumSpec {
        AlbumSpec {
            recursive,
            ..AlbumSpec::with_defaults(dir, dir.file_name().unwrap().to_string_lossy())
        }
    }

    /// Fixture: Italy/ with a marker, a direct photo, and a nested Rome/
    /// marker subtree with its own photo.
    fn italy_fixture(tmp: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
        let italy = tmp.path().join("Italy");
        let rome = italy.join("Rome");
        let coast = italy.join("Coast");
        fs::create_dir_all(&rome).unwrap();
        fs::create_dir_all(&coast).unwrap();
        touch(&italy.join(DEFAULT_MARKER_NAME));
        touch(&rome.join(DEFAULT_MARKER_NAME));
        let direct = italy.join("duomo.jpg");
        let nested = coast.join("cinque-terre.jpg");
        let roman = rome.join("colosseum.jpg");
        touch(&direct);
        touch(&nested);
        touch(&roman);
        (direct, nested, roman)
    }

    #[tokio::test]
    async fn direct_files_resolve_to_asset_ids() {
        let tmp = TempDir::new().unwrap();
        let (direct, nested, _) = italy_fixture(&tmp);
        let fake = FakeImmich::new()
            .with_asset(&direct, "asset-1")
            .with_asset(&nested, "asset-2");

        let spec = spec_at(&tmp.path().join("Italy"), false);
        let assets = resolve_assets(&spec, DEFAULT_MARKER_NAME, &fake)
            .await
            .unwrap();
        assert_eq!(assets, BTreeSet::from(["asset-1".to_string()]));
    }

    #[tokio::test]
    async fn recursive_resolution_includes_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let (direct, nested, _) = italy_fixture(&tmp);
        let fake = FakeImmich::new()
            .with_asset(&direct, "asset-1")
            .with_asset(&nested, "asset-2");

        let spec = spec_at(&tmp.path().join("Italy"), true);
        let assets = resolve_assets(&spec, DEFAULT_MARKER_NAME, &fake)
            .await
            .unwrap();
        assert_eq!(
            assets,
            BTreeSet::from(["asset-1".to_string(), "asset-2".to_string()])
        );
    }

    #[tokio::test]
    async fn nested_marker_subtrees_are_excluded() {
        let tmp = TempDir::new().unwrap();
        let (direct, nested, roman) = italy_fixture(&tmp);
        let fake = FakeImmich::new()
            .with_asset(&direct, "asset-1")
            .with_asset(&nested, "asset-2")
            .with_asset(&roman, "asset-3");

        let spec = spec_at(&tmp.path().join("Italy"), true);
        let assets = resolve_assets(&spec, DEFAULT_MARKER_NAME, &fake)
            .await
            .unwrap();
        // Rome's subtree belongs to Rome's own specification.
        assert!(!assets.contains("asset-3"));
        assert_eq!(assets.len(), 2);

        // And Rome resolves its own file.
        let rome_spec = spec_at(&tmp.path().join("Italy/Rome"), true);
        let rome_assets = resolve_assets(&rome_spec, DEFAULT_MARKER_NAME, &fake)
            .await
            .unwrap();
        assert_eq!(rome_assets, BTreeSet::from(["asset-3".to_string()]));
    }

    #[tokio::test]
    async fn unindexed_files_are_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let (direct, _, _) = italy_fixture(&tmp);
        // Only the direct file is known to the server.
        let fake = FakeImmich::new().with_asset(&direct, "asset-1");

        let spec = spec_at(&tmp.path().join("Italy"), true);
        let assets = resolve_assets(&spec, DEFAULT_MARKER_NAME, &fake)
            .await
            .unwrap();
        assert_eq!(assets, BTreeSet::from(["asset-1".to_string()]));
    }

    #[tokio::test]
    async fn marker_file_is_never_looked_up() {
        let tmp = TempDir::new().unwrap();
        italy_fixture(&tmp);
        let fake = FakeImmich::new();

        let spec = spec_at(&tmp.path().join("Italy"), true);
        resolve_assets(&spec, DEFAULT_MARKER_NAME, &fake)
            .await
            .unwrap();
        for call in fake.calls() {
            if let Call::FindAsset(path) = call {
                assert_ne!(path.file_name().unwrap(), DEFAULT_MARKER_NAME);
            }
        }
    }

    #[tokio::test]
    async fn empty_directory_resolves_to_empty_set() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Empty");
        fs::create_dir_all(&dir).unwrap();
        touch(&dir.join(DEFAULT_MARKER_NAME));

        let spec = spec_at(&dir, true);
        let assets = resolve_assets(&spec, DEFAULT_MARKER_NAME, &FakeImmich::new())
            .await
            .unwrap();
        assert!(assets.is_empty());
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        let tmp = TempDir::new().unwrap();
        italy_fixture(&tmp);

        let spec = spec_at(&tmp.path().join("Italy"), true);
        let err = resolve_assets(&spec, DEFAULT_MARKER_NAME, &UnreachableImmich)
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::Lookup { .. }));
    }
}
