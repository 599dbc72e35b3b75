//! Marker scanner: walks the library tree and produces album specifications.
//!
//! A directory becomes an [`AlbumSpec`] iff it contains a file whose name
//! matches the configured marker filename exactly (case-sensitive). The
//! marker's optional YAML content customizes name, description and recursion.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::AlbumSpec;

/// Default marker filename.
pub const DEFAULT_MARKER_NAME: &str = ".album";

/// Fatal scan failures. Anything below the root (unreadable subdirectory,
/// malformed marker) is reported and skipped rather than raised.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The library root does not exist or is not a directory.
    #[error("library root '{path}' is not an accessible directory")]
    RootInaccessible {
        /// The configured library root
        path: PathBuf,
    },
}

/// A marker directory that was skipped, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedMarker {
    /// Directory containing the offending marker
    pub source_path: PathBuf,
    /// Human-readable reason, surfaced in the run report
    pub reason: String,
}

/// Result of a scan: specifications in lexical path order, plus the marker
/// directories that could not be turned into specifications.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// One specification per marker-bearing directory
    pub specs: Vec<AlbumSpec>,
    /// Directories whose marker content was malformed or unreadable
    pub skipped: Vec<SkippedMarker>,
}

/// Optional structured content of a marker file.
///
/// All three keys are optional and strictly typed; unknown keys are
/// tolerated. An empty (or all-comment) marker file means all defaults.
#[derive(Debug, Default, Deserialize)]
struct MarkerFile {
    name: Option<String>,
    description: Option<String>,
    #[serde(default, deserialize_with = "de_opt_bool")]
    recursive: Option<bool>,
}

/// Accept YAML 1.1 style booleans (`yes`/`no`/`on`/`off`) in addition to the
/// 1.2 core-schema `true`/`false`, and reject everything else explicitly
/// rather than coercing.
fn de_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    let value: Option<BoolOrString> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Text(s)) => match s.to_ascii_lowercase().as_str() {
            "yes" | "on" | "true" => Ok(Some(true)),
            "no" | "off" | "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "'recursive' must be a boolean, got '{other}'"
            ))),
        },
    }
}

/// Walk the tree rooted at `root` and collect one [`AlbumSpec`] per
/// directory containing a file named `marker_name`.
///
/// Symlinks are not followed. Specifications are returned in lexical order
/// of their source path so that repeated runs (and dry-run output) are
/// reproducible.
///
/// # Errors
///
/// Only an inaccessible root is fatal; unreadable subtrees are logged and
/// skipped, malformed markers land in [`ScanReport::skipped`].
pub fn scan(root: &Path, marker_name: &str) -> Result<ScanReport, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootInaccessible {
            path: root.to_path_buf(),
        });
    }

    let mut report = ScanReport::default();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let marker_path = dir.join(marker_name);
        if !marker_path.is_file() {
            continue;
        }

        let raw_name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match read_marker(&marker_path) {
            Ok(marker) => {
                debug!("found album marker in {}", dir.display());
                report.specs.push(AlbumSpec {
                    source_path: dir.to_path_buf(),
                    raw_name,
                    override_name: marker.name,
                    description: marker.description.unwrap_or_default(),
                    recursive: marker.recursive.unwrap_or(true),
                });
            }
            Err(reason) => {
                warn!("skipping marker in {}: {reason}", dir.display());
                report.skipped.push(SkippedMarker {
                    source_path: dir.to_path_buf(),
                    reason,
                });
            }
        }
    }

    // walkdir's sorted DFS already yields a stable order; sorting by full
    // path pins down the documented lexical contract regardless.
    report.specs.sort_by(|a, b| a.source_path.cmp(&b.source_path));
    Ok(report)
}

fn read_marker(marker_path: &Path) -> Result<MarkerFile, String> {
    let content = fs::read_to_string(marker_path)
        .map_err(|err| format!("failed to read marker file: {err}"))?;

    // An empty document parses as YAML null, which maps to `None` here.
    let parsed: Option<MarkerFile> = serde_yaml::from_str(&content)
        .map_err(|err| format!("malformed marker content: {err}"))?;
    Ok(parsed.unwrap_or_default())
}
