//! Domain types shared across the crate.

use std::path::PathBuf;

/// Desired-state record for one marker-bearing directory.
///
/// Constructed once during tree traversal and never mutated afterwards.
/// Nothing is persisted between runs; every invocation rebuilds its
/// specifications from the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSpec {
    /// Path of the directory the marker was found in.
    pub source_path: PathBuf,
    /// The directory's base name.
    pub raw_name: String,
    /// Name override from the marker file; takes precedence over any pattern.
    pub override_name: Option<String>,
    /// Album description from the marker file.
    pub description: String,
    /// Whether subdirectories contribute assets.
    pub recursive: bool,
}

impl AlbumSpec {
    /// Create a specification with marker defaults (recursive, no override,
    /// empty description).
    pub fn with_defaults(source_path: impl Into<PathBuf>, raw_name: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            raw_name: raw_name.into(),
            override_name: None,
            description: String::new(),
            recursive: true,
        }
    }
}
