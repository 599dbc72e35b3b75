//! Per-run outcome reporting types.
//!
//! The reconciler never aborts on a single specification; instead every
//! specification ends up as exactly one [`SpecReport`] inside the
//! [`RunReport`], in scan order.

use std::path::PathBuf;

/// What the reconciler decided (or managed) to do for one specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecOutcome {
    /// Album was created and its full asset set added.
    Created {
        /// Number of assets added to the new album
        assets_added: usize,
    },
    /// Album existed; the missing assets were added.
    AssetsAdded {
        /// Number of assets added
        added: usize,
    },
    /// Album already matched the filesystem.
    NoChange,
    /// Dry-run: the album would be created with this many assets.
    WouldCreate {
        /// Size of the resolved asset set
        asset_count: usize,
    },
    /// Dry-run: this many assets would be added to the existing album.
    WouldAddAssets {
        /// Size of the delta
        delta: usize,
    },
    /// Another specification resolved to the same album name; neither was
    /// processed.
    NameCollision,
    /// The name pattern failed for this directory.
    NameFailed {
        /// Why resolution failed
        reason: String,
    },
    /// Asset lookup against the server failed (distinct from zero matches).
    AssetsFailed {
        /// Why resolution failed
        reason: String,
    },
    /// Creating the album failed.
    CreateFailed {
        /// Why the create call failed
        reason: String,
    },
    /// The single unchunked add-assets call failed.
    AddFailed {
        /// Why the add call failed
        reason: String,
    },
    /// A chunked add failed partway; earlier chunks remain applied.
    PartialAdd {
        /// Assets added before the failing chunk
        added: usize,
        /// Assets never attempted
        remaining: usize,
        /// Why the failing chunk failed
        reason: String,
    },
}

impl SpecOutcome {
    /// Whether this outcome represents a failure for the specification.
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NameCollision
                | Self::NameFailed { .. }
                | Self::AssetsFailed { .. }
                | Self::CreateFailed { .. }
                | Self::AddFailed { .. }
                | Self::PartialAdd { .. }
        )
    }
}

/// Outcome for one album specification.
#[derive(Debug, Clone)]
pub struct SpecReport {
    /// Directory the specification came from
    pub source_path: PathBuf,
    /// Resolved album name, or the raw directory name when resolution failed
    pub album_name: String,
    /// What happened
    pub outcome: SpecOutcome,
}

/// Aggregated outcomes for a whole run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Albums deleted during the purge phase
    pub albums_deleted: usize,
    /// One entry per specification, in scan order
    pub reports: Vec<SpecReport>,
}

impl RunReport {
    /// Number of specifications that ended in a failure outcome.
    pub fn failures(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome.is_failure())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_classification() {
        assert!(!SpecOutcome::NoChange.is_failure());
        assert!(!SpecOutcome::Created { assets_added: 3 }.is_failure());
        assert!(!SpecOutcome::WouldCreate { asset_count: 0 }.is_failure());
        assert!(SpecOutcome::NameCollision.is_failure());
        assert!(
            SpecOutcome::PartialAdd {
                added: 2,
                remaining: 3,
                reason: "500".to_string()
            }
            .is_failure()
        );
    }

    #[test]
    fn run_report_counts_failures() {
        let mut report = RunReport::default();
        report.reports.push(SpecReport {
            source_path: "/a".into(),
            album_name: "a".into(),
            outcome: SpecOutcome::NoChange,
        });
        report.reports.push(SpecReport {
            source_path: "/b".into(),
            album_name: "b".into(),
            outcome: SpecOutcome::AddFailed {
                reason: "boom".into(),
            },
        });
        assert_eq!(report.failures(), 1);
    }
}
