//! Core domain for albumatic: marker scanning, album name resolution,
//! asset resolution, and the reconciliation engine.
//!
//! This crate contains everything that does not touch the network directly.
//! Remote access goes through the [`ports::ImmichClientPort`] trait; the
//! reqwest implementation lives in `albumatic-immich`.

#![deny(unused_crate_dependencies)]

pub mod assets;
pub mod domain;
pub mod name;
pub mod ports;
pub mod reconciler;
pub mod report;
pub mod scanner;

// Re-export commonly used types for convenience
pub use assets::AssetError;
pub use domain::AlbumSpec;
pub use name::{NameError, NamePattern, resolve_name};
pub use ports::{AlbumSummary, ImmichClientPort, ImmichPortError, ImmichPortResult};
pub use reconciler::{FatalError, Reconciler, RunOptions};
pub use report::{RunReport, SpecOutcome, SpecReport};
pub use scanner::{DEFAULT_MARKER_NAME, ScanError, ScanReport, SkippedMarker, scan};
