//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types; the
//! reqwest-backed implementation lives in `albumatic-immich`.

pub mod immich;

pub use immich::{AlbumSummary, ImmichClientPort, ImmichPortError, ImmichPortResult};
