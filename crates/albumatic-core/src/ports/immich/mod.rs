//! Immich client port definitions.
//!
//! This module defines the port trait and DTOs for talking to an Immich
//! server. The actual HTTP implementation lives in `albumatic-immich`.

mod client;
mod error;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ImmichClientPort;
pub use error::{ImmichPortError, ImmichPortResult};
pub use types::AlbumSummary;
