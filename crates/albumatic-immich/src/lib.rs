#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod models;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultImmichClient, ImmichClient};

// Configuration
pub use config::ImmichClientConfig;

// Errors (for callers constructing the client directly)
pub use error::ImmichError;
