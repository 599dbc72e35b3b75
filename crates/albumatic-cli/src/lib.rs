//! CLI wiring for albumatic.
//!
//! `main.rs` is the composition root; everything reusable (argument
//! definitions, bootstrap, report rendering) lives here so it can be unit
//! tested.

pub mod bootstrap;
pub mod parser;
pub mod report;

pub use bootstrap::{CliContext, bootstrap};
pub use parser::Cli;
