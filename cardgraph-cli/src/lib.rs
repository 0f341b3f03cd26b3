//! Shared plumbing for the `mtg-seed` and `mtg-report` binaries.

pub mod config;
pub mod telemetry;
