//! # cardgraph-rs
//!
//! Loads trading-card data from a public catalog API into Neo4j and prints a
//! PDF report of the highest-cost cards in a chosen group of sets.
//!
//! ## Architecture
//!
//! - **Seeding**: [`source::CardSource`] fetches one page of a set; each record
//!   becomes a `Card` node linked to shared `Set`, `Type` and `Color` nodes.
//! - **Reporting**: [`driver::GraphDriver::top_cards`] reads a bounded,
//!   cmc-ordered slice; [`report::render_html`] renders it; a
//!   [`report::DocumentExporter`] prints it to A4 PDF.
//! - **Storage**: Neo4j over Bolt, or an in-memory graph with the same
//!   upsert semantics.

pub mod edges;
pub mod errors;
pub mod nodes;
pub mod types;

pub mod driver;
pub mod source;

pub mod report;

pub mod pipeline;
pub mod utils;

pub use errors::{CardGraphError, Result};
pub use types::CardGraphConfig;
