//! Seeding and reporting pipelines.
//!
//! Two independent, strictly sequential flows over the same [`GraphDriver`]:
//!
//! **Seed** ([`seed::SeedPipeline`])
//! 1. **Fetch**: one catalog page for a set code
//! 2. **Write**: per record, upsert the card and its set, types and colors
//!
//! **Report** ([`report::ReportPipeline`])
//! 1. **Read**: top cards of the configured sets, cmc descending, bounded
//! 2. **Render**: HTML document, written to disk
//! 3. **Export**: paginated A4 PDF
//!
//! Each pipeline releases the driver on both the success and failure path.
//!
//! [`GraphDriver`]: crate::driver::GraphDriver

pub mod report;
pub mod seed;

pub use report::{ReportPipeline, ReportSummary};
pub use seed::{GraphWriter, SeedPipeline, SeedSummary};
