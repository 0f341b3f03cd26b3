//! Seeding pipeline: catalog page → graph upserts.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::driver::{CardWrite, GraphDriver};
use crate::errors::Result;
use crate::nodes::{CardNode, ColorNode, SetNode, TypeNode};
use crate::source::{CardSource, CatalogCard};
use crate::utils::split_type_line;

/// Writes catalog records into the graph, one record per driver call.
pub struct GraphWriter<'a, D> {
    driver: &'a D,
}

impl<'a, D: GraphDriver> GraphWriter<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    /// Build the upserts for one record.
    ///
    /// - The set is linked only when the record has a non-empty set code.
    /// - Types come from the type line before its em-dash.
    /// - One color link per entry in `colors`.
    pub fn plan(card: &CatalogCard) -> CardWrite {
        let set = card
            .set
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(|code| SetNode {
                code: code.to_string(),
                name: card.set_name.clone().unwrap_or_default(),
            });

        let types = card
            .type_line
            .as_deref()
            .map(split_type_line)
            .unwrap_or_default()
            .into_iter()
            .map(TypeNode::new)
            .collect();

        let colors = card
            .colors
            .iter()
            .flatten()
            .map(ColorNode::new)
            .collect();

        CardWrite {
            card: CardNode::from(card),
            set,
            types,
            colors,
        }
    }

    pub async fn write(&self, card: &CatalogCard) -> Result<()> {
        let write = Self::plan(card);
        debug!(
            card = %write.card.id,
            types = write.types.len(),
            colors = write.colors.len(),
            "writing card"
        );
        self.driver.write_card(&write).await
    }
}

/// Outcome of one seeding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub set_code: String,
    /// Records returned by the catalog.
    pub fetched: usize,
    /// Records written to the graph.
    pub written: usize,
}

/// Fetches one set from a [`CardSource`] and upserts every record.
pub struct SeedPipeline<'a, S, D> {
    source: &'a S,
    driver: &'a D,
}

impl<'a, S: CardSource, D: GraphDriver> SeedPipeline<'a, S, D> {
    pub fn new(source: &'a S, driver: &'a D) -> Self {
        Self { source, driver }
    }

    /// Seed `set_code`, then close the driver whatever the outcome.
    ///
    /// Catalog failures are logged and treated as an empty page. Store
    /// failures abort the run at the failing record; records written before
    /// it stay written.
    pub async fn run(&self, set_code: &str) -> Result<SeedSummary> {
        let outcome = self.seed(set_code).await;
        let closed = self.driver.close().await;
        let summary = outcome?;
        closed?;
        Ok(summary)
    }

    async fn seed(&self, set_code: &str) -> Result<SeedSummary> {
        self.driver.ping().await?;
        self.driver.ensure_schema().await?;

        let cards = match self.source.fetch_set(set_code).await {
            Ok(cards) => cards,
            Err(e) if e.is_recoverable() => {
                warn!(set = set_code, error = %e, "catalog unavailable, seeding nothing");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let writer = GraphWriter::new(self.driver);
        let mut written = 0;
        for card in &cards {
            writer.write(card).await?;
            written += 1;
        }

        info!(set = set_code, fetched = cards.len(), written, "Seed complete");
        Ok(SeedSummary {
            set_code: set_code.to_string(),
            fetched: cards.len(),
            written,
        })
    }
}
