//! In-memory graph driver.
//!
//! Keeps nodes in ordered maps keyed exactly as the Neo4j constraints are,
//! so repeated writes merge instead of duplicating. Used by tests and for
//! dry runs of the pipelines.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Mutex;

use crate::driver::{CardWrite, GraphDriver, TopCardsQuery};
use crate::edges::{Relationship, RelationshipKind};
use crate::errors::{CardGraphError, Result};
use crate::nodes::{CardNode, SetNode};
use crate::report::{ReportCard, NO_IMAGE};

/// Complete contents of an [`InMemoryDriver`], comparable across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    pub cards: BTreeMap<String, CardNode>,
    pub sets: BTreeMap<String, SetNode>,
    pub types: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub relationships: BTreeSet<Relationship>,
}

impl GraphSnapshot {
    /// Relationships of `kind` leaving `card_id`, by target key.
    pub fn targets(&self, card_id: &str, kind: RelationshipKind) -> Vec<&str> {
        self.relationships
            .iter()
            .filter(|r| r.card_id == card_id && r.kind == kind)
            .map(|r| r.target.as_str())
            .collect()
    }
}

/// [`GraphDriver`] over a process-local graph.
///
/// There is no connection to release: `close` only counts calls, and the
/// graph stays usable so several pipeline runs can share one store.
#[derive(Default)]
pub struct InMemoryDriver {
    state: Mutex<GraphSnapshot>,
    failing_card: Option<String>,
    closes: AtomicUsize,
}

impl InMemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `write_card` fail for the card with this id, leaving the graph
    /// untouched for that record.
    pub fn failing_on(mut self, card_id: impl Into<String>) -> Self {
        self.failing_card = Some(card_id.into());
        self
    }

    /// Copy of the current graph.
    pub async fn snapshot(&self) -> GraphSnapshot {
        self.state.lock().await.clone()
    }

    /// How many times [`GraphDriver::close`] has been called.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl GraphDriver for InMemoryDriver {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn write_card(&self, write: &CardWrite) -> Result<()> {
        if self.failing_card.as_deref() == Some(write.card.id.as_str()) {
            return Err(CardGraphError::Driver(format!(
                "write rejected for card {}",
                write.card.id
            )));
        }

        let mut state = self.state.lock().await;
        state.cards.insert(write.card.id.clone(), write.card.clone());
        if let Some(set) = &write.set {
            state.sets.insert(set.code.clone(), set.clone());
        }
        for tp in &write.types {
            state.types.insert(tp.name.clone());
        }
        for color in &write.colors {
            state.colors.insert(color.name.clone());
        }
        state.relationships.extend(write.relationships());
        Ok(())
    }

    async fn top_cards(&self, query: &TopCardsQuery) -> Result<Vec<ReportCard>> {
        let state = self.state.lock().await;

        // One row per matching (card, set) pair, as the MATCH pattern yields.
        let mut rows: Vec<&CardNode> = state
            .relationships
            .iter()
            .filter(|r| r.kind == RelationshipKind::InSet && query.set_codes.contains(&r.target))
            .filter_map(|r| state.cards.get(&r.card_id))
            .collect();

        rows.sort_by(|a, b| b.cmc.total_cmp(&a.cmc));
        rows.truncate(query.limit);

        Ok(rows
            .into_iter()
            .map(|card| ReportCard {
                name: card.name.clone(),
                cmc: card.cmc,
                rarity: card.rarity.clone(),
                text: card.oracle_text.clone(),
                image: card.image.clone().unwrap_or_else(|| NO_IMAGE.to_string()),
            })
            .collect())
    }

    async fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
