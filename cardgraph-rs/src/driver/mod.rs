//! Graph database driver abstraction.
//!
//! Defines the [`GraphDriver`] trait both pipelines talk to, plus the Neo4j
//! implementation and an in-memory implementation with the same upsert
//! semantics.

pub mod memory;
pub mod neo4j;

use serde::{Deserialize, Serialize};

use crate::edges::{Relationship, RelationshipKind};
use crate::errors::Result;
use crate::nodes::{CardNode, ColorNode, SetNode, TypeNode};
use crate::report::ReportCard;
use crate::types::DEFAULT_REPORT_LIMIT;

pub use memory::InMemoryDriver;
pub use neo4j::Neo4jDriver;

/// Everything written for one catalog record.
///
/// Applied as a single unit: the card upsert first, then the set, type and
/// color upserts together with their relationships from the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardWrite {
    pub card: CardNode,
    pub set: Option<SetNode>,
    pub types: Vec<TypeNode>,
    pub colors: Vec<ColorNode>,
}

impl CardWrite {
    /// Relationships this write ensures exist, in write order.
    pub fn relationships(&self) -> Vec<Relationship> {
        let id = &self.card.id;
        let set = self.set.iter().map(|s| (RelationshipKind::InSet, s.code.clone()));
        let types = self.types.iter().map(|t| (RelationshipKind::HasType, t.name.clone()));
        let colors = self.colors.iter().map(|c| (RelationshipKind::HasColor, c.name.clone()));

        set.chain(types)
            .chain(colors)
            .map(|(kind, target)| Relationship {
                card_id: id.clone(),
                kind,
                target,
            })
            .collect()
    }
}

/// Parameters of the report query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCardsQuery {
    /// Cards must be `IN_SET` a set whose code is in this list.
    pub set_codes: Vec<String>,
    /// Maximum number of rows returned.
    pub limit: usize,
}

impl TopCardsQuery {
    pub fn new(set_codes: Vec<String>) -> Self {
        Self {
            set_codes,
            limit: DEFAULT_REPORT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Trait representing a graph database backend.
///
/// Calls are issued one at a time; implementations need not support
/// concurrent use of a single handle.
#[allow(async_fn_in_trait)]
pub trait GraphDriver: Send + Sync {
    /// Round-trip a trivial query to confirm the database is reachable.
    async fn ping(&self) -> Result<()>;

    /// Create the uniqueness constraints backing the upsert keys. Idempotent.
    async fn ensure_schema(&self) -> Result<()>;

    /// Upsert one card with its set, types, colors and relationships.
    ///
    /// All-or-nothing: on error no part of the record is persisted.
    async fn write_card(&self, write: &CardWrite) -> Result<()>;

    /// Cards in any of `query.set_codes`, ordered by cmc descending, at most
    /// `query.limit` rows.
    async fn top_cards(&self, query: &TopCardsQuery) -> Result<Vec<ReportCard>>;

    /// Release the connection pool / session.
    async fn close(&self) -> Result<()>;
}
