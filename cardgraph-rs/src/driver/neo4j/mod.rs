//! Neo4j graph driver implementation.
//!
//! Uses `neo4rs` 0.8 for async, pooled Bolt connections. Every statement is
//! parameterized; no caller-supplied value is spliced into query text.

use neo4rs::{query, BoltNull, BoltType, ConfigBuilder, Graph, Query};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::driver::{CardWrite, GraphDriver, TopCardsQuery};
use crate::errors::{CardGraphError, Result};
use crate::report::{ReportCard, NO_IMAGE};
use crate::types::CardGraphConfig;

const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE CONSTRAINT card_id IF NOT EXISTS FOR (c:Card) REQUIRE c.id IS UNIQUE",
    "CREATE CONSTRAINT set_code IF NOT EXISTS FOR (s:Set) REQUIRE s.code IS UNIQUE",
    "CREATE CONSTRAINT type_name IF NOT EXISTS FOR (t:Type) REQUIRE t.name IS UNIQUE",
    "CREATE CONSTRAINT color_name IF NOT EXISTS FOR (c:Color) REQUIRE c.name IS UNIQUE",
];

const UPSERT_CARD: &str = "
    MERGE (c:Card {id: $id})
    SET c.name = $name, c.mana_cost = $mana_cost, c.cmc = $cmc,
        c.oracle_text = $oracle_text, c.rarity = $rarity, c.image = $image";

const UPSERT_SET: &str = "
    MERGE (s:Set {code: $set})
    SET s.name = $set_name
    WITH s
    MATCH (c:Card {id: $id})
    MERGE (c)-[:IN_SET]->(s)";

const UPSERT_TYPE: &str = "
    MERGE (tp:Type {name: $type})
    WITH tp
    MATCH (c:Card {id: $id})
    MERGE (c)-[:HAS_TYPE]->(tp)";

const UPSERT_COLOR: &str = "
    MERGE (col:Color {name: $color})
    WITH col
    MATCH (c:Card {id: $id})
    MERGE (c)-[:HAS_COLOR]->(col)";

const TOP_CARDS: &str = "
    MATCH (c:Card)-[:IN_SET]->(s:Set)
    WHERE s.code IN $codes
    RETURN c.name AS name, c.cmc AS cmc, c.rarity AS rarity,
           c.oracle_text AS text, c.image AS image
    ORDER BY c.cmc DESC
    LIMIT $limit";

/// A numeric property as it comes back over Bolt.
///
/// Integers written by other tools arrive as Bolt integers; the seeder writes
/// floats. Both are read as `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BoltNumber {
    Integer(i64),
    Float(f64),
}

impl BoltNumber {
    pub fn as_f64(self) -> f64 {
        match self {
            BoltNumber::Integer(i) => i as f64,
            BoltNumber::Float(f) => f,
        }
    }
}

/// Neo4j-backed [`GraphDriver`].
///
/// The pool is held until [`GraphDriver::close`] is called; any call after
/// that fails with [`CardGraphError::Driver`].
pub struct Neo4jDriver {
    graph: Mutex<Option<Graph>>,
}

impl Neo4jDriver {
    /// Connect using the URI, credentials and database from `config`.
    pub async fn connect(config: &CardGraphConfig) -> Result<Self> {
        let mut builder = ConfigBuilder::default()
            .uri(config.neo4j_uri.as_str())
            .user(config.neo4j_user.as_str())
            .password(config.neo4j_password.as_str());
        if let Some(db) = &config.neo4j_database {
            builder = builder.db(db.as_str());
        }

        let graph = Graph::connect(builder.build()?).await?;
        info!(uri = %config.neo4j_uri, "connected to Neo4j");

        Ok(Self {
            graph: Mutex::new(Some(graph)),
        })
    }

    async fn graph(&self) -> Result<Graph> {
        self.graph
            .lock()
            .await
            .clone()
            .ok_or_else(|| CardGraphError::Driver("connection already closed".to_string()))
    }

    fn card_statements(write: &CardWrite) -> Vec<Query> {
        let card = &write.card;
        let image = match &card.image {
            Some(url) => BoltType::from(url.as_str()),
            None => BoltType::Null(BoltNull),
        };

        let mut statements = vec![query(UPSERT_CARD)
            .param("id", card.id.as_str())
            .param("name", card.name.as_str())
            .param("mana_cost", card.mana_cost.as_str())
            .param("cmc", card.cmc)
            .param("oracle_text", card.oracle_text.as_str())
            .param("rarity", card.rarity.as_str())
            .param("image", image)];

        if let Some(set) = &write.set {
            statements.push(
                query(UPSERT_SET)
                    .param("set", set.code.as_str())
                    .param("set_name", set.name.as_str())
                    .param("id", card.id.as_str()),
            );
        }

        for tp in &write.types {
            statements.push(
                query(UPSERT_TYPE)
                    .param("type", tp.name.as_str())
                    .param("id", card.id.as_str()),
            );
        }

        for color in &write.colors {
            statements.push(
                query(UPSERT_COLOR)
                    .param("color", color.name.as_str())
                    .param("id", card.id.as_str()),
            );
        }

        statements
    }
}

impl GraphDriver for Neo4jDriver {
    async fn ping(&self) -> Result<()> {
        self.graph().await?.run(query("RETURN 1")).await?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        let graph = self.graph().await?;
        for statement in SCHEMA_STATEMENTS {
            graph.run(query(statement)).await?;
        }
        info!(statements = SCHEMA_STATEMENTS.len(), "Neo4j schema ensured");
        Ok(())
    }

    async fn write_card(&self, write: &CardWrite) -> Result<()> {
        let graph = self.graph().await?;
        let mut txn = graph.start_txn().await?;

        for statement in Self::card_statements(write) {
            if let Err(e) = txn.run(statement).await {
                warn!(card = %write.card.id, error = %e, "rolling back card write");
                if let Err(rb) = txn.rollback().await {
                    warn!(card = %write.card.id, error = %rb, "rollback failed");
                }
                return Err(e.into());
            }
        }

        txn.commit().await?;
        debug!(card = %write.card.id, "card committed");
        Ok(())
    }

    async fn top_cards(&self, query_params: &TopCardsQuery) -> Result<Vec<ReportCard>> {
        let limit = i64::try_from(query_params.limit).unwrap_or(i64::MAX);
        let q = query(TOP_CARDS)
            .param("codes", query_params.set_codes.clone())
            .param("limit", limit);

        let mut rows = self.graph().await?.execute(q).await?;
        let mut cards = Vec::new();
        while let Some(row) = rows.next().await? {
            cards.push(ReportCard {
                name: row.get::<Option<String>>("name")?.unwrap_or_default(),
                cmc: row
                    .get::<Option<BoltNumber>>("cmc")?
                    .map(BoltNumber::as_f64)
                    .unwrap_or(0.0),
                rarity: row.get::<Option<String>>("rarity")?.unwrap_or_default(),
                text: row.get::<Option<String>>("text")?.unwrap_or_default(),
                image: row
                    .get::<Option<String>>("image")?
                    .unwrap_or_else(|| NO_IMAGE.to_string()),
            });
        }

        debug!(rows = cards.len(), "top cards fetched");
        Ok(cards)
    }

    async fn close(&self) -> Result<()> {
        if self.graph.lock().await.take().is_some() {
            info!("Neo4j connection closed");
        }
        Ok(())
    }
}
