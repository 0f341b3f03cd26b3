//! Relationship types for the card graph.
//!
//! All relationships are directed from a `Card` and carry no properties:
//! - `IN_SET` (Card → Set)
//! - `HAS_TYPE` (Card → Type), one per type token
//! - `HAS_COLOR` (Card → Color), one per color

use serde::{Deserialize, Serialize};

/// The three relationship types a card can have.
///
/// Serializes as the Cypher relationship type (`IN_SET`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    InSet,
    HasType,
    HasColor,
}

/// A relationship from a card to a shared node, identified by that node's key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Relationship {
    pub card_id: String,
    pub kind: RelationshipKind,
    /// `Set.code`, `Type.name` or `Color.name`.
    pub target: String,
}
