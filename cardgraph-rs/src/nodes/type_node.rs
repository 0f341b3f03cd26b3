//! TypeNode: a single type token taken from a card's type line.

use serde::{Deserialize, Serialize};

/// A `Type` node, keyed by name (e.g. `Creature`, `Legendary`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeNode {
    pub name: String,
}

impl TypeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
