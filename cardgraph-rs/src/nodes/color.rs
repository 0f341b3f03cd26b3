//! ColorNode: one of the catalog's color symbols (`W`, `U`, `B`, `R`, `G`).

use serde::{Deserialize, Serialize};

/// A `Color` node, keyed by its symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColorNode {
    pub name: String,
}

impl ColorNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
