//! SetNode: a card set, keyed by its short code.

use serde::{Deserialize, Serialize};

/// A `Set` node. The display name is overwritten on every upsert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetNode {
    pub code: String,
    pub name: String,
}
