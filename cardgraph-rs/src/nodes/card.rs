//! CardNode: one printed card, keyed by its catalog identifier.

use serde::{Deserialize, Serialize};

use crate::source::CatalogCard;

/// Scalar properties of a `Card` node.
///
/// Missing optional catalog fields are stored as `""` (text) or `0.0` (cmc);
/// a missing image stays `None` and is written as a null property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardNode {
    pub id: String,
    pub name: String,
    pub mana_cost: String,
    pub cmc: f64,
    pub oracle_text: String,
    pub rarity: String,
    pub image: Option<String>,
}

impl From<&CatalogCard> for CardNode {
    fn from(card: &CatalogCard) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            mana_cost: card.mana_cost.clone().unwrap_or_default(),
            cmc: card.cmc.unwrap_or(0.0),
            oracle_text: card.oracle_text.clone().unwrap_or_default(),
            rarity: card.rarity.clone().unwrap_or_default(),
            image: card
                .image_uris
                .as_ref()
                .and_then(|uris| uris.normal.clone()),
        }
    }
}
