//! Card catalog source.
//!
//! Defines the [`CardSource`] trait the seeding pipeline reads from, the
//! [`CatalogCard`] record shape, and the Scryfall-compatible HTTP client.

pub mod scryfall;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

pub use scryfall::ScryfallClient;

/// Image URLs published for a card; only `normal` is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    pub normal: Option<String>,
    pub small: Option<String>,
}

/// One card record as returned by the catalog search endpoint.
///
/// Only `id` is mandatory. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCard {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub mana_cost: Option<String>,
    pub cmc: Option<f64>,
    pub oracle_text: Option<String>,
    pub rarity: Option<String>,
    /// Set code (e.g. `khm`).
    pub set: Option<String>,
    pub set_name: Option<String>,
    pub image_uris: Option<ImageUris>,
    /// e.g. `"Creature — Human Warrior"`.
    pub type_line: Option<String>,
    pub colors: Option<Vec<String>>,
}

/// Trait for catalogs that can list the cards of one set.
#[allow(async_fn_in_trait)]
pub trait CardSource: Send + Sync {
    /// Fetch the first result page of cards in `set_code`.
    ///
    /// A response without a `data` field yields an empty list, not an error.
    async fn fetch_set(&self, set_code: &str) -> Result<Vec<CatalogCard>>;
}
