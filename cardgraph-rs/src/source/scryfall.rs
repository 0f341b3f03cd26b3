//! Scryfall-compatible catalog client.
//!
//! Issues one `GET {base}/cards/search?q=set:<code>` per call and consumes
//! only the first page of results. No retry.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::{CatalogError, Result};
use crate::source::{CardSource, CatalogCard};

/// Catalog client implementing [`CardSource`] over HTTP.
pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScryfallClient {
    /// Create a client against `base_url`, e.g. the configured catalog or a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cardgraph-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::from)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/cards/search", self.base_url)
    }
}

impl CardSource for ScryfallClient {
    async fn fetch_set(&self, set_code: &str) -> Result<Vec<CatalogCard>> {
        let url = self.search_url();
        let query = format!("set:{set_code}");
        debug!(%url, %query, "requesting catalog page");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("q", query.as_str())])
            .send()
            .await
            .map_err(CatalogError::from)?;

        let status = response.status();
        let mut body: Value = response.json().await.map_err(CatalogError::from)?;

        let data = body.get_mut("data").map(Value::take);
        let records = match data {
            Some(Value::Array(records)) => records,
            None | Some(Value::Null) => {
                let details = body.get("details").and_then(Value::as_str).unwrap_or("");
                warn!(
                    set = set_code,
                    status = status.as_u16(),
                    details,
                    "No cards returned"
                );
                return Ok(Vec::new());
            }
            Some(_) => {
                return Err(CatalogError::Decode("`data` is not a list".to_string()).into());
            }
        };

        let received = records.len();
        let cards: Vec<CatalogCard> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<CatalogCard>(record) {
                Ok(card) => Some(card),
                Err(e) => {
                    warn!(set = set_code, index, error = %e, "skipping malformed card record");
                    None
                }
            })
            .collect();

        if body.get("has_more").and_then(Value::as_bool).unwrap_or(false) {
            let total = body.get("total_cards").and_then(Value::as_u64).unwrap_or(0);
            warn!(
                set = set_code,
                fetched = received,
                total,
                "catalog result spans several pages; only the first page is used"
            );
        }

        info!(
            set = set_code,
            cards = cards.len(),
            skipped = received - cards.len(),
            "catalog page fetched"
        );
        Ok(cards)
    }
}
