//! Shared configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{CardGraphError, Result};

/// Default Bolt endpoint.
pub const DEFAULT_NEO4J_URI: &str = "bolt://localhost:7687";

/// Default catalog API base URL.
pub const DEFAULT_CATALOG_URL: &str = "https://api.scryfall.com";

/// Maximum number of cards a report lists.
pub const DEFAULT_REPORT_LIMIT: usize = 50;

fn validate_set_codes(codes: &[String]) -> std::result::Result<(), validator::ValidationError> {
    if codes.iter().any(|c| c.trim().is_empty()) {
        return Err(validator::ValidationError::new("set codes must not be blank"));
    }
    Ok(())
}

/// Central configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CardGraphConfig {
    /// Neo4j connection URI (e.g. `bolt://localhost:7687`).
    #[validate(length(min = 1))]
    pub neo4j_uri: String,

    /// Neo4j username.
    pub neo4j_user: String,

    /// Neo4j password.
    #[validate(length(min = 1))]
    pub neo4j_password: String,

    /// Database name; `None` uses the server default.
    pub neo4j_database: Option<String>,

    /// Catalog API base URL, without the `/cards/search` path.
    #[validate(length(min = 1))]
    pub catalog_url: String,

    /// Set code the seeder fetches.
    #[validate(length(min = 1))]
    pub seed_set: String,

    /// Set codes the report is filtered to.
    #[validate(length(min = 1), custom(function = "validate_set_codes"))]
    pub report_sets: Vec<String>,

    /// Upper bound on reported cards.
    #[validate(range(min = 1))]
    pub report_limit: usize,

    /// Where the rendered markup is written.
    pub html_path: PathBuf,

    /// Where the PDF is written.
    pub pdf_path: PathBuf,

    /// Explicit Chrome/Chromium executable; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
}

impl Default for CardGraphConfig {
    fn default() -> Self {
        Self {
            neo4j_uri: DEFAULT_NEO4J_URI.to_string(),
            neo4j_user: "neo4j".to_string(),
            neo4j_password: String::new(),
            neo4j_database: None,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            seed_set: "khm".to_string(),
            report_sets: vec!["ltr".to_string(), "tmt".to_string()],
            report_limit: DEFAULT_REPORT_LIMIT,
            html_path: PathBuf::from("report.html"),
            pdf_path: PathBuf::from("magic-report.pdf"),
            chrome_path: None,
        }
    }
}

impl CardGraphConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` first (non-fatal if `.env` is absent),
    /// then reads each variable from the process environment. `NEO4J_PASSWORD`
    /// is required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let neo4j_password = lookup("NEO4J_PASSWORD").ok_or_else(|| {
            CardGraphError::Validation("NEO4J_PASSWORD is required".to_string())
        })?;

        let report_limit = match lookup("REPORT_LIMIT") {
            Some(val) => val.trim().parse::<usize>().map_err(|_| {
                CardGraphError::Validation("REPORT_LIMIT must be a positive integer".to_string())
            })?,
            None => defaults.report_limit,
        };

        let report_sets = match lookup("REPORT_SETS") {
            Some(val) => parse_set_list(&val),
            None => defaults.report_sets,
        };

        let config = Self {
            neo4j_uri: lookup("NEO4J_URI").unwrap_or(defaults.neo4j_uri),
            neo4j_user: lookup("NEO4J_USER").unwrap_or(defaults.neo4j_user),
            neo4j_password,
            neo4j_database: lookup("NEO4J_DATABASE").filter(|db| !db.is_empty()),
            catalog_url: lookup("CATALOG_URL").unwrap_or(defaults.catalog_url),
            seed_set: lookup("SEED_SET").unwrap_or(defaults.seed_set),
            report_sets,
            report_limit,
            html_path: lookup("REPORT_HTML_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.html_path),
            pdf_path: lookup("REPORT_PDF_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.pdf_path),
            chrome_path: lookup("CHROME_PATH").map(PathBuf::from),
        };

        config.check()?;
        Ok(config)
    }

    /// Run field validation, mapping failures to [`CardGraphError::Validation`].
    ///
    /// Call again after applying command-line overrides.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| CardGraphError::Validation(e.to_string()))
    }
}

/// Split a comma-separated set list, dropping blanks and lowercasing codes.
pub fn parse_set_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|code| code.trim().to_lowercase())
        .filter(|code| !code.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = CardGraphConfig::from_lookup(lookup_from(&[("NEO4J_PASSWORD", "secret")]))
            .expect("config should load");
        assert_eq!(config.neo4j_uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j_user, "neo4j");
        assert_eq!(config.neo4j_password, "secret");
        assert!(config.neo4j_database.is_none());
        assert_eq!(config.catalog_url, "https://api.scryfall.com");
        assert_eq!(config.seed_set, "khm");
        assert_eq!(config.report_sets, vec!["ltr", "tmt"]);
        assert_eq!(config.report_limit, 50);
        assert_eq!(config.html_path, PathBuf::from("report.html"));
        assert_eq!(config.pdf_path, PathBuf::from("magic-report.pdf"));
        assert!(config.chrome_path.is_none());
    }

    #[test]
    fn test_config_custom_values() {
        let config = CardGraphConfig::from_lookup(lookup_from(&[
            ("NEO4J_URI", "bolt://db.example.com:7687"),
            ("NEO4J_USER", "admin"),
            ("NEO4J_PASSWORD", "mysecret"),
            ("NEO4J_DATABASE", "cards"),
            ("CATALOG_URL", "http://127.0.0.1:9000"),
            ("SEED_SET", "neo"),
            ("REPORT_SETS", "NEO, dmu ,,"),
            ("REPORT_LIMIT", "10"),
            ("REPORT_HTML_PATH", "/tmp/out.html"),
            ("REPORT_PDF_PATH", "/tmp/out.pdf"),
            ("CHROME_PATH", "/usr/bin/chromium"),
        ]))
        .expect("config should load");
        assert_eq!(config.neo4j_uri, "bolt://db.example.com:7687");
        assert_eq!(config.neo4j_user, "admin");
        assert_eq!(config.neo4j_database.as_deref(), Some("cards"));
        assert_eq!(config.catalog_url, "http://127.0.0.1:9000");
        assert_eq!(config.seed_set, "neo");
        assert_eq!(config.report_sets, vec!["neo", "dmu"]);
        assert_eq!(config.report_limit, 10);
        assert_eq!(config.html_path, PathBuf::from("/tmp/out.html"));
        assert_eq!(config.pdf_path, PathBuf::from("/tmp/out.pdf"));
        assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn test_config_missing_password() {
        let result = CardGraphConfig::from_lookup(lookup_from(&[]));
        match result.unwrap_err() {
            CardGraphError::Validation(msg) => assert!(msg.contains("NEO4J_PASSWORD")),
            e => panic!("expected Validation error, got {:?}", e),
        }
    }

    #[test]
    fn test_config_empty_password_rejected() {
        let result = CardGraphConfig::from_lookup(lookup_from(&[("NEO4J_PASSWORD", "")]));
        assert!(matches!(result, Err(CardGraphError::Validation(_))));
    }

    #[test]
    fn test_config_invalid_limit() {
        let result = CardGraphConfig::from_lookup(lookup_from(&[
            ("NEO4J_PASSWORD", "secret"),
            ("REPORT_LIMIT", "many"),
        ]));
        match result.unwrap_err() {
            CardGraphError::Validation(msg) => assert!(msg.contains("REPORT_LIMIT")),
            e => panic!("expected Validation error, got {:?}", e),
        }
    }

    #[test]
    fn test_config_zero_limit() {
        let result = CardGraphConfig::from_lookup(lookup_from(&[
            ("NEO4J_PASSWORD", "secret"),
            ("REPORT_LIMIT", "0"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_empty_report_sets() {
        let result = CardGraphConfig::from_lookup(lookup_from(&[
            ("NEO4J_PASSWORD", "secret"),
            ("REPORT_SETS", " , "),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_set_list() {
        assert_eq!(parse_set_list("ltr,tmt"), vec!["ltr", "tmt"]);
        assert_eq!(parse_set_list(" LTR "), vec!["ltr"]);
        assert!(parse_set_list("").is_empty());
    }
}
