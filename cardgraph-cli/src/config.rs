use std::path::PathBuf;

use cardgraph_rs::types::parse_set_list;
use cardgraph_rs::CardGraphConfig;
use clap::Args;

/// Connection flags shared by both binaries.
///
/// Every flag overrides the matching environment variable.
#[derive(Debug, Clone, Default, Args)]
pub struct GraphArgs {
    /// Bolt URI of the Neo4j instance [env: NEO4J_URI]
    #[arg(long)]
    pub neo4j_uri: Option<String>,

    /// Neo4j user [env: NEO4J_USER]
    #[arg(long)]
    pub neo4j_user: Option<String>,

    /// Neo4j database name [env: NEO4J_DATABASE]
    #[arg(long)]
    pub neo4j_database: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Flags of `mtg-seed`.
#[derive(Debug, Clone, Default, Args)]
pub struct SeedArgs {
    /// Set code to fetch, e.g. `khm` [env: SEED_SET]
    #[arg(long = "set")]
    pub set: Option<String>,

    /// Catalog API base URL [env: CATALOG_URL]
    #[arg(long)]
    pub catalog_url: Option<String>,
}

/// Flags of `mtg-report`.
#[derive(Debug, Clone, Default, Args)]
pub struct ReportArgs {
    /// Comma-separated set codes to report on [env: REPORT_SETS]
    #[arg(long)]
    pub sets: Option<String>,

    /// Maximum number of cards listed [env: REPORT_LIMIT]
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output path of the HTML document [env: REPORT_HTML_PATH]
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Output path of the PDF [env: REPORT_PDF_PATH]
    #[arg(long)]
    pub pdf: Option<PathBuf>,

    /// Chrome/Chromium executable [env: CHROME_PATH]
    #[arg(long)]
    pub chrome: Option<PathBuf>,
}

impl GraphArgs {
    pub fn apply(&self, config: &mut CardGraphConfig) {
        if let Some(uri) = &self.neo4j_uri {
            config.neo4j_uri = uri.clone();
        }
        if let Some(user) = &self.neo4j_user {
            config.neo4j_user = user.clone();
        }
        if let Some(db) = &self.neo4j_database {
            config.neo4j_database = Some(db.clone());
        }
    }
}

impl SeedArgs {
    pub fn apply(&self, config: &mut CardGraphConfig) {
        if let Some(set) = &self.set {
            config.seed_set = set.trim().to_lowercase();
        }
        if let Some(url) = &self.catalog_url {
            config.catalog_url = url.clone();
        }
    }
}

impl ReportArgs {
    pub fn apply(&self, config: &mut CardGraphConfig) {
        if let Some(sets) = &self.sets {
            config.report_sets = parse_set_list(sets);
        }
        if let Some(limit) = self.limit {
            config.report_limit = limit;
        }
        if let Some(html) = &self.html {
            config.html_path = html.clone();
        }
        if let Some(pdf) = &self.pdf {
            config.pdf_path = pdf.clone();
        }
        if let Some(chrome) = &self.chrome {
            config.chrome_path = Some(chrome.clone());
        }
    }
}

/// Load environment configuration, apply flag overrides, and re-validate.
pub fn load(apply: impl FnOnce(&mut CardGraphConfig)) -> anyhow::Result<CardGraphConfig> {
    let mut config = CardGraphConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    apply(&mut config);
    config
        .check()
        .map_err(|e| anyhow::anyhow!("Invalid command-line override: {}", e))?;
    Ok(config)
}
