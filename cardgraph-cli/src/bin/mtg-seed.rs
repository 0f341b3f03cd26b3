//! Seed the card graph from one catalog set.

use cardgraph_cli::config::{self, GraphArgs, SeedArgs};
use cardgraph_cli::telemetry;
use cardgraph_rs::driver::Neo4jDriver;
use cardgraph_rs::pipeline::SeedPipeline;
use cardgraph_rs::source::ScryfallClient;
use clap::Parser;
use tracing::{error, info};

/// Fetch one set from the card catalog and upsert it into Neo4j.
#[derive(Parser)]
#[command(name = "mtg-seed", version)]
struct Cli {
    #[command(flatten)]
    graph: GraphArgs,

    #[command(flatten)]
    seed: SeedArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.graph.verbose)?;

    let config = config::load(|c| {
        cli.graph.apply(c);
        cli.seed.apply(c);
    })
    .map_err(|e| {
        error!("{}", e);
        e
    })?;

    info!(
        set = %config.seed_set,
        catalog = %config.catalog_url,
        neo4j = %config.neo4j_uri,
        "configuration loaded"
    );

    let source = ScryfallClient::with_base_url(config.catalog_url.as_str())?;
    let driver = Neo4jDriver::connect(&config).await.map_err(|e| {
        error!(error = %e, "could not connect to Neo4j");
        e
    })?;

    match SeedPipeline::new(&source, &driver).run(&config.seed_set).await {
        Ok(summary) => {
            info!(
                set = %summary.set_code,
                fetched = summary.fetched,
                written = summary.written,
                "seeding finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "seeding aborted");
            Err(e.into())
        }
    }
}
