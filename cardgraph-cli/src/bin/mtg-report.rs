//! Render the card report to HTML and PDF.

use cardgraph_cli::config::{self, GraphArgs, ReportArgs};
use cardgraph_cli::telemetry;
use cardgraph_rs::driver::{Neo4jDriver, TopCardsQuery};
use cardgraph_rs::pipeline::ReportPipeline;
use cardgraph_rs::report::ChromiumExporter;
use clap::Parser;
use tracing::{error, info};

/// Query the highest-cost cards of the configured sets and print them to PDF.
#[derive(Parser)]
#[command(name = "mtg-report", version)]
struct Cli {
    #[command(flatten)]
    graph: GraphArgs,

    #[command(flatten)]
    report: ReportArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.graph.verbose)?;

    let config = config::load(|c| {
        cli.graph.apply(c);
        cli.report.apply(c);
    })
    .map_err(|e| {
        error!("{}", e);
        e
    })?;

    info!(
        sets = ?config.report_sets,
        limit = config.report_limit,
        html = %config.html_path.display(),
        pdf = %config.pdf_path.display(),
        "configuration loaded"
    );

    let mut exporter = ChromiumExporter::new();
    if let Some(chrome) = &config.chrome_path {
        exporter = exporter.with_chrome_path(chrome);
    }

    let driver = Neo4jDriver::connect(&config).await.map_err(|e| {
        error!(error = %e, "could not connect to Neo4j");
        e
    })?;

    let query = TopCardsQuery::new(config.report_sets.clone()).with_limit(config.report_limit);
    let pipeline = ReportPipeline::new(
        &driver,
        &exporter,
        query,
        &config.html_path,
        &config.pdf_path,
    );

    match pipeline.run().await {
        Ok(summary) => {
            info!(
                cards = summary.cards,
                pdf = %summary.pdf_path.display(),
                bytes = summary.pdf_bytes,
                "PDF generated"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "report aborted");
            Err(e.into())
        }
    }
}
