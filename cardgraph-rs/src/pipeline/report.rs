//! Reporting pipeline: graph query → HTML → PDF.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::driver::{GraphDriver, TopCardsQuery};
use crate::errors::{CardGraphError, Result};
use crate::report::{render_html, DocumentExporter, ReportCard};

/// Outcome of one reporting run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub cards: usize,
    pub html_path: PathBuf,
    pub pdf_path: PathBuf,
    pub pdf_bytes: u64,
}

/// Reads the top cards, renders them, and exports the PDF.
///
/// Both output files are overwritten unconditionally.
pub struct ReportPipeline<'a, D, E> {
    driver: &'a D,
    exporter: &'a E,
    query: TopCardsQuery,
    html_path: PathBuf,
    pdf_path: PathBuf,
}

impl<'a, D: GraphDriver, E: DocumentExporter> ReportPipeline<'a, D, E> {
    pub fn new(
        driver: &'a D,
        exporter: &'a E,
        query: TopCardsQuery,
        html_path: impl Into<PathBuf>,
        pdf_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            driver,
            exporter,
            query,
            html_path: html_path.into(),
            pdf_path: pdf_path.into(),
        }
    }

    pub async fn run(&self) -> Result<ReportSummary> {
        let cards = self.read().await?;

        let html = render_html(&cards);
        write_html(&self.html_path, &html).await?;

        let pdf_bytes = self.exporter.export(&self.html_path, &self.pdf_path).await?;

        Ok(ReportSummary {
            cards: cards.len(),
            html_path: self.html_path.clone(),
            pdf_path: self.pdf_path.clone(),
            pdf_bytes,
        })
    }

    /// Query the graph, then close the driver whatever the outcome.
    async fn read(&self) -> Result<Vec<ReportCard>> {
        let outcome = match self.driver.ping().await {
            Ok(()) => self.driver.top_cards(&self.query).await,
            Err(e) => Err(e),
        };
        let closed = self.driver.close().await;
        let cards = outcome?;
        closed?;

        info!(
            sets = ?self.query.set_codes,
            limit = self.query.limit,
            cards = cards.len(),
            "report rows fetched"
        );
        Ok(cards)
    }
}

async fn write_html(path: &Path, html: &str) -> Result<()> {
    tokio::fs::write(path, html)
        .await
        .map_err(|e| CardGraphError::io(path.display(), e))?;
    info!(path = %path.display(), bytes = html.len(), "report markup written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{CardWrite, InMemoryDriver};
    use crate::nodes::{CardNode, SetNode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Copies the markup into the "PDF" so tests can inspect what was exported.
    #[derive(Default)]
    struct CopyExporter {
        calls: AtomicUsize,
    }

    impl DocumentExporter for CopyExporter {
        async fn export(&self, html_path: &Path, pdf_path: &Path) -> Result<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let bytes = tokio::fs::read(html_path)
                .await
                .map_err(|e| CardGraphError::io(html_path.display(), e))?;
            tokio::fs::write(pdf_path, &bytes)
                .await
                .map_err(|e| CardGraphError::io(pdf_path.display(), e))?;
            Ok(bytes.len() as u64)
        }
    }

    struct FailingExporter;

    impl DocumentExporter for FailingExporter {
        async fn export(&self, _html_path: &Path, _pdf_path: &Path) -> Result<u64> {
            Err(CardGraphError::Export("browser failed to launch".into()))
        }
    }

    async fn seeded(cards: &[(&str, f64)]) -> InMemoryDriver {
        let driver = InMemoryDriver::new();
        for (id, cmc) in cards {
            driver
                .write_card(&CardWrite {
                    card: CardNode {
                        id: id.to_string(),
                        name: id.to_string(),
                        mana_cost: String::new(),
                        cmc: *cmc,
                        oracle_text: String::new(),
                        rarity: "common".into(),
                        image: None,
                    },
                    set: Some(SetNode {
                        code: "ltr".into(),
                        name: "LTR".into(),
                    }),
                    types: vec![],
                    colors: vec![],
                })
                .await
                .unwrap();
        }
        driver
    }

    #[tokio::test]
    async fn run_writes_markup_and_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let driver = seeded(&[("low", 1.0), ("high", 5.0)]).await;
        let exporter = CopyExporter::default();
        let pipeline = ReportPipeline::new(
            &driver,
            &exporter,
            TopCardsQuery::new(vec!["ltr".into()]),
            dir.path().join("report.html"),
            dir.path().join("report.pdf"),
        );

        let summary = pipeline.run().await.unwrap();
        assert_eq!(summary.cards, 2);
        assert!(summary.pdf_bytes > 0);
        assert_eq!(exporter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(driver.close_count(), 1);

        let html = std::fs::read_to_string(&summary.html_path).unwrap();
        assert!(html.find("<h3>high").unwrap() < html.find("<h3>low").unwrap());
    }

    #[tokio::test]
    async fn export_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let driver = seeded(&[("a", 1.0)]).await;
        let pipeline = ReportPipeline::new(
            &driver,
            &FailingExporter,
            TopCardsQuery::new(vec!["ltr".into()]),
            dir.path().join("report.html"),
            dir.path().join("report.pdf"),
        );

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(err, CardGraphError::Export(_)));
        assert!(dir.path().join("report.html").exists());
        assert!(!dir.path().join("report.pdf").exists());
    }

    #[tokio::test]
    async fn unwritable_markup_path_is_io_error() {
        let driver = seeded(&[]).await;
        let exporter = CopyExporter::default();
        let pipeline = ReportPipeline::new(
            &driver,
            &exporter,
            TopCardsQuery::new(vec!["ltr".into()]),
            "/nonexistent-dir/report.html",
            "/nonexistent-dir/report.pdf",
        );

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(err, CardGraphError::Io { .. }));
        assert_eq!(exporter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(driver.close_count(), 1);
    }
}
