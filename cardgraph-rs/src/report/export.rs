//! PDF export through headless Chromium.
//!
//! Uses `chromiumoxide` on the tokio runtime. One browser process is launched
//! per export and torn down afterwards, whether printing succeeded or not.

use std::path::{Path, PathBuf};

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::errors::{CardGraphError, Result};

const MM_PER_INCH: f64 = 25.4;

/// Badge shown top-right on the first page.
const BADGE_SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg' width='120' height='120' viewBox='0 0 100 100'>\
<circle cx='50' cy='50' r='48' fill='#0b3d91'/>\
<text x='50' y='58' font-family='Georgia, serif' font-size='28' fill='white' text-anchor='middle'>MTG</text>\
</svg>";

/// Resolves once every `<img>` in the document has loaded or failed.
const WAIT_FOR_IMAGES: &str = "Promise.all(Array.from(document.images)\
.filter(img => !img.complete)\
.map(img => new Promise(resolve => { img.onload = resolve; img.onerror = resolve; })))\
.then(() => document.images.length)";

/// Page geometry for the exported PDF. Lengths are millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub paper_width_mm: f64,
    pub paper_height_mm: f64,
    /// Height of the repeating header band; also the top margin.
    pub header_height_mm: f64,
    pub margin_side_mm: f64,
    pub margin_bottom_mm: f64,
    pub print_background: bool,
}

impl Default for PdfLayout {
    /// A4 with a 15 mm header band and 16 mm side margins.
    fn default() -> Self {
        Self {
            paper_width_mm: 210.0,
            paper_height_mm: 297.0,
            header_height_mm: 15.0,
            margin_side_mm: 16.0,
            margin_bottom_mm: 0.0,
            print_background: true,
        }
    }
}

impl PdfLayout {
    /// CDP print parameters for this layout.
    pub fn print_params(&self) -> PrintToPdfParams {
        PrintToPdfParams {
            print_background: Some(self.print_background),
            display_header_footer: Some(true),
            header_template: Some(header_template(self.header_height_mm)),
            footer_template: Some("<span></span>".to_string()),
            paper_width: Some(mm_to_inches(self.paper_width_mm)),
            paper_height: Some(mm_to_inches(self.paper_height_mm)),
            margin_top: Some(mm_to_inches(self.header_height_mm)),
            margin_bottom: Some(mm_to_inches(self.margin_bottom_mm)),
            margin_left: Some(mm_to_inches(self.margin_side_mm)),
            margin_right: Some(mm_to_inches(self.margin_side_mm)),
            ..Default::default()
        }
    }

    /// Script that pins the badge to the top-right corner of the first page.
    ///
    /// The badge is absolutely positioned at the top of the document body, so
    /// it lands on page 1 only.
    fn badge_script(&self) -> String {
        let height = self.header_height_mm - 4.0;
        format!(
            "(() => {{ const img = document.createElement('img'); \
             img.className = 'report-badge'; img.src = '{src}'; \
             img.style.cssText = 'position:absolute;top:0;right:0;height:{height}mm;'; \
             document.body.prepend(img); }})()",
            src = badge_data_uri(),
        )
    }
}

fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// The badge as an inline `data:` URI, so printing never needs the network for it.
pub fn badge_data_uri() -> String {
    format!("data:image/svg+xml;utf8,{}", urlencoding::encode(BADGE_SVG))
}

/// Header band repeated on every page; reserves the top margin and keeps
/// Chromium's default date/title header out of the output.
pub fn header_template(height_mm: f64) -> String {
    format!(
        "<div style=\"width:100%;height:{height_mm}mm;box-sizing:border-box;\
         font-family:Georgia, serif;font-size:8px;\"></div>"
    )
}

/// Trait for backends that turn a rendered document into a PDF file.
#[allow(async_fn_in_trait)]
pub trait DocumentExporter: Send + Sync {
    /// Print the HTML file at `html_path` into `pdf_path`.
    ///
    /// Returns the number of bytes written.
    async fn export(&self, html_path: &Path, pdf_path: &Path) -> Result<u64>;
}

/// [`DocumentExporter`] driving a headless Chromium over CDP.
#[derive(Debug, Clone, Default)]
pub struct ChromiumExporter {
    layout: PdfLayout,
    chrome_path: Option<PathBuf>,
}

impl ChromiumExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: PdfLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Use this Chrome/Chromium binary instead of auto-detection.
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    pub fn layout(&self) -> &PdfLayout {
        &self.layout
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-setuid-sandbox");
        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(CardGraphError::Export)
    }

    async fn print(&self, browser: &Browser, html_path: &Path) -> Result<Vec<u8>> {
        let url = file_url(html_path).await?;
        let page = browser.new_page("about:blank").await?;

        // goto() returns after the load event fires.
        page.goto(url.as_str()).await?;
        page.evaluate_expression(script(self.layout.badge_script(), false)?).await?;
        let images = wait_for_images(&page).await?;
        debug!(images, "document content loaded");

        let pdf = page.pdf(self.layout.print_params()).await?;
        page.close().await?;
        Ok(pdf)
    }
}

impl DocumentExporter for ChromiumExporter {
    async fn export(&self, html_path: &Path, pdf_path: &Path) -> Result<u64> {
        let (mut browser, mut handler) = Browser::launch(self.browser_config()?).await?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "browser handler event error");
                }
            }
        });

        let printed = self.print(&browser, html_path).await;

        if let Err(e) = browser.close().await {
            warn!(error = %e, "failed to close browser");
        }
        if let Err(e) = browser.wait().await {
            warn!(error = %e, "failed to reap browser process");
        }
        let _ = handler_task.await;

        let pdf = printed?;
        tokio::fs::write(pdf_path, &pdf)
            .await
            .map_err(|e| CardGraphError::io(pdf_path.display(), e))?;

        info!(path = %pdf_path.display(), bytes = pdf.len(), "PDF written");
        Ok(pdf.len() as u64)
    }
}

fn script(expression: impl Into<String>, await_promise: bool) -> Result<EvaluateParams> {
    EvaluateParams::builder()
        .expression(expression)
        .await_promise(await_promise)
        .return_by_value(true)
        .build()
        .map_err(CardGraphError::Export)
}

/// Blocks until every image has settled. No timeout: an unreachable image
/// host stalls the export.
async fn wait_for_images(page: &Page) -> Result<u64> {
    let result = page
        .evaluate_expression(script(WAIT_FOR_IMAGES, true)?)
        .await?;
    Ok(result.into_value::<u64>().unwrap_or(0))
}

/// Absolute `file://` URL for `path`, percent-encoding each segment.
async fn file_url(path: &Path) -> Result<String> {
    let abs = tokio::fs::canonicalize(path)
        .await
        .map_err(|e| CardGraphError::io(path.display(), e))?;
    Ok(path_to_file_url(&abs))
}

fn path_to_file_url(abs: &Path) -> String {
    let encoded: Vec<String> = abs
        .to_string_lossy()
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("file://{}", encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_a4_with_header_band() {
        let params = PdfLayout::default().print_params();
        let approx = |a: Option<f64>, b: f64| (a.unwrap() - b).abs() < 1e-3;

        assert!(approx(params.paper_width, 8.268));
        assert!(approx(params.paper_height, 11.693));
        assert!(approx(params.margin_top, 15.0 / 25.4));
        assert!(approx(params.margin_left, 16.0 / 25.4));
        assert!(approx(params.margin_right, 16.0 / 25.4));
        assert_eq!(params.display_header_footer, Some(true));
        assert_eq!(params.print_background, Some(true));
    }

    #[test]
    fn header_template_reserves_band_height() {
        let template = header_template(15.0);
        assert!(template.contains("height:15mm"));
    }

    #[test]
    fn badge_is_inline_and_encoded() {
        let uri = badge_data_uri();
        assert!(uri.starts_with("data:image/svg+xml;utf8,%3Csvg"));
        assert!(!uri.contains('\''));
        assert!(!uri.contains("http://"));
    }

    #[test]
    fn badge_script_embeds_data_uri() {
        let script = PdfLayout::default().badge_script();
        assert!(script.contains(&badge_data_uri()));
        assert!(script.contains("height:11mm"));
        assert!(script.contains("document.body.prepend"));
    }

    #[test]
    fn file_url_encodes_segments() {
        let url = path_to_file_url(Path::new("/tmp/my reports/report.html"));
        assert_eq!(url, "file:///tmp/my%20reports/report.html");
    }

    #[tokio::test]
    async fn file_url_of_missing_file_is_io_error() {
        let err = file_url(Path::new("/definitely/not/here.html")).await.unwrap_err();
        assert!(matches!(err, CardGraphError::Io { .. }));
    }

    #[test]
    fn builder_sets_chrome_path() {
        let exporter = ChromiumExporter::new().with_chrome_path("/usr/bin/chromium");
        assert_eq!(exporter.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(exporter.layout(), &PdfLayout::default());
    }
}
