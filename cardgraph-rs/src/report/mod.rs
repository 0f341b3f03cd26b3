//! Report generation.
//!
//! - [`render`] turns query rows into a complete HTML document.
//! - [`export`] prints that document to a paginated A4 PDF through headless
//!   Chromium.

pub mod export;
pub mod render;

use serde::{Deserialize, Serialize};

pub use export::{ChromiumExporter, DocumentExporter, PdfLayout};
pub use render::render_html;

/// Substituted for `image` when a card has no image URL.
pub const NO_IMAGE: &str = "No image";

/// One card row as projected by the report query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCard {
    pub name: String,
    /// Converted mana cost, normalized to a native float.
    pub cmc: f64,
    pub rarity: String,
    /// Oracle text.
    pub text: String,
    /// Image URL, or [`NO_IMAGE`].
    pub image: String,
}
