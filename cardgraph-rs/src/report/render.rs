//! HTML rendering of the card report.
//!
//! Output depends only on the input rows: no timestamps, no randomness.
//! Every interpolated field is escaped.

use std::fmt::Write as _;

use crate::report::ReportCard;
use crate::utils::escape_html;

const TITLE: &str = "Report — Top Cards";
const SUBTITLE: &str = "Generated report — selection of top cards and key properties";

const STYLE: &str = r#"
      html, body {
        height: 100%;
        margin: 0;
        font-family: "Georgia", "Times New Roman", serif;
        color: #222;
        background: #fff;
      }
      header.report-header {
        margin-bottom: 8mm;
        text-align: center;
      }
      header.report-header h1 {
        margin: 0;
        font-size: 20px;
        letter-spacing: 0.5px;
        font-weight: 600;
      }
      header.report-header p {
        font-size: 12px;
        color: #555;
      }
      .card {
        display: flex;
        gap: 14px;
        margin-bottom: 14px;
        padding-bottom: 12px;
        border-bottom: 1px solid #e6e6e6;
        page-break-inside: avoid;
      }
      .card img {
        width: 120px;
        height: auto;
        object-fit: cover;
        border: 1px solid #ddd;
        box-shadow: 0 1px 2px rgba(0,0,0,0.04);
        border-radius: 4px;
      }
      .meta {
        flex: 1;
        min-width: 0;
      }
      .meta h3 {
        margin: 0 0 6px 0;
        font-size: 14px;
      }
      .meta .meta-row {
        margin: 2px 0;
        font-size: 12px;
        color: #333;
      }
      .meta .oracle {
        margin-top: 8px;
        font-size: 11.5px;
        color: #444;
        line-height: 1.35;
      }
      .content-footer-space {
        height: 10mm;
      }
      @media print {
        .container { padding: 24mm 16mm; }
      }
"#;

/// Render `cards` into a complete HTML document, one block per card in input order.
pub fn render_html(cards: &[ReportCard]) -> String {
    let mut html = String::with_capacity(4096 + cards.len() * 512);

    html.push_str("<!doctype html>\n<html>\n  <head>\n    <meta charset=\"utf-8\" />\n");
    html.push_str("    <title>");
    html.push_str(TITLE);
    html.push_str("</title>\n    <style>");
    html.push_str(STYLE);
    html.push_str("    </style>\n  </head>\n  <body>\n    <div class=\"container\">\n");
    html.push_str("      <header class=\"report-header\">\n");
    let _ = writeln!(html, "        <h1>{TITLE}</h1>");
    let _ = writeln!(html, "        <p>{SUBTITLE}</p>");
    html.push_str("      </header>\n");

    for card in cards {
        render_card(&mut html, card);
    }

    html.push_str("      <div class=\"content-footer-space\"></div>\n");
    html.push_str("    </div>\n  </body>\n</html>\n");
    html
}

fn render_card(html: &mut String, card: &ReportCard) {
    let name = escape_html(&card.name);
    let _ = write!(
        html,
        concat!(
            "      <div class=\"card\">\n",
            "        <img src=\"{image}\" alt=\"{name}\" />\n",
            "        <div class=\"meta\">\n",
            "          <h3>{name} <small>({rarity})</small></h3>\n",
            "          <p class=\"meta-row\">CMC: {cmc}</p>\n",
            "          <p class=\"oracle\">{text}</p>\n",
            "        </div>\n",
            "      </div>\n",
        ),
        image = escape_html(&card.image),
        name = name,
        rarity = escape_html(&card.rarity),
        cmc = format_cmc(card.cmc),
        text = escape_html(&card.text),
    );
}

/// Whole costs print without a fractional part (`5`, not `5.0`).
pub fn format_cmc(cmc: f64) -> String {
    if cmc.fract() == 0.0 && cmc.is_finite() {
        format!("{cmc:.0}")
    } else {
        cmc.to_string()
    }
}

/// Number of card blocks in a rendered document.
pub fn count_card_blocks(html: &str) -> usize {
    html.matches("<div class=\"card\">").count()
}
