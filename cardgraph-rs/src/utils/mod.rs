//! Shared utilities.
//!
//! Includes:
//! - Type-line tokenization for `Type` nodes
//! - Markup escaping for the report renderer

pub mod text;

pub use text::{escape_html, split_type_line};
