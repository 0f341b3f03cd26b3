//! Node types for the card graph.
//!
//! Four labels, each upserted by its own key:
//! - [`CardNode`] (`Card`, keyed by `id`)
//! - [`SetNode`] (`Set`, keyed by `code`)
//! - [`TypeNode`] (`Type`, keyed by `name`)
//! - [`ColorNode`] (`Color`, keyed by `name`)
//!
//! `Set`, `Type` and `Color` nodes are shared by every card that links to them.

pub mod card;
pub mod color;
pub mod set;
pub mod type_node;

pub use card::CardNode;
pub use color::ColorNode;
pub use set::SetNode;
pub use type_node::TypeNode;
