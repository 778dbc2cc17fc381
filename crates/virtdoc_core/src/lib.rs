//! Core document library for virtdoc (config, node model, editing).

/// Configuration loading and defaults.
pub mod config;
/// Shared defaults and tuning constants.
pub mod constants;
/// Ordered node sequence and split/merge editing.
pub mod document;
/// Error taxonomy for locally-handled document failures.
pub mod error;
/// Node, cursor, and selection value types.
pub mod models;
/// Char-offset text helpers.
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ViewConfig;
pub use document::{DocEditDelta, Document, FormulaInsert, OffsetCarry};
pub use error::DocError;
pub use models::node::{Node, NodeId, NodeKind, NodeSpec};
pub use models::position::{CursorPosition, Selection};
