//! Shared test-only helpers for virtdoc_core.

use crate::models::node::{NodeKind, NodeSpec};
use crate::Document;

/// Builds a document from a compact description.
///
/// Entries prefixed with `=` become formulas, `#` headings (level 1), and
/// everything else text.
pub(crate) fn doc_from(entries: &[&str]) -> Document {
    let specs = entries
        .iter()
        .map(|entry| {
            if let Some(source) = entry.strip_prefix('=') {
                NodeSpec::formula(source)
            } else if let Some(title) = entry.strip_prefix('#') {
                NodeSpec::heading(1, title)
            } else {
                NodeSpec::text(*entry)
            }
        })
        .collect();
    Document::new(specs)
}

/// Renders a document back into the compact description used by [`doc_from`].
pub(crate) fn describe(doc: &Document) -> Vec<String> {
    doc.nodes()
        .iter()
        .map(|node| match node.kind() {
            NodeKind::Formula => format!("={}", node.content()),
            NodeKind::Heading { .. } => format!("#{}", node.content()),
            NodeKind::Text => node.content().to_string(),
        })
        .collect()
}

/// Asserts that every node id maps back to its own index.
///
/// # Panics
/// Panics when the id lookup drifts from positional order.
pub(crate) fn assert_positions_consistent(doc: &Document) {
    for (index, node) in doc.nodes().iter().enumerate() {
        assert_eq!(
            doc.index_of(node.id()),
            Some(index),
            "id lookup drift for node {}",
            node.id()
        );
    }
}
