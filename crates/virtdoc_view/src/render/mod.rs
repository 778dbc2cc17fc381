//! Node materialization, render caching, and per-window render handles.

pub(crate) mod cache;
pub(crate) mod handles;

pub use cache::{CacheStats, Fingerprint, RenderCache};
pub use handles::{RenderHandle, RenderHandles};

use std::sync::Arc;
use virtdoc_core::{Node, NodeId, NodeKind};

const BODY_FONT_PX: f32 = 16.0;

/// Materialized, position-independent representation of one node.
///
/// The vertical anchor is not part of it: a node keeps the same rendering
/// while its index shifts, and callers anchor it per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedNode {
    pub node_id: NodeId,
    pub kind: NodeKind,
    /// Text shown for the node.
    pub label: String,
    pub font_px: f32,
    pub bold: bool,
    pub height: f32,
}

/// One entry of the visible-node list.
#[derive(Clone, Debug)]
pub struct VisibleNode<'a> {
    pub node: &'a Node,
    pub index: usize,
    /// Absolute top offset in pixels (`index * node_height`).
    pub top: f32,
    pub rendered: Arc<RenderedNode>,
    /// True for the node the logical cursor currently sits in.
    pub is_cursor_node: bool,
}

fn heading_font_px(level: u8) -> f32 {
    match level {
        1 => 24.0,
        2 => 20.0,
        _ => 18.0,
    }
}

/// Build the rendering of `node` for rows `node_height` pixels tall.
pub fn render_node(node: &Node, node_height: f32) -> RenderedNode {
    let (label, font_px, bold) = match node.kind() {
        NodeKind::Text => (node.content().to_string(), BODY_FONT_PX, false),
        NodeKind::Heading { level } => (node.content().to_string(), heading_font_px(level), true),
        NodeKind::Formula => (format!("Formula: {}", node.content()), BODY_FONT_PX, false),
    };
    RenderedNode {
        node_id: node.id(),
        kind: node.kind(),
        label,
        font_px,
        bold,
        height: node_height,
    }
}
