//! Node id to render-handle map for the current window.

use crate::window::VisibleWindow;
use std::collections::HashMap;
use virtdoc_core::{Document, NodeId};

/// Where a materialized node currently sits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderHandle {
    pub index: usize,
    pub top: f32,
}

/// Handles for the nodes inside the visible window, keyed by id.
///
/// Owned by the session and rebuilt whenever the window is recomputed, so a
/// handle is never looked up by a stale index.
#[derive(Debug, Default)]
pub struct RenderHandles {
    handles: HashMap<NodeId, RenderHandle>,
    window: VisibleWindow,
}

impl RenderHandles {
    /// Rebuild handles for every node in `window`.
    pub fn rebuild(&mut self, document: &Document, window: VisibleWindow, node_height: f32) {
        self.handles.clear();
        self.window = window;
        let nodes = document.slice(window.range());
        for (offset, node) in nodes.iter().enumerate() {
            let index = window.start + offset;
            self.handles.insert(
                node.id(),
                RenderHandle {
                    index,
                    top: index as f32 * node_height,
                },
            );
        }
    }

    pub fn get(&self, id: NodeId) -> Option<RenderHandle> {
        self.handles.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Window the handles were built for.
    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    pub fn clear(&mut self) {
        self.handles.clear();
        self.window = VisibleWindow::default();
    }
}
