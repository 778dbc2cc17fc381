//! Single-owner editing session tying the document to the windowed renderer.
//!
//! Every event (scroll, resize, click, edit) runs to completion on `&mut
//! self`, so an edit and its cache invalidation are fully applied before
//! the next window recomputation observes the document.

use crate::cursor::{position_to_pixel, CaretPixel, VirtualCursor};
use crate::metrics::TextMetrics;
use crate::render::{render_node, RenderCache, RenderHandle, RenderHandles, VisibleNode};
use crate::throttle::TrailingThrottle;
use crate::window::{compute_window, VisibleWindow, WindowParams};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use virtdoc_core::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use virtdoc_core::{
    CursorPosition, DocEditDelta, DocError, Document, NodeId, NodeSpec, Selection, ViewConfig,
};

/// Viewport size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Owns the document, render cache, viewport, and cursor of one editor.
pub struct DocumentSession {
    pub(crate) document: Document,
    pub(crate) config: ViewConfig,
    metrics: TextMetrics,
    pub(crate) cache: RenderCache,
    handles: RenderHandles,
    cursor: VirtualCursor,
    scroll_throttle: TrailingThrottle<f32>,
    scroll_offset: f32,
    viewport: ViewportSize,
    pub(crate) window: VisibleWindow,
}

impl DocumentSession {
    /// Start a session over `specs` with the default viewport.
    pub fn new(specs: Vec<NodeSpec>, config: ViewConfig) -> Self {
        let config = config.sanitized();
        let mut session = Self {
            document: Document::new(specs),
            metrics: TextMetrics::new(config.char_width),
            cache: RenderCache::new(config.fingerprint_chars, config.cache_max_entries),
            handles: RenderHandles::default(),
            cursor: VirtualCursor::default(),
            scroll_throttle: TrailingThrottle::new(config.scroll_throttle()),
            scroll_offset: 0.0,
            viewport: ViewportSize::default(),
            window: VisibleWindow::default(),
            config,
        };
        session.cursor.clamp_to(&session.document);
        session.recompute_window();
        session
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Current visible window.
    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    /// Render handle of a node inside the current window.
    pub fn handle_for(&self, id: NodeId) -> Option<RenderHandle> {
        self.handles.get(id)
    }

    /// Number of cached node renderings.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Full scrollable content height in pixels.
    pub fn total_height(&self) -> f32 {
        self.document.len() as f32 * self.config.node_height
    }

    // --- viewport events -------------------------------------------------

    /// Throttled scroll event.
    ///
    /// # Returns
    /// `true` when the window was recomputed now; `false` when the offset was
    /// deferred until a later [`Self::tick`].
    pub fn on_scroll(&mut self, offset: f32, now: Instant) -> bool {
        match self.scroll_throttle.submit(offset, now) {
            Some(offset) => {
                self.set_scroll_offset(offset);
                true
            }
            None => false,
        }
    }

    /// Apply a deferred scroll whose throttle window has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.scroll_throttle.poll(now) {
            Some(offset) => {
                self.set_scroll_offset(offset);
                true
            }
            None => false,
        }
    }

    /// Deadline of a deferred scroll, for hosts that schedule wakeups.
    pub fn next_tick_deadline(&self) -> Option<Instant> {
        self.scroll_throttle.deadline()
    }

    /// Unthrottled scroll.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = if offset.is_finite() {
            offset.max(0.0)
        } else {
            0.0
        };
        self.recompute_window();
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        let clean = |value: f32| if value.is_finite() { value.max(0.0) } else { 0.0 };
        self.viewport = ViewportSize {
            width: clean(width),
            height: clean(height),
        };
        self.recompute_window();
    }

    // --- rendering -------------------------------------------------------

    /// Visible nodes with absolute offsets, materialized through the cache.
    pub fn visible_nodes(&mut self) -> Vec<VisibleNode<'_>> {
        let started = Instant::now();
        let window = self.window;
        let node_height = self.config.node_height;
        let mut rendered = Vec::with_capacity(window.len());
        for (offset, node) in self.document.slice(window.range()).iter().enumerate() {
            let index = window.start + offset;
            let output = match self.cache.get(node, index) {
                Some(hit) => hit,
                None => {
                    let output = Arc::new(render_node(node, node_height));
                    self.cache.put(node, index, Arc::clone(&output));
                    output
                }
            };
            rendered.push(output);
        }
        self.trace_materialize(started);

        let cursor_index = self.cursor.cursor().node_index;
        self.document
            .slice(window.range())
            .iter()
            .zip(rendered)
            .enumerate()
            .map(|(offset, (node, rendered))| {
                let index = window.start + offset;
                VisibleNode {
                    node,
                    index,
                    top: index as f32 * node_height,
                    rendered,
                    is_cursor_node: index == cursor_index,
                }
            })
            .collect()
    }

    /// Human-readable window summary, e.g. `Showing 0-23 of 15000 nodes`.
    pub fn status_line(&self) -> String {
        format!(
            "Showing {}-{} of {} nodes",
            self.window.start,
            self.window.end,
            self.document.len()
        )
    }

    /// True when nodes exist below the materialized window.
    pub fn has_more_below(&self) -> bool {
        self.window.end < self.document.len()
    }

    // --- cursor ----------------------------------------------------------

    pub fn cursor(&self) -> CursorPosition {
        self.cursor.cursor()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.cursor.selection()
    }

    /// Click at `pixel_x` inside node `node_index`; clears the selection.
    pub fn click_node(&mut self, node_index: usize, pixel_x: f32) -> CursorPosition {
        self.cursor
            .click_node(&self.document, &self.metrics, node_index, pixel_x)
    }

    /// Click on the container background; moves to end of document.
    pub fn click_background(&mut self) -> CursorPosition {
        self.cursor.click_background(&self.document)
    }

    /// Set the cursor directly (clamped into the document).
    pub fn set_cursor(&mut self, position: CursorPosition) {
        self.cursor.set_cursor(self.document.clamp_position(position));
    }

    /// Set the selection (clamped); the cursor follows `end`.
    pub fn set_selection(&mut self, start: CursorPosition, end: CursorPosition) {
        self.cursor.set_selection(
            self.document.clamp_position(start),
            self.document.clamp_position(end),
        );
    }

    /// Pixel position of the caret.
    pub fn caret_pixel(&self) -> CaretPixel {
        position_to_pixel(
            &self.document,
            &self.metrics,
            self.config.node_height,
            self.cursor.cursor(),
        )
    }

    // --- edits -----------------------------------------------------------

    /// Insert a default formula at the cursor and move past it.
    pub fn insert_formula_at_cursor(&mut self) -> NodeId {
        self.insert_formula_at(self.cursor.cursor())
    }

    /// Insert a default formula at `position` and move the cursor past it.
    pub fn insert_formula_at(&mut self, position: CursorPosition) -> NodeId {
        let position = self.document.clamp_position(position);
        let insert = self.document.insert_formula_at(position);
        self.apply_delta(&insert.delta);
        self.cursor.set_cursor(insert.cursor);
        insert.formula_id
    }

    /// Replace a node's content; unknown ids are a logged no-op.
    pub fn update_node(&mut self, id: NodeId, content: &str) -> bool {
        let result = self.document.update_node(id, content);
        self.finish_edit("update_node", result)
    }

    /// Delete a node (merging text neighbours); unknown ids are a logged no-op.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let result = self.document.delete_node(id);
        self.finish_edit("delete_node", result)
    }

    /// Insert a node at a positional index (clamped to an append).
    pub fn insert_node(&mut self, index: usize, spec: NodeSpec) -> Option<NodeId> {
        let delta = self.document.insert_node(index, spec);
        self.apply_delta(&delta);
        delta.inserted.first().copied()
    }

    /// Swap in a whole new document; cursor, cache, and handles reset.
    pub fn replace_document(&mut self, specs: Vec<NodeSpec>) {
        self.document.replace(specs);
        self.cache.clear();
        self.handles.clear();
        self.cursor = VirtualCursor::default();
        self.cursor.clamp_to(&self.document);
        self.recompute_window();
    }

    fn finish_edit(&mut self, op: &'static str, result: Result<DocEditDelta, DocError>) -> bool {
        match result {
            Ok(delta) => {
                self.apply_delta(&delta);
                true
            }
            Err(err) => {
                debug!(
                    target: "virtdoc_view::session",
                    op,
                    error = %err,
                    kind = err.kind(),
                    "edit ignored"
                );
                false
            }
        }
    }

    /// Invalidate cache entries, carry the cursor, and refresh the window.
    fn apply_delta(&mut self, delta: &DocEditDelta) {
        self.cache.evict(&delta.removed);
        for id in &delta.updated {
            self.cache.invalidate(*id);
        }
        self.cursor.apply_delta(delta, &self.document);
        self.recompute_window();
    }

    fn recompute_window(&mut self) {
        let started = Instant::now();
        self.window = compute_window(WindowParams {
            scroll_offset: self.scroll_offset,
            viewport_height: self.viewport.height,
            node_height: self.config.node_height,
            buffer: self.config.window_buffer,
            len: self.document.len(),
        });
        self.handles
            .rebuild(&self.document, self.window, self.config.node_height);
        self.cache.set_hot_range(self.window.range());
        self.trace_window(started);
    }
}
