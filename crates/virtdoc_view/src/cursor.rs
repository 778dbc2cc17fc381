//! Virtual cursor engine: pointer hits to logical positions and back.

use crate::metrics::TextMetrics;
use tracing::debug;
use virtdoc_core::{CursorPosition, DocEditDelta, DocError, Document, Selection};

/// Pixel location of a caret, relative to the content origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaretPixel {
    pub x: f32,
    pub y: f32,
}

/// Map a click at `pixel_x` inside node `node_index` to a logical position.
///
/// Text nodes resolve to the nearest caret offset (earlier offset on ties).
/// Formula and heading nodes are atomic and always resolve to offset `0`.
/// Indices past the end resolve to the end-of-document sentinel.
pub fn point_to_position(
    document: &Document,
    metrics: &TextMetrics,
    node_index: usize,
    pixel_x: f32,
) -> CursorPosition {
    match document.node_at(node_index) {
        Some(node) if node.is_text() => {
            CursorPosition::new(node_index, metrics.nearest_offset(node.content(), pixel_x))
        }
        Some(_) => CursorPosition::new(node_index, 0),
        None => {
            if node_index > document.len() {
                let err = DocError::OutOfRange {
                    index: node_index,
                    len: document.len(),
                };
                debug!(target: "virtdoc_view::cursor", error = %err, "clamping click target");
            }
            CursorPosition::end_of_document(document.len())
        }
    }
}

/// Map a logical position to its caret pixel.
///
/// `y` is the node's top edge; `x` accumulates character advances for text
/// nodes and is `0` otherwise.
pub fn position_to_pixel(
    document: &Document,
    metrics: &TextMetrics,
    node_height: f32,
    position: CursorPosition,
) -> CaretPixel {
    let position = document.clamp_position(position);
    let x = document
        .node_at(position.node_index)
        .filter(|node| node.is_text())
        .map(|node| metrics.caret_x(node.content(), position.offset))
        .unwrap_or(0.0);
    CaretPixel {
        x,
        y: position.node_index as f32 * node_height,
    }
}

/// Logical cursor and optional selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VirtualCursor {
    cursor: CursorPosition,
    selection: Option<Selection>,
}

impl VirtualCursor {
    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Set the cursor, leaving any selection in place.
    pub fn set_cursor(&mut self, position: CursorPosition) {
        self.cursor = position;
    }

    /// Set the selection; the cursor follows its `end`.
    pub fn set_selection(&mut self, start: CursorPosition, end: CursorPosition) {
        self.selection = Some(Selection::new(start, end));
        self.cursor = end;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Place a single-point cursor from a click inside a node.
    pub fn click_node(
        &mut self,
        document: &Document,
        metrics: &TextMetrics,
        node_index: usize,
        pixel_x: f32,
    ) -> CursorPosition {
        self.cursor = point_to_position(document, metrics, node_index, pixel_x);
        self.selection = None;
        self.cursor
    }

    /// A click on the container background moves to end of document.
    pub fn click_background(&mut self, document: &Document) -> CursorPosition {
        self.cursor = CursorPosition::end_of_document(document.len());
        self.selection = None;
        self.cursor
    }

    /// Carry positions across a splice, then clamp them into `document`.
    ///
    /// Positions after the spliced range shift with it, and positions in
    /// split or merged text follow their chars. A cursor with nowhere to go
    /// lands at the start of the replacement; a selection with an end that
    /// cannot be carried is dropped.
    pub fn apply_delta(&mut self, delta: &DocEditDelta, document: &Document) {
        self.cursor = carry_position(self.cursor, delta, document).unwrap_or_else(|| {
            document.clamp_position(CursorPosition::new(delta.start, 0))
        });
        self.selection = self.selection.and_then(|selection| {
            let start = carry_position(selection.start, delta, document)?;
            let end = carry_position(selection.end, delta, document)?;
            Some(Selection::new(start, end))
        });
    }

    /// Clamp cursor and selection into `document` without shifting.
    pub fn clamp_to(&mut self, document: &Document) {
        self.cursor = document.clamp_position(self.cursor);
        if let Some(selection) = self.selection {
            self.selection = Some(Selection::new(
                document.clamp_position(selection.start),
                document.clamp_position(selection.end),
            ));
        }
    }
}

fn carry_position(
    position: CursorPosition,
    delta: &DocEditDelta,
    document: &Document,
) -> Option<CursorPosition> {
    delta
        .carry_position(position)
        .map(|carried| document.clamp_position(carried))
}
