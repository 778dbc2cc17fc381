//! Logical positions in the node sequence.

use std::cmp::Ordering;

/// A `(node index, char offset)` location in the document model.
///
/// `node_index == len` is the end-of-document sentinel; its offset is
/// ignored. For non-text nodes the offset is conventionally `0` and means
/// "immediately before this node".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CursorPosition {
    pub node_index: usize,
    pub offset: usize,
}

impl CursorPosition {
    pub fn new(node_index: usize, offset: usize) -> Self {
        Self { node_index, offset }
    }

    /// End-of-document sentinel for a document of `len` nodes.
    pub fn end_of_document(len: usize) -> Self {
        Self {
            node_index: len,
            offset: 0,
        }
    }

    /// True when this position addresses no node.
    pub fn is_end_of_document(&self, len: usize) -> bool {
        self.node_index >= len
    }

    /// Clamp into a document of `len` nodes.
    ///
    /// `text_chars` is the char length of the addressed node when it is a
    /// text node, or `None` for non-text nodes (offset forced to `0`).
    pub fn clamped(self, len: usize, text_chars: Option<usize>) -> Self {
        if self.node_index >= len {
            return Self::end_of_document(len);
        }
        let offset = match text_chars {
            Some(chars) => self.offset.min(chars),
            None => 0,
        };
        Self {
            node_index: self.node_index,
            offset,
        }
    }
}

impl PartialOrd for CursorPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CursorPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node_index
            .cmp(&other.node_index)
            .then(self.offset.cmp(&other.offset))
    }
}

/// An anchored range between two positions, in either direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub start: CursorPosition,
    pub end: CursorPosition,
}

impl Selection {
    pub fn new(start: CursorPosition, end: CursorPosition) -> Self {
        Self { start, end }
    }

    /// Returns `(earlier, later)` in reading order.
    pub fn normalized(&self) -> (CursorPosition, CursorPosition) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// True when both ends coincide.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}
