//! Ordered node sequence with stable-id lookup.
//!
//! Indices are positional and shift on every splice; anything that must
//! survive an edit refers to nodes by [`NodeId`].

mod edit;


pub use edit::FormulaInsert;

use crate::models::node::{Node, NodeId, NodeSpec};
use crate::models::position::CursorPosition;
use std::collections::HashMap;
use std::ops::Range;

/// Summary of one atomic document mutation.
///
/// Splices report the pre-edit `start` index plus the ids that left and
/// entered the sequence there; in-place content changes report `updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocEditDelta {
    /// First index touched, in pre-edit coordinates.
    pub start: usize,
    /// Ids removed from `start..start + removed.len()`.
    pub removed: Vec<NodeId>,
    /// Ids now occupying `start..start + inserted.len()`.
    pub inserted: Vec<NodeId>,
    /// Ids whose content changed without moving.
    pub updated: Vec<NodeId>,
    /// How char offsets inside removed text nodes land after the splice.
    pub carries: Vec<OffsetCarry>,
}

/// Maps a char span of a removed node onto a node of the new layout.
///
/// Split fragments and merged text keep their chars, so a position inside
/// them can follow the edit instead of collapsing to the splice start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffsetCarry {
    /// Pre-edit index of the removed node.
    pub source: usize,
    /// Char span of the removed node covered by this carry.
    pub chars: Range<usize>,
    /// Post-edit index receiving the span.
    pub target: usize,
    /// Post-edit offset of `chars.start`.
    pub target_offset: usize,
}

impl DocEditDelta {
    /// Signed change in document length.
    pub fn len_delta(&self) -> isize {
        self.inserted.len() as isize - self.removed.len() as isize
    }

    /// True when the edit moved nodes (so later indices shifted).
    pub fn is_splice(&self) -> bool {
        !self.removed.is_empty() || !self.inserted.is_empty()
    }

    /// Relocate a pre-edit position into the post-edit layout.
    ///
    /// Positions before the splice are unchanged and positions after it
    /// shift by [`Self::len_delta`]. Positions inside the removed range
    /// follow a matching [`OffsetCarry`], with the offset clamped into the
    /// carried span.
    ///
    /// # Returns
    /// `None` when the position sat in a removed node that nothing carries.
    pub fn carry_position(&self, position: CursorPosition) -> Option<CursorPosition> {
        if !self.is_splice() || position.node_index < self.start {
            return Some(position);
        }
        if position.node_index >= self.start + self.removed.len() {
            let index = (position.node_index as isize + self.len_delta()).max(0) as usize;
            return Some(CursorPosition::new(index, position.offset));
        }
        let same_source = |carry: &&OffsetCarry| carry.source == position.node_index;
        let carry = self
            .carries
            .iter()
            .filter(same_source)
            .find(|carry| position.offset <= carry.chars.end)
            .or_else(|| self.carries.iter().rev().find(same_source))?;
        let offset = position.offset.clamp(carry.chars.start, carry.chars.end);
        Some(CursorPosition::new(
            carry.target,
            carry.target_offset + (offset - carry.chars.start),
        ))
    }
}

/// The editable document: an ordered sequence of uniquely identified nodes.
#[derive(Clone, Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,
    positions: HashMap<NodeId, usize>,
    next_id: u64,
    revision: u64,
}

impl Document {
    /// Build a document, assigning fresh ids in reading order.
    pub fn new(specs: Vec<NodeSpec>) -> Self {
        let mut doc = Self::default();
        doc.replace(specs);
        doc
    }

    /// Replace every node with a fresh sequence.
    ///
    /// The id counter keeps running, so ids handed out before the
    /// replacement can never match a new node.
    pub fn replace(&mut self, specs: Vec<NodeSpec>) -> DocEditDelta {
        let removed: Vec<NodeId> = self.nodes.iter().map(Node::id).collect();
        let fresh: Vec<Node> = specs.into_iter().map(|spec| self.alloc(spec)).collect();
        let inserted = fresh.iter().map(Node::id).collect();
        self.nodes = fresh;
        self.positions.clear();
        self.reindex_from(0);
        self.revision = self.revision.wrapping_add(1);
        DocEditDelta {
            start: 0,
            removed,
            inserted,
            updated: Vec::new(),
            carries: Vec::new(),
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Monotonic counter bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All nodes in reading order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Nodes in `range`, clamped to the document bounds.
    pub fn slice(&self, range: Range<usize>) -> &[Node] {
        let end = range.end.min(self.nodes.len());
        let start = range.start.min(end);
        &self.nodes[start..end]
    }

    /// Node at a positional index.
    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Node with the given id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).and_then(|index| self.nodes.get(index))
    }

    /// Current index of a node id.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Clamp a position into this document.
    ///
    /// Text nodes bound the offset by their char length; other nodes force
    /// it to `0`; indices past the end become the end-of-document sentinel.
    pub fn clamp_position(&self, position: CursorPosition) -> CursorPosition {
        let text_chars = self
            .nodes
            .get(position.node_index)
            .filter(|node| node.is_text())
            .map(Node::char_len);
        position.clamped(self.nodes.len(), text_chars)
    }

    fn alloc(&mut self, spec: NodeSpec) -> Node {
        let id = NodeId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        Node::from_spec(id, spec)
    }

    /// Replace `start..start + remove` with `replacement` as one atomic step.
    fn splice(&mut self, start: usize, remove: usize, replacement: Vec<Node>) -> DocEditDelta {
        let inserted: Vec<NodeId> = replacement.iter().map(Node::id).collect();
        let removed: Vec<NodeId> = self
            .nodes
            .splice(start..start + remove, replacement)
            .map(|node| node.id())
            .collect();
        for id in &removed {
            self.positions.remove(id);
        }
        self.reindex_from(start);
        self.revision = self.revision.wrapping_add(1);
        DocEditDelta {
            start,
            removed,
            inserted,
            updated: Vec::new(),
            carries: Vec::new(),
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (offset, node) in self.nodes[start..].iter().enumerate() {
            self.positions.insert(node.id(), start + offset);
        }
    }
}
