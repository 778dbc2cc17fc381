//! Split/merge editing operations.

use super::{DocEditDelta, Document, OffsetCarry};
use crate::constants::DEFAULT_FORMULA_CONTENT;
use crate::error::DocError;
use crate::models::node::{Node, NodeId, NodeSpec};
use crate::models::position::CursorPosition;
use crate::text::{char_len, split_at_char};
use tracing::debug;

/// Outcome of inserting a formula node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaInsert {
    /// Id of the new formula node.
    pub formula_id: NodeId,
    /// Where the cursor belongs afterwards: immediately after the formula.
    pub cursor: CursorPosition,
    pub delta: DocEditDelta,
}

impl Document {
    /// Insert a formula with the default source at `position`.
    pub fn insert_formula_at(&mut self, position: CursorPosition) -> FormulaInsert {
        self.insert_formula_with(position, DEFAULT_FORMULA_CONTENT)
    }

    /// Insert a formula node with `source` at `position`.
    ///
    /// A text node under the cursor is split at the offset into a "before"
    /// and an "after" fragment (empty fragments are dropped) and the formula
    /// replaces it in place. Otherwise the formula goes immediately after the
    /// addressed node, or at the end for the end-of-document sentinel.
    pub fn insert_formula_with(&mut self, position: CursorPosition, source: &str) -> FormulaInsert {
        let len = self.len();
        let split_target = self
            .nodes
            .get(position.node_index)
            .filter(|node| node.is_text())
            .map(|node| node.content().to_string());

        let formula = self.alloc(NodeSpec::formula(source));
        let formula_id = formula.id();

        let (delta, formula_index) = match split_target {
            Some(content) => {
                let at = position.node_index;
                let (before, after) = split_at_char(&content, position.offset);
                let split_point = char_len(before);
                let mut replacement = Vec::with_capacity(3);
                let mut carries = Vec::with_capacity(2);
                if !before.is_empty() {
                    replacement.push(self.alloc(NodeSpec::text(before)));
                    carries.push(OffsetCarry {
                        source: at,
                        chars: 0..split_point,
                        target: at,
                        target_offset: 0,
                    });
                }
                let formula_index = at + replacement.len();
                replacement.push(formula);
                if !after.is_empty() {
                    replacement.push(self.alloc(NodeSpec::text(after)));
                    carries.push(OffsetCarry {
                        source: at,
                        chars: split_point..split_point + char_len(after),
                        target: formula_index + 1,
                        target_offset: 0,
                    });
                }
                if carries.is_empty() {
                    // Empty text node: its only position sits before the formula.
                    carries.push(OffsetCarry {
                        source: at,
                        chars: 0..0,
                        target: formula_index,
                        target_offset: 0,
                    });
                }
                let mut delta = self.splice(at, 1, replacement);
                delta.carries = carries;
                (delta, formula_index)
            }
            None => {
                if position.node_index > len {
                    let err = DocError::OutOfRange {
                        index: position.node_index,
                        len,
                    };
                    debug!(
                        target: "virtdoc_core::document",
                        error = %err,
                        "clamping formula insert to end of document"
                    );
                }
                let at = position.node_index.saturating_add(1).min(len);
                (self.splice(at, 0, vec![formula]), at)
            }
        };

        debug!(
            target: "virtdoc_core::document",
            formula = %formula_id,
            index = formula_index,
            len = self.len(),
            "inserted formula"
        );
        FormulaInsert {
            formula_id,
            cursor: CursorPosition::new(formula_index + 1, 0),
            delta,
        }
    }

    /// Replace the content of the node with `id`.
    ///
    /// # Errors
    /// [`DocError::NotFound`] when no node has that id; the document is
    /// left untouched.
    pub fn update_node(&mut self, id: NodeId, content: &str) -> Result<DocEditDelta, DocError> {
        let index = self.index_of(id).ok_or(DocError::NotFound(id))?;
        let node = self.nodes.get_mut(index).ok_or(DocError::NotFound(id))?;
        node.set_content(content.to_string());
        self.revision = self.revision.wrapping_add(1);
        Ok(DocEditDelta {
            start: index,
            removed: Vec::new(),
            inserted: Vec::new(),
            updated: vec![id],
            carries: Vec::new(),
        })
    }

    /// Remove the node with `id`.
    ///
    /// When its former neighbours are both text nodes they are merged into
    /// one fresh text node holding the concatenation, in the same splice.
    ///
    /// # Errors
    /// [`DocError::NotFound`] when no node has that id.
    pub fn delete_node(&mut self, id: NodeId) -> Result<DocEditDelta, DocError> {
        let index = self.index_of(id).ok_or(DocError::NotFound(id))?;
        let merged_content = match (
            index.checked_sub(1).and_then(|prev| self.nodes.get(prev)),
            self.nodes.get(index + 1),
        ) {
            (Some(prev), Some(next)) if prev.is_text() && next.is_text() => Some((
                format!("{}{}", prev.content(), next.content()),
                prev.char_len(),
                next.char_len(),
            )),
            _ => None,
        };

        let delta = match merged_content {
            Some((content, prev_chars, next_chars)) => {
                let merged = self.alloc(NodeSpec::text(content));
                debug!(
                    target: "virtdoc_core::document",
                    deleted = %id,
                    merged = %merged.id(),
                    "merging text neighbours of deleted node"
                );
                let start = index - 1;
                let mut delta = self.splice(start, 3, vec![merged]);
                delta.carries = vec![
                    OffsetCarry {
                        source: start,
                        chars: 0..prev_chars,
                        target: start,
                        target_offset: 0,
                    },
                    // Anything inside the deleted node lands on the join.
                    OffsetCarry {
                        source: index,
                        chars: 0..0,
                        target: start,
                        target_offset: prev_chars,
                    },
                    OffsetCarry {
                        source: index + 1,
                        chars: 0..next_chars,
                        target: start,
                        target_offset: prev_chars,
                    },
                ];
                delta
            }
            None => self.splice(index, 1, Vec::new()),
        };
        Ok(delta)
    }

    /// Insert a node at a positional index.
    ///
    /// Indices past the end clamp to an append.
    pub fn insert_node(&mut self, index: usize, spec: NodeSpec) -> DocEditDelta {
        let len = self.len();
        if index > len {
            let err = DocError::OutOfRange { index, len };
            debug!(target: "virtdoc_core::document", error = %err, "clamping node insert");
        }
        let node: Node = self.alloc(spec);
        self.splice(index.min(len), 0, vec![node])
    }
}
