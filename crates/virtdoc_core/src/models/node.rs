//! Document node types.

use crate::constants::MAX_HEADING_LEVEL;
use std::fmt;

/// Stable node identity.
///
/// Allocated by the owning [`crate::Document`] and never reused, so it stays
/// valid as a cross-reference while indices shift under edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Editable paragraph text; the only kind a cursor can sit inside.
    Text,
    /// Section heading; `level` is clamped into `1..=3`.
    Heading { level: u8 },
    /// Atomic formula source.
    Formula,
}

impl NodeKind {
    /// Heading kind with the level clamped into the supported range.
    pub fn heading(level: u8) -> Self {
        Self::Heading {
            level: level.clamp(1, MAX_HEADING_LEVEL),
        }
    }

    /// Short stable label for logs and render tags.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Heading { .. } => "heading",
            Self::Formula => "formula",
        }
    }

    fn normalized(self) -> Self {
        match self {
            Self::Heading { level } => Self::heading(level),
            other => other,
        }
    }
}

/// A node that has not been given an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSpec {
    pub kind: NodeKind,
    pub content: String,
}

impl NodeSpec {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            content: content.into(),
        }
    }

    pub fn heading(level: u8, content: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::heading(level),
            content: content.into(),
        }
    }

    pub fn formula(content: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Formula,
            content: content.into(),
        }
    }
}

/// A document element with a stable id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    content: String,
}

impl Node {
    pub(crate) fn from_spec(id: NodeId, spec: NodeSpec) -> Self {
        Self {
            id,
            kind: spec.kind.normalized(),
            content: spec.content,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// True for nodes a cursor can address by char offset.
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Heading level, or `None` for other kinds.
    pub fn level(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Heading { level } => Some(level),
            _ => None,
        }
    }

    /// Content length in chars.
    pub fn char_len(&self) -> usize {
        crate::text::char_len(&self.content)
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }
}
