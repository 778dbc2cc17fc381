//! Error taxonomy for document and window operations.
//!
//! None of these reach a UI shell: the session layer logs them and turns
//! each one into a no-op or a clamp.
use crate::models::node::NodeId;
use thiserror::Error;

/// Locally-handled document failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    /// An operation referenced a node id that is not in the document.
    #[error("node {0} not found")]
    NotFound(NodeId),

    /// A node or cursor index fell outside `[0, len]`.
    #[error("index {index} out of range for document of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A window came out with `end < start`.
    #[error("degenerate range {start}..{end}")]
    DegenerateRange { start: usize, end: usize },
}

impl DocError {
    /// Short stable label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::OutOfRange { .. } => "out_of_range",
            Self::DegenerateRange { .. } => "degenerate_range",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_offending_value() {
        assert_eq!(DocError::NotFound(NodeId(7)).to_string(), "node #7 not found");
        assert_eq!(
            DocError::OutOfRange { index: 9, len: 3 }.to_string(),
            "index 9 out of range for document of length 3"
        );
        assert_eq!(
            DocError::DegenerateRange { start: 4, end: 2 }.kind(),
            "degenerate_range"
        );
    }
}
