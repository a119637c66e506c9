//! DOM Node Operations
//!
//! Errors raised by tree mutation (appendChild, insertBefore, removeChild).

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("node {0} not found")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("hierarchy request error: cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Node is not a child of the given parent
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    /// Operation needs a different node type
    #[error("node {0} has the wrong type for this operation")]
    InvalidNodeType(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DomError::NotAChild { parent: NodeId(1), child: NodeId(4) };
        assert_eq!(err.to_string(), "node #4 is not a child of #1");
        assert_eq!(DomError::NotFound(NodeId::NONE).to_string(), "node #none not found");
    }
}
