//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error: {child:?} cannot be placed under {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Reference node is not a child of the parent
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Invalid node type for the operation
    #[error("Invalid node type: {0:?}")]
    InvalidNodeType(NodeId),
}
