//! Container resolution

use deleg_dom::{Document, NodeId};

use crate::{DelegateError, DelegateResult};

/// Element a manager attaches its listeners to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    /// An element already in hand
    Element(NodeId),
    /// A selector resolved against the document at call time
    Selector(String),
}

impl Container {
    /// Resolve to a live element
    pub fn resolve(&self, doc: &Document) -> DelegateResult<NodeId> {
        match self {
            Self::Element(id) if doc.tree().is_element(*id) => Ok(*id),
            Self::Element(id) => Err(DelegateError::ElementNotFound(format!("{id:?}"))),
            Self::Selector(selector) => doc
                .query_selector(selector)
                .ok_or_else(|| DelegateError::ElementNotFound(selector.clone())),
        }
    }
}

impl From<NodeId> for Container {
    fn from(id: NodeId) -> Self {
        Self::Element(id)
    }
}

impl From<&str> for Container {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for Container {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}
