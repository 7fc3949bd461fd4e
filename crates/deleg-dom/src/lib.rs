//! Delegation DOM - Document Object Model host
//!
//! Arena-based element tree with per-node listener lists and
//! bubbling event dispatch.

mod document;
mod error;
mod events;
mod listeners;
mod node;
mod selector;
mod tree;

pub use document::Document;
pub use error::{DomError, DomResult};
pub use events::{DataTransfer, Event, EventType, UnknownEventType};
pub use listeners::{Listener, ListenerId, ListenerRegistry};
pub use node::{ElementData, InlineStyle, Node, NodeData};
pub use selector::SimpleSelector;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }

    /// Convert the sentinel to `None`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
