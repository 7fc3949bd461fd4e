//! Interest declarations
//!
//! A child opts in to delegated events with a marker attribute such as
//! `data-event-list="click mouseover"`.

use std::collections::BTreeSet;

use deleg_dom::{Document, EventType, NodeId};

use crate::HandlerTable;

/// Event types a manager will delegate
pub const DELEGATED_EVENTS: [EventType; 10] = [
    EventType::Click,
    EventType::DblClick,
    EventType::MouseDown,
    EventType::MouseUp,
    EventType::MouseMove,
    EventType::MouseOver,
    EventType::MouseOut,
    EventType::MouseEnter,
    EventType::MouseLeave,
    EventType::ContextMenu,
];

/// Event types installed by drag-reorder mode
pub const DRAG_EVENTS: [EventType; 4] = [
    EventType::DragStart,
    EventType::DragOver,
    EventType::Drop,
    EventType::DragEnd,
];

/// Check membership in [`DELEGATED_EVENTS`]
pub fn is_delegated(event_type: EventType) -> bool {
    DELEGATED_EVENTS.contains(&event_type)
}

/// Event types one element wants delegated to it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestDeclaration {
    events: BTreeSet<EventType>,
}

impl InterestDeclaration {
    /// Parse a whitespace-separated marker value.
    ///
    /// Unknown names and types outside the delegated set are skipped.
    pub fn parse(marker: &str) -> Self {
        let events = marker
            .split_whitespace()
            .filter_map(|token| match EventType::from_name(token) {
                Some(t) if is_delegated(t) => Some(t),
                _ => {
                    tracing::trace!(token, "marker token ignored");
                    None
                }
            })
            .collect();
        Self { events }
    }

    /// Read the declaration carried by `node`, if it has the marker
    pub fn read(doc: &Document, node: NodeId, marker_attribute: &str) -> Option<Self> {
        doc.get_attribute(node, marker_attribute).map(Self::parse)
    }

    /// Keep only types the table has a handler for
    pub fn intersect(mut self, table: &HandlerTable) -> Self {
        self.events.retain(|t| table.contains(*t));
        self
    }

    /// Stop declaring `event_type`
    pub fn forget(&mut self, event_type: EventType) -> bool {
        self.events.remove(&event_type)
    }

    pub fn contains(&self, event_type: EventType) -> bool {
        self.events.contains(&event_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = EventType> + '_ {
        self.events.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
