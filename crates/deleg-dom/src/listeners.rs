//! Event listener registry
//!
//! Per-node, per-type listener lists with stable ids so a listener can be
//! removed precisely later.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{Document, Event, EventType, NodeId};

/// Listener callback
///
/// Receives the document so handlers can mutate the tree or reconfigure
/// listeners while the event is being dispatched.
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Listener identifier, unique per registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry {
    id: ListenerId,
    listener: Listener,
}

/// Listener lists keyed by (node, event type)
#[derive(Default)]
pub struct ListenerRegistry {
    lists: HashMap<(NodeId, EventType), Vec<Entry>>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener.
    ///
    /// Adding the same listener twice for one node and type is a no-op
    /// that returns the existing id.
    pub fn add(&mut self, target: NodeId, event_type: EventType, listener: Listener) -> ListenerId {
        let list = self.lists.entry((target, event_type)).or_default();

        if let Some(existing) = list.iter().find(|e| Rc::ptr_eq(&e.listener, &listener)) {
            tracing::trace!(?target, %event_type, "duplicate listener ignored");
            return existing.id;
        }

        let id = ListenerId(self.next_id);
        self.next_id += 1;
        list.push(Entry { id, listener });
        id
    }

    /// Remove a listener by id
    pub fn remove(&mut self, target: NodeId, event_type: EventType, id: ListenerId) -> bool {
        let key = (target, event_type);
        let Some(list) = self.lists.get_mut(&key) else {
            return false;
        };

        let initial_len = list.len();
        list.retain(|e| e.id != id);
        let removed = list.len() < initial_len;

        if list.is_empty() {
            self.lists.remove(&key);
        }
        removed
    }

    /// Check that a listener is still registered
    pub fn contains(&self, target: NodeId, event_type: EventType, id: ListenerId) -> bool {
        self.lists
            .get(&(target, event_type))
            .is_some_and(|list| list.iter().any(|e| e.id == id))
    }

    /// Copy of the listener list, safe to hold while listeners run
    pub fn snapshot(&self, target: NodeId, event_type: EventType) -> Vec<(ListenerId, Listener)> {
        self.lists
            .get(&(target, event_type))
            .map(|list| list.iter().map(|e| (e.id, Rc::clone(&e.listener))).collect())
            .unwrap_or_default()
    }

    /// Listeners attached to a node, across all types
    pub fn count(&self, target: NodeId) -> usize {
        self.lists
            .iter()
            .filter(|((node, _), _)| *node == target)
            .map(|(_, list)| list.len())
            .sum()
    }

    /// Listeners attached to a node for one type
    pub fn count_for(&self, target: NodeId, event_type: EventType) -> usize {
        self.lists.get(&(target, event_type)).map_or(0, Vec::len)
    }

    /// Listeners in the whole registry
    pub fn total(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("lists", &self.lists.len())
            .field("total", &self.total())
            .finish()
    }
}
