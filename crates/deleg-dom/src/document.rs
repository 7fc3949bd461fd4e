//! Document - High-level document API

use crate::{
    DomError, DomResult, DomTree, Event, EventType, InlineStyle, Listener, ListenerId,
    ListenerRegistry, NodeId, SimpleSelector,
};

/// HTML Document
///
/// Owns the element tree and every listener attached to its nodes.
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    listeners: ListenerRegistry,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with `<html><head/><body/></html>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under the document root cannot violate the hierarchy
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            listeners: ListenerRegistry::new(),
            html_element: html,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty() -> Self {
        Self {
            tree: DomTree::new(),
            listeners: ListenerRegistry::new(),
            html_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Read an attribute
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.tree.get(node)?.as_element()?.get_attr(name)
    }

    /// Write an attribute
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        let element = self
            .tree
            .get_mut(node)
            .ok_or(DomError::NotFound(node))?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(node))?;
        element.set_attr(name, value);
        Ok(())
    }

    /// Inline style of an element
    pub fn style(&self, node: NodeId) -> Option<&InlineStyle> {
        Some(&self.tree.get(node)?.as_element()?.style)
    }

    /// Mutable inline style of an element
    pub fn style_mut(&mut self, node: NodeId) -> Option<&mut InlineStyle> {
        Some(&mut self.tree.get_mut(node)?.as_element_mut()?.style)
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_selector(&format!("#{id}"))
    }

    /// First element in document order matching `selector`
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = SimpleSelector::parse(selector)?;
        self.descendants(self.tree.root())
            .into_iter()
            .find(|&id| self.matches(id, &selector))
    }

    /// All elements in document order matching `selector`
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = SimpleSelector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(self.tree.root())
            .into_iter()
            .filter(|&id| self.matches(id, &selector))
            .collect()
    }

    fn matches(&self, id: NodeId, selector: &SimpleSelector) -> bool {
        self.tree
            .get(id)
            .and_then(|n| n.as_element())
            .is_some_and(|e| selector.matches(e))
    }

    /// Pre-order descendants of `start` (exclusive)
    fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.tree.children(start).collect();
        stack.reverse();

        while let Some(id) = stack.pop() {
            out.push(id);
            let mark = stack.len();
            stack.extend(self.tree.children(id));
            stack[mark..].reverse();
        }
        out
    }

    /// Attach a listener to a node
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: EventType,
        listener: Listener,
    ) -> ListenerId {
        self.listeners.add(target, event_type, listener)
    }

    /// Detach a listener; returns false if it was not attached
    pub fn remove_event_listener(
        &mut self,
        target: NodeId,
        event_type: EventType,
        id: ListenerId,
    ) -> bool {
        self.listeners.remove(target, event_type, id)
    }

    /// Listeners attached to `target`, across all types
    pub fn listener_count(&self, target: NodeId) -> usize {
        self.listeners.count(target)
    }

    /// Listeners attached to `target` for one type
    pub fn listener_count_for(&self, target: NodeId, event_type: EventType) -> usize {
        self.listeners.count_for(target, event_type)
    }

    /// Listener registry
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Dispatch an event: target phase, then bubbling to the document.
    ///
    /// The propagation path is fixed before any listener runs. Listeners
    /// removed during dispatch are skipped. Delegation and propagation
    /// state from an earlier dispatch of the same event is cleared first.
    /// Returns false if default was prevented.
    pub fn dispatch_event(&mut self, event: &mut Event) -> bool {
        event.reset_dispatch();
        let target = event.target;
        if self.tree.get(target).is_none() {
            tracing::trace!(?target, "dispatch to unknown node ignored");
            return true;
        }

        let depth = if event.bubbles { usize::MAX } else { 1 };
        let path: Vec<NodeId> = std::iter::once(target)
            .chain(self.tree.ancestors(target))
            .take(depth)
            .collect();

        let event_type = event.event_type;
        for node in path {
            event.current_target = Some(node);

            for (id, listener) in self.listeners.snapshot(node, event_type) {
                if !self.listeners.contains(node, event_type, id) {
                    continue;
                }
                listener(&mut *self, &mut *event);
            }

            if event.is_propagation_stopped() {
                break;
            }
        }

        event.current_target = None;
        !event.is_default_prevented()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
