//! Drag-to-reorder
//!
//! Turns a container's direct children into a list that can be reordered
//! with native drag events. Reordering moves nodes; callers that persist
//! order read it back from the container's children after a drop.

use std::cell::Cell;
use std::rc::Rc;

use deleg_dom::{Document, DomTree, Event, EventType, Listener, ListenerId, NodeId};

use crate::DelegationConfig;

/// Drag payload type set on drag start
const DRAG_PAYLOAD_TYPE: &str = "text/plain";

/// Drag-reorder listeners installed on one container
#[derive(Debug)]
pub struct DragReorderController {
    container: NodeId,
    /// Element being dragged, if a gesture is in progress
    dragged: Rc<Cell<Option<NodeId>>>,
    registrations: Vec<(EventType, ListenerId)>,
}

impl DragReorderController {
    /// Make the children of `container` draggable and install the four
    /// drag listeners on it.
    pub fn enable(doc: &mut Document, container: NodeId, config: &DelegationConfig) -> Self {
        mark_draggable(doc, container);

        let dragged = Rc::new(Cell::new(None));
        let drag_over: Listener = Rc::new(|_: &mut Document, e: &mut Event| e.prevent_default());
        let listeners: [(EventType, Listener); 4] = [
            (
                EventType::DragStart,
                on_drag_start(container, Rc::clone(&dragged), config.drag_opacity.clone()),
            ),
            (EventType::DragOver, drag_over),
            (EventType::Drop, on_drop(container, Rc::clone(&dragged), config)),
            (EventType::DragEnd, on_drag_end(Rc::clone(&dragged))),
        ];

        let registrations = listeners
            .into_iter()
            .map(|(event_type, listener)| {
                (event_type, doc.add_event_listener(container, event_type, listener))
            })
            .collect();

        tracing::debug!(?container, "drag reorder enabled");
        Self {
            container,
            dragged,
            registrations,
        }
    }

    /// Remove the drag listeners. Calling it again is a no-op.
    pub fn disable(&mut self, doc: &mut Document) {
        if self.registrations.is_empty() {
            return;
        }
        for (event_type, id) in self.registrations.drain(..) {
            doc.remove_event_listener(self.container, event_type, id);
        }
        if let Some(item) = self.dragged.take() {
            clear_affordance(doc, item);
        }
        tracing::debug!(container = ?self.container, "drag reorder disabled");
    }

    pub fn is_enabled(&self) -> bool {
        !self.registrations.is_empty()
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Element currently being dragged
    pub fn dragged(&self) -> Option<NodeId> {
        self.dragged.get()
    }
}

/// `draggable="true"` on children, `pointer-events: none` on grandchildren
/// so the gesture always targets a child and not its content.
fn mark_draggable(doc: &mut Document, container: NodeId) {
    let children: Vec<NodeId> = doc.tree().element_children(container).collect();
    for child in children {
        if let Err(err) = doc.set_attribute(child, "draggable", "true") {
            tracing::warn!(%err, "cannot mark child draggable");
        }

        let grandchildren: Vec<NodeId> = doc.tree().element_children(child).collect();
        for inner in grandchildren {
            if let Some(style) = doc.style_mut(inner) {
                style.set_property("pointer-events", "none");
            }
        }
    }
}

/// Direct child of `container` that contains `target`
fn owning_child(tree: &DomTree, container: NodeId, target: NodeId) -> Option<NodeId> {
    std::iter::once(target)
        .chain(tree.ancestors(target))
        .find(|&node| tree.parent(node) == Some(container))
}

fn clear_affordance(doc: &mut Document, item: NodeId) {
    if let Some(style) = doc.style_mut(item) {
        style.remove_property("opacity");
    }
}

fn on_drag_start(container: NodeId, dragged: Rc<Cell<Option<NodeId>>>, opacity: String) -> Listener {
    Rc::new(move |doc: &mut Document, event: &mut Event| {
        let Some(item) = owning_child(doc.tree(), container, event.target) else {
            tracing::trace!(node = ?event.target, "drag start outside the list");
            return;
        };

        if let Some(style) = doc.style_mut(item) {
            style.set_property("opacity", &opacity);
        }
        if let Some(transfer) = event.data_transfer.as_mut() {
            transfer.set_data(DRAG_PAYLOAD_TYPE, "");
        }
        // A new gesture replaces one that never saw drop or drag end
        if let Some(previous) = dragged.replace(Some(item)) {
            if previous != item {
                clear_affordance(doc, previous);
            }
        }
    })
}

fn on_drop(container: NodeId, dragged: Rc<Cell<Option<NodeId>>>, config: &DelegationConfig) -> Listener {
    let modifier = config.reorder_modifier;

    Rc::new(move |doc: &mut Document, event: &mut Event| {
        event.prevent_default();

        let Some(item) = dragged.take() else {
            return;
        };

        match owning_child(doc.tree(), container, event.target) {
            Some(drop_target) if drop_target != item => {
                let tree = doc.tree_mut();
                let moved = if modifier.is_held(event) {
                    tree.insert_after(container, item, drop_target)
                } else {
                    tree.insert_before(container, item, Some(drop_target))
                };
                match moved {
                    Ok(_) => tracing::trace!(?item, ?drop_target, "reordered"),
                    Err(err) => tracing::warn!(%err, "drag reorder failed"),
                }
            }
            _ => tracing::trace!(?item, "dropped without reorder"),
        }

        clear_affordance(doc, item);
    })
}

fn on_drag_end(dragged: Rc<Cell<Option<NodeId>>>) -> Listener {
    Rc::new(move |doc: &mut Document, _: &mut Event| {
        if let Some(item) = dragged.take() {
            clear_affordance(doc, item);
        }
    })
}
