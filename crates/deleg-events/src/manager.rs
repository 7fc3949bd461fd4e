//! Event delegation manager
//!
//! A manager owns at most one configuration at a time: either delegation
//! (one listener per event type on the container, routed to interested
//! children) or drag-reorder.
//!
//! Handlers receive `&mut Document` and may reconfigure or destroy the very
//! manager that invoked them. Listeners only touch state captured when they
//! were attached, and the manager's own cell is never borrowed while a
//! handler runs.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use deleg_dom::{Document, DomTree, Event, EventType, Listener, ListenerId, NodeId};

use crate::{
    Container, DelegateResult, DelegationConfig, DragReorderController, Handler, HandlerTable,
    InterestDeclaration, ScanDepth,
};

/// Per-element interest side table, owned by one configuration
type InterestMap = HashMap<NodeId, InterestDeclaration>;

/// Configuration state of a manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    Unconfigured,
    Delegating,
    Dragging,
}

/// Active delegation configuration
#[derive(Debug)]
struct Delegation {
    container: NodeId,
    interests: Rc<RefCell<InterestMap>>,
    registrations: BTreeMap<EventType, ListenerId>,
}

impl Delegation {
    fn attach(
        doc: &mut Document,
        container: NodeId,
        handlers: HandlerTable,
        config: &DelegationConfig,
    ) -> Self {
        let table = handlers.into_supported();

        let mut interests = InterestMap::new();
        for node in candidates(doc.tree(), container, config.scan_depth) {
            let Some(declaration) = InterestDeclaration::read(doc, node, &config.marker_attribute)
            else {
                continue;
            };
            let declaration = declaration.intersect(&table);
            if !declaration.is_empty() {
                interests.insert(node, declaration);
            }
        }

        let active: BTreeSet<EventType> = interests.values().flat_map(|d| d.iter()).collect();
        let interests = Rc::new(RefCell::new(interests));

        let mut registrations = BTreeMap::new();
        for event_type in active {
            let Some(handler) = table.get(event_type) else {
                continue;
            };
            let listener = delegating_listener(
                container,
                event_type,
                Rc::clone(&interests),
                Rc::clone(handler),
            );
            registrations.insert(event_type, doc.add_event_listener(container, event_type, listener));
        }

        tracing::debug!(
            ?container,
            children = interests.borrow().len(),
            event_types = ?registrations.keys().collect::<Vec<_>>(),
            "delegation configured"
        );

        Self {
            container,
            interests,
            registrations,
        }
    }

    /// Detach one type; true when nothing is left
    fn detach_one(&mut self, doc: &mut Document, event_type: EventType) -> Option<bool> {
        let id = self.registrations.remove(&event_type)?;
        doc.remove_event_listener(self.container, event_type, id);

        let mut interests = self.interests.borrow_mut();
        interests.retain(|_, declaration| {
            declaration.forget(event_type);
            !declaration.is_empty()
        });

        Some(self.registrations.is_empty())
    }

    fn detach(self, doc: &mut Document) {
        for (event_type, id) in &self.registrations {
            doc.remove_event_listener(self.container, *event_type, *id);
        }
        self.interests.borrow_mut().clear();
        tracing::debug!(container = ?self.container, "delegation removed");
    }
}

/// Elements whose interest declarations are read
fn candidates(tree: &DomTree, container: NodeId, depth: ScanDepth) -> Vec<NodeId> {
    match depth {
        ScanDepth::Children => tree.element_children(container).collect(),
        ScanDepth::Subtree => {
            let mut out = Vec::new();
            let mut stack: Vec<NodeId> = tree.element_children(container).collect();
            while let Some(node) = stack.pop() {
                out.push(node);
                stack.extend(tree.element_children(node));
            }
            out
        }
    }
}

/// Innermost node between `target` (inclusive) and `container` (exclusive)
/// that declared interest in `event_type`
fn closest_interested(
    tree: &DomTree,
    container: NodeId,
    target: NodeId,
    event_type: EventType,
    interests: &InterestMap,
) -> Option<NodeId> {
    std::iter::once(target)
        .chain(tree.ancestors(target))
        .take_while(|&node| node != container)
        .find(|node| interests.get(node).is_some_and(|d| d.contains(event_type)))
}

fn delegating_listener(
    container: NodeId,
    event_type: EventType,
    interests: Rc<RefCell<InterestMap>>,
    handler: Handler,
) -> Listener {
    Rc::new(move |doc: &mut Document, event: &mut Event| {
        // Claimed by a manager on an inner container
        if event.delegate_target.is_some() {
            return;
        }

        let matched = closest_interested(
            doc.tree(),
            container,
            event.target,
            event_type,
            &interests.borrow(),
        );
        let Some(matched) = matched else {
            tracing::trace!(%event_type, node = ?event.target, "no interested element");
            return;
        };

        tracing::trace!(%event_type, ?matched, "delegating");
        event.delegate_target = Some(matched);
        handler(doc, event);
    })
}

#[derive(Debug)]
enum Mode {
    Unconfigured,
    Delegating(Delegation),
    Dragging(DragReorderController),
}

#[derive(Debug)]
struct Inner {
    config: DelegationConfig,
    mode: Mode,
}

/// Event delegation manager for one container
///
/// Cloning yields another handle to the same manager, which is how a
/// handler can hold on to the manager that invoked it.
#[derive(Debug, Clone)]
pub struct EventDelegationManager {
    inner: Rc<RefCell<Inner>>,
}

impl EventDelegationManager {
    /// Create an unconfigured manager with default options
    pub fn new() -> Self {
        Self::with_config(DelegationConfig::default())
    }

    /// Create an unconfigured manager
    pub fn with_config(config: DelegationConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                config,
                mode: Mode::Unconfigured,
            })),
        }
    }

    pub fn config(&self) -> DelegationConfig {
        self.inner.borrow().config.clone()
    }

    /// Configure the manager on `container`.
    ///
    /// With a handler table, children declaring interest get events routed
    /// to them. Without one, the container becomes a drag-reorder list.
    /// Any previous configuration is torn down first. Fails only when the
    /// container cannot be resolved, in which case the previous
    /// configuration is left untouched.
    pub fn setup(
        &self,
        doc: &mut Document,
        container: impl Into<Container>,
        handlers: Option<HandlerTable>,
    ) -> DelegateResult<()> {
        let container = container.into().resolve(doc)?;
        self.destroy(doc);

        let config = self.config();
        let mode = match handlers {
            None => Mode::Dragging(DragReorderController::enable(doc, container, &config)),
            Some(table) => {
                let delegation = Delegation::attach(doc, container, table, &config);
                if delegation.registrations.is_empty() {
                    tracing::debug!(?container, "no child declared a handled event");
                    Mode::Unconfigured
                } else {
                    Mode::Delegating(delegation)
                }
            }
        };

        self.inner.borrow_mut().mode = mode;
        Ok(())
    }

    /// Detach the listener for `event_type`.
    ///
    /// No-op when the container is not the configured one or nothing is
    /// registered for the type.
    pub fn remove(&self, doc: &mut Document, container: impl Into<Container>, event_type: EventType) {
        let container = container.into();
        let Ok(node) = container.resolve(doc) else {
            tracing::debug!(?container, "remove on unresolved container ignored");
            return;
        };

        let mut inner = self.inner.borrow_mut();
        let Mode::Delegating(delegation) = &mut inner.mode else {
            tracing::debug!(%event_type, "remove without delegation ignored");
            return;
        };
        if delegation.container != node {
            tracing::debug!(?node, "remove on a foreign container ignored");
            return;
        }

        match delegation.detach_one(doc, event_type) {
            Some(true) => {
                inner.mode = Mode::Unconfigured;
                tracing::debug!(?node, "last delegated listener removed");
            }
            Some(false) => tracing::debug!(%event_type, "delegated listener removed"),
            None => tracing::debug!(%event_type, "no delegated listener to remove"),
        }
    }

    /// Detach every listener and forget the container. Safe to repeat.
    pub fn destroy(&self, doc: &mut Document) {
        let mode = std::mem::replace(&mut self.inner.borrow_mut().mode, Mode::Unconfigured);
        match mode {
            Mode::Unconfigured => {}
            Mode::Delegating(delegation) => delegation.detach(doc),
            Mode::Dragging(mut controller) => controller.disable(doc),
        }
    }

    pub fn state(&self) -> ManagerState {
        match self.inner.borrow().mode {
            Mode::Unconfigured => ManagerState::Unconfigured,
            Mode::Delegating(_) => ManagerState::Delegating,
            Mode::Dragging(_) => ManagerState::Dragging,
        }
    }

    /// Container of the active configuration
    pub fn container(&self) -> Option<NodeId> {
        match &self.inner.borrow().mode {
            Mode::Unconfigured => None,
            Mode::Delegating(d) => Some(d.container),
            Mode::Dragging(c) => Some(c.container()),
        }
    }

    /// Event types with an attached delegation listener
    pub fn registered_event_types(&self) -> Vec<EventType> {
        match &self.inner.borrow().mode {
            Mode::Delegating(d) => d.registrations.keys().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Elements with a recorded interest declaration
    pub fn interested_elements(&self) -> Vec<NodeId> {
        match &self.inner.borrow().mode {
            Mode::Delegating(d) => {
                let mut nodes: Vec<NodeId> = d.interests.borrow().keys().copied().collect();
                nodes.sort();
                nodes
            }
            _ => Vec::new(),
        }
    }

    /// Element being dragged in drag-reorder mode
    pub fn dragged(&self) -> Option<NodeId> {
        match &self.inner.borrow().mode {
            Mode::Dragging(c) => c.dragged(),
            _ => None,
        }
    }
}

impl Default for EventDelegationManager {
    fn default() -> Self {
        Self::new()
    }
}
