//! Delegation and drag-reorder behaviour through the public API

use std::cell::RefCell;
use std::rc::Rc;

use deleg_events::dom::{Document, Event, EventType, NodeId};
use deleg_events::{
    DelegateError, DelegationConfig, EventDelegationManager, HandlerTable, ManagerState, ScanDepth,
};

// ============================================================================
// FIXTURES
// ============================================================================

type Log = Rc<RefCell<Vec<(&'static str, Option<NodeId>)>>>;

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Handler that records its name and the delegate target
fn recorder(log: &Log, name: &'static str) -> impl Fn(&mut Document, &mut Event) + 'static {
    let log = Rc::clone(log);
    move |_: &mut Document, event: &mut Event| log.borrow_mut().push((name, event.delegate_target))
}

fn append(doc: &mut Document, parent: NodeId, tag: &str, marker: Option<&str>) -> NodeId {
    let node = doc.create_element(tag);
    if let Some(marker) = marker {
        doc.set_attribute(node, "data-event-list", marker).unwrap();
    }
    doc.tree_mut().append_child(parent, node).unwrap();
    node
}

/// `<div id="fields">` with one child per marker
fn fields(doc: &mut Document, markers: &[Option<&str>]) -> (NodeId, Vec<NodeId>) {
    let body = doc.body();
    let container = append(doc, body, "div", None);
    doc.set_attribute(container, "id", "fields").unwrap();
    let children = markers
        .iter()
        .map(|marker| append(doc, container, "div", *marker))
        .collect();
    (container, children)
}

fn click_and_hover(log: &Log) -> HandlerTable {
    HandlerTable::new()
        .on(EventType::Click, recorder(log, "click"))
        .on(EventType::MouseOver, recorder(log, "mouseover"))
}

// ============================================================================
// SETUP
// ============================================================================

#[test]
fn test_one_listener_per_declared_and_handled_type() {
    let mut doc = Document::new();
    let (container, _) = fields(
        &mut doc,
        &[Some("click mouseover"), Some("click dblclick"), None],
    );
    let log = log();
    let manager = EventDelegationManager::new();

    let handlers = click_and_hover(&log)
        .on(EventType::MouseOut, recorder(&log, "mouseout"))
        .on(EventType::DragStart, recorder(&log, "dragstart"));
    manager.setup(&mut doc, "#fields", Some(handlers)).unwrap();

    // dblclick: declared but unhandled. mouseout: handled but undeclared.
    // dragstart: outside the delegated set.
    assert_eq!(
        manager.registered_event_types(),
        vec![EventType::Click, EventType::MouseOver]
    );
    assert_eq!(doc.listener_count_for(container, EventType::Click), 1);
    assert_eq!(doc.listener_count_for(container, EventType::MouseOver), 1);
    assert_eq!(doc.listener_count(container), 2);
    assert_eq!(manager.state(), ManagerState::Delegating);
    assert_eq!(manager.container(), Some(container));
}

#[test]
fn test_setup_unknown_container_fails() {
    let mut doc = Document::new();
    let manager = EventDelegationManager::new();

    let result = manager.setup(&mut doc, "#nowhere", Some(HandlerTable::new()));
    assert_eq!(result, Err(DelegateError::ElementNotFound("#nowhere".to_string())));
    assert_eq!(manager.state(), ManagerState::Unconfigured);
}

#[test]
fn test_grandchildren_are_not_scanned_by_default() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[None]);
    append(&mut doc, children[0], "span", Some("click"));
    let log = log();
    let manager = EventDelegationManager::new();

    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();

    assert_eq!(doc.listener_count(container), 0);
    assert_eq!(manager.state(), ManagerState::Unconfigured);
}

#[test]
fn test_children_added_after_setup_need_resetup() {
    let mut doc = Document::new();
    let (container, _) = fields(&mut doc, &[Some("click")]);
    let log = log();
    let manager = EventDelegationManager::new();
    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();

    let late = append(&mut doc, container, "div", Some("click"));
    doc.dispatch_event(&mut Event::click(late));
    assert!(log.borrow().is_empty());

    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();
    doc.dispatch_event(&mut Event::click(late));
    assert_eq!(*log.borrow(), vec![("click", Some(late))]);
}

// ============================================================================
// DISPATCH
// ============================================================================

#[test]
fn test_dispatch_invokes_only_matching_type() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click mouseover"), None]);
    let log = log();
    let manager = EventDelegationManager::new();
    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();

    doc.dispatch_event(&mut Event::click(children[0]));
    assert_eq!(*log.borrow(), vec![("click", Some(children[0]))]);

    doc.dispatch_event(&mut Event::new(EventType::MouseOver, children[0]));
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(log.borrow()[1], ("mouseover", Some(children[0])));

    // Non-qualifying sibling and the container itself
    doc.dispatch_event(&mut Event::click(children[1]));
    doc.dispatch_event(&mut Event::click(container));
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_same_event_dispatched_twice_fires_twice() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click")]);
    let log = log();
    let manager = EventDelegationManager::new();
    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();

    let mut click = Event::click(children[0]);
    doc.dispatch_event(&mut click);
    doc.dispatch_event(&mut click);
    assert_eq!(
        *log.borrow(),
        vec![("click", Some(children[0])), ("click", Some(children[0]))]
    );
}

#[test]
fn test_dispatch_from_inner_content_reaches_child() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click")]);
    let label = append(&mut doc, children[0], "span", None);
    let text = doc.tree_mut().create_text("Name");
    doc.tree_mut().append_child(label, text).unwrap();
    let log = log();
    let manager = EventDelegationManager::new();
    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();

    doc.dispatch_event(&mut Event::click(text));
    assert_eq!(*log.borrow(), vec![("click", Some(children[0]))]);
}

#[test]
fn test_handler_does_not_prevent_default_automatically() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click")]);
    let log = log();
    let manager = EventDelegationManager::new();
    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();

    assert!(doc.dispatch_event(&mut Event::click(children[0])));
}

#[test]
fn test_nested_declarations_innermost_wins() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click")]);
    let inner = append(&mut doc, children[0], "div", Some("click"));
    let log = log();

    let config = DelegationConfig {
        scan_depth: ScanDepth::Subtree,
        ..Default::default()
    };
    let manager = EventDelegationManager::with_config(config);
    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();

    doc.dispatch_event(&mut Event::click(inner));
    assert_eq!(*log.borrow(), vec![("click", Some(inner))]);

    doc.dispatch_event(&mut Event::click(children[0]));
    assert_eq!(log.borrow()[1], ("click", Some(children[0])));
}

#[test]
fn test_nested_managers_fire_innermost_handler_only() {
    // container > child_a (click) > child_a1 (click, different handler)
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click")]);
    let child_a = children[0];
    let child_a1 = append(&mut doc, child_a, "div", Some("click"));
    let log = log();

    let outer = EventDelegationManager::new();
    outer
        .setup(
            &mut doc,
            container,
            Some(HandlerTable::new().on(EventType::Click, recorder(&log, "outer"))),
        )
        .unwrap();
    let inner = EventDelegationManager::new();
    inner
        .setup(
            &mut doc,
            child_a,
            Some(HandlerTable::new().on(EventType::Click, recorder(&log, "inner"))),
        )
        .unwrap();

    doc.dispatch_event(&mut Event::click(child_a1));
    assert_eq!(*log.borrow(), vec![("inner", Some(child_a1))]);

    doc.dispatch_event(&mut Event::click(child_a));
    assert_eq!(log.borrow()[1], ("outer", Some(child_a)));
}

// ============================================================================
// REMOVE / DESTROY
// ============================================================================

#[test]
fn test_remove_unregistered_type_is_noop() {
    let mut doc = Document::new();
    let (container, _) = fields(&mut doc, &[Some("click")]);
    let log = log();
    let manager = EventDelegationManager::new();

    // Before setup
    manager.remove(&mut doc, container, EventType::Click);

    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();
    manager.remove(&mut doc, "#fields", EventType::ContextMenu);
    assert_eq!(doc.listener_count(container), 1);
    assert_eq!(manager.state(), ManagerState::Delegating);
}

#[test]
fn test_remove_stops_only_that_type() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click mouseover")]);
    let log = log();
    let manager = EventDelegationManager::new();
    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();

    manager.remove(&mut doc, "#fields", EventType::Click);
    doc.dispatch_event(&mut Event::click(children[0]));
    doc.dispatch_event(&mut Event::new(EventType::MouseOver, children[0]));

    assert_eq!(*log.borrow(), vec![("mouseover", Some(children[0]))]);
    assert_eq!(doc.listener_count(container), 1);
}

#[test]
fn test_destroy_detaches_everything() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click mouseover")]);
    let log = log();
    let manager = EventDelegationManager::new();
    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();

    manager.destroy(&mut doc);
    manager.destroy(&mut doc);

    doc.dispatch_event(&mut Event::click(children[0]));
    doc.dispatch_event(&mut Event::new(EventType::MouseOver, children[0]));
    assert!(log.borrow().is_empty());
    assert_eq!(doc.listeners().total(), 0);
    assert_eq!(manager.state(), ManagerState::Unconfigured);
    assert_eq!(manager.container(), None);
}

#[test]
fn test_resetup_replaces_previous_configuration() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click mouseover")]);
    let log = log();
    let manager = EventDelegationManager::new();

    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();
    manager
        .setup(
            &mut doc,
            container,
            Some(HandlerTable::new().on(EventType::Click, recorder(&log, "second"))),
        )
        .unwrap();

    assert_eq!(doc.listener_count(container), 1);
    assert_eq!(manager.registered_event_types(), vec![EventType::Click]);

    doc.dispatch_event(&mut Event::click(children[0]));
    doc.dispatch_event(&mut Event::new(EventType::MouseOver, children[0]));
    assert_eq!(*log.borrow(), vec![("second", Some(children[0]))]);
}

#[test]
fn test_handler_may_destroy_its_manager() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click")]);
    let fired = Rc::new(RefCell::new(0));
    let manager = EventDelegationManager::new();

    let handle = manager.clone();
    let counter = Rc::clone(&fired);
    let handlers = HandlerTable::new().on(EventType::Click, move |doc, _| {
        *counter.borrow_mut() += 1;
        handle.destroy(doc);
    });
    manager.setup(&mut doc, container, Some(handlers)).unwrap();

    doc.dispatch_event(&mut Event::click(children[0]));
    doc.dispatch_event(&mut Event::click(children[0]));

    assert_eq!(*fired.borrow(), 1);
    assert_eq!(doc.listener_count(container), 0);
    assert_eq!(manager.state(), ManagerState::Unconfigured);
}

#[test]
fn test_handler_may_reconfigure_its_manager() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click")]);
    let manager = EventDelegationManager::new();

    let handle = manager.clone();
    let handlers = HandlerTable::new().on(EventType::Click, move |doc, event| {
        let target = event.delegate_target.unwrap_or(NodeId::NONE);
        let container = doc.tree().parent(target).unwrap_or(NodeId::NONE);
        // Switch the same container over to drag-reorder mode
        handle.setup(doc, container, None).unwrap();
    });
    manager.setup(&mut doc, container, Some(handlers)).unwrap();

    doc.dispatch_event(&mut Event::click(children[0]));
    assert_eq!(manager.state(), ManagerState::Dragging);
    assert_eq!(doc.listener_count_for(container, EventType::Click), 0);
    assert_eq!(doc.listener_count(container), 4);
}

// ============================================================================
// DRAG REORDER
// ============================================================================

fn drag_list(doc: &mut Document) -> (NodeId, Vec<NodeId>) {
    fields(doc, &[None, None, None])
}

fn order(doc: &Document, container: NodeId) -> Vec<NodeId> {
    doc.tree().element_children(container).collect()
}

#[test]
fn test_setup_without_handlers_enables_drag_mode() {
    let mut doc = Document::new();
    let (container, children) = drag_list(&mut doc);
    let manager = EventDelegationManager::new();

    manager.setup(&mut doc, "#fields", None).unwrap();

    assert_eq!(manager.state(), ManagerState::Dragging);
    assert_eq!(doc.listener_count(container), 4);
    for event_type in deleg_events::DRAG_EVENTS {
        assert_eq!(doc.listener_count_for(container, event_type), 1);
    }
    assert!(children
        .iter()
        .all(|&c| doc.get_attribute(c, "draggable") == Some("true")));
}

#[test]
fn test_drop_inserts_before_target() {
    let mut doc = Document::new();
    let (container, items) = drag_list(&mut doc);
    let manager = EventDelegationManager::new();
    manager.setup(&mut doc, container, None).unwrap();

    doc.dispatch_event(&mut Event::new(EventType::DragStart, items[2]));
    assert_eq!(manager.dragged(), Some(items[2]));
    assert_eq!(doc.style(items[2]).unwrap().get_property("opacity"), Some("0.5"));

    assert!(!doc.dispatch_event(&mut Event::new(EventType::DragOver, items[0])));
    doc.dispatch_event(&mut Event::new(EventType::Drop, items[0]));
    doc.dispatch_event(&mut Event::new(EventType::DragEnd, items[2]));

    assert_eq!(order(&doc, container), vec![items[2], items[0], items[1]]);
    assert!(doc.style(items[2]).unwrap().get_property("opacity").is_none());
    assert_eq!(manager.dragged(), None);
}

#[test]
fn test_drop_with_shift_inserts_after_target() {
    let mut doc = Document::new();
    let (container, items) = drag_list(&mut doc);
    let manager = EventDelegationManager::new();
    manager.setup(&mut doc, container, None).unwrap();

    doc.dispatch_event(&mut Event::new(EventType::DragStart, items[2]));
    doc.dispatch_event(&mut Event::new(EventType::Drop, items[0]).with_shift(true));

    assert_eq!(order(&doc, container), vec![items[0], items[2], items[1]]);
}

#[test]
fn test_destroy_in_drag_mode() {
    let mut doc = Document::new();
    let (container, items) = drag_list(&mut doc);
    let manager = EventDelegationManager::new();
    manager.setup(&mut doc, container, None).unwrap();

    doc.dispatch_event(&mut Event::new(EventType::DragStart, items[1]));
    manager.destroy(&mut doc);
    manager.destroy(&mut doc);

    assert_eq!(doc.listener_count(container), 0);
    assert!(doc.style(items[1]).unwrap().get_property("opacity").is_none());

    doc.dispatch_event(&mut Event::new(EventType::Drop, items[0]));
    assert_eq!(order(&doc, container), items);
}

#[test]
fn test_resetup_from_drag_to_delegation() {
    let mut doc = Document::new();
    let (container, children) = fields(&mut doc, &[Some("click"), None]);
    let log = log();
    let manager = EventDelegationManager::new();

    manager.setup(&mut doc, container, None).unwrap();
    manager
        .setup(&mut doc, container, Some(click_and_hover(&log)))
        .unwrap();

    assert_eq!(manager.state(), ManagerState::Delegating);
    assert_eq!(doc.listener_count(container), 1);

    doc.dispatch_event(&mut Event::click(children[0]));
    assert_eq!(log.borrow().len(), 1);
}
