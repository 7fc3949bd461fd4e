//! Example: delegated clicks on one list, drag-reorder on another

use deleg_events::dom::{Document, DomResult, Event, EventType, NodeId};
use deleg_events::{EventDelegationManager, HandlerTable};

fn list(doc: &mut Document, id: &str, labels: &[&str], marker: Option<&str>) -> DomResult<Vec<NodeId>> {
    let body = doc.body();
    let ul = doc.create_element("ul");
    doc.set_attribute(ul, "id", id)?;
    doc.tree_mut().append_child(body, ul)?;

    let mut items = Vec::with_capacity(labels.len());
    for label in labels {
        let li = doc.create_element("li");
        if let Some(marker) = marker {
            doc.set_attribute(li, "data-event-list", marker)?;
        }
        doc.set_attribute(li, "data-label", label)?;
        doc.tree_mut().append_child(ul, li)?;
        items.push(li);
    }
    Ok(items)
}

fn labels(doc: &Document, container: NodeId) -> Vec<String> {
    doc.tree()
        .element_children(container)
        .filter_map(|li| doc.get_attribute(li, "data-label").map(str::to_string))
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut doc = Document::new();
    let menu = list(&mut doc, "menu", &["open", "save", "quit"], Some("click"))?;
    let fields = list(&mut doc, "fields", &["name", "email", "phone"], None)?;

    let clicks = EventDelegationManager::new();
    let handlers = HandlerTable::new().on(EventType::Click, |doc, event| {
        let label = event
            .delegate_target
            .and_then(|li| doc.get_attribute(li, "data-label").map(str::to_string))
            .unwrap_or_default();
        println!("menu item clicked: {label}");
    });
    clicks.setup(&mut doc, "#menu", Some(handlers))?;

    let reorder = EventDelegationManager::new();
    reorder.setup(&mut doc, "#fields", None)?;

    doc.dispatch_event(&mut Event::click(menu[1]));

    // Drag "phone" to the top
    doc.dispatch_event(&mut Event::new(EventType::DragStart, fields[2]));
    doc.dispatch_event(&mut Event::new(EventType::DragOver, fields[0]));
    doc.dispatch_event(&mut Event::new(EventType::Drop, fields[0]));
    doc.dispatch_event(&mut Event::new(EventType::DragEnd, fields[2]));

    if let Some(container) = doc.query_selector("#fields") {
        println!("field order: {:?}", labels(&doc, container));
    }

    clicks.destroy(&mut doc);
    reorder.destroy(&mut doc);
    println!("listeners left: {}", doc.listeners().total());
    Ok(())
}
