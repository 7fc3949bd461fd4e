//! Event delegation for container elements
//!
//! One listener per event type is attached to a container; events are
//! routed to the innermost child that declared interest through a marker
//! attribute. Without a handler table the container instead becomes a
//! drag-to-reorder list.
//!
//! ```ignore
//! use deleg_events::{EventDelegationManager, HandlerTable};
//! use deleg_events::dom::{Document, EventType};
//!
//! let manager = EventDelegationManager::new();
//! let handlers = HandlerTable::new().on(EventType::Click, |_doc, event| {
//!     println!("clicked {:?}", event.delegate_target);
//! });
//! manager.setup(&mut doc, "#fields", Some(handlers))?;
//! ```

mod config;
mod container;
mod drag;
mod error;
mod handlers;
mod interest;
mod manager;

pub use config::{DelegationConfig, Modifier, ScanDepth};
pub use container::Container;
pub use drag::DragReorderController;
pub use error::{DelegateError, DelegateResult};
pub use handlers::{Handler, HandlerTable};
pub use interest::{DELEGATED_EVENTS, DRAG_EVENTS, InterestDeclaration, is_delegated};
pub use manager::{EventDelegationManager, ManagerState};

// Re-export the DOM host for callers building documents
pub use deleg_dom as dom;
