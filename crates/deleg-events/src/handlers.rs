//! Handler tables

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use deleg_dom::{Document, Event, EventType};

use crate::interest::is_delegated;

/// Delegated event callback
pub type Handler = deleg_dom::Listener;

/// Event type to callback mapping supplied at setup
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: BTreeMap<EventType, Handler>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`HandlerTable::insert`]
    pub fn on(mut self, event_type: EventType, f: impl Fn(&mut Document, &mut Event) + 'static) -> Self {
        self.insert(event_type, Rc::new(f));
        self
    }

    /// Set the handler for a type, returning the previous one
    pub fn insert(&mut self, event_type: EventType, handler: Handler) -> Option<Handler> {
        self.handlers.insert(event_type, handler)
    }

    /// Set a handler by platform event name; unknown names are ignored
    pub fn insert_named(&mut self, name: &str, f: impl Fn(&mut Document, &mut Event) + 'static) -> bool {
        match name.parse::<EventType>() {
            Ok(event_type) => {
                self.insert(event_type, Rc::new(f));
                true
            }
            Err(err) => {
                tracing::debug!(%err, "handler ignored");
                false
            }
        }
    }

    pub fn get(&self, event_type: EventType) -> Option<&Handler> {
        self.handlers.get(&event_type)
    }

    pub fn contains(&self, event_type: EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    /// Event types with a handler, in a stable order
    pub fn event_types(&self) -> impl Iterator<Item = EventType> + '_ {
        self.handlers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Drop handlers for types outside the delegated set
    pub fn into_supported(mut self) -> Self {
        self.handlers.retain(|event_type, _| {
            let keep = is_delegated(*event_type);
            if !keep {
                tracing::debug!(%event_type, "unsupported delegated event type dropped");
            }
            keep
        });
        self
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
