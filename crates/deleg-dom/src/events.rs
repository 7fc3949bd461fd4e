//! DOM Events
//!
//! Mouse and drag-and-drop events with modifier state.

use std::fmt;
use std::str::FromStr;

use crate::NodeId;

/// Event types understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    Click,
    DblClick,
    MouseDown,
    MouseUp,
    MouseMove,
    MouseOver,
    MouseOut,
    MouseEnter,
    MouseLeave,
    ContextMenu,
    DragStart,
    Drag,
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
    DragEnd,
}

impl EventType {
    /// Every event type, in declaration order
    pub const ALL: [EventType; 17] = [
        Self::Click,
        Self::DblClick,
        Self::MouseDown,
        Self::MouseUp,
        Self::MouseMove,
        Self::MouseOver,
        Self::MouseOut,
        Self::MouseEnter,
        Self::MouseLeave,
        Self::ContextMenu,
        Self::DragStart,
        Self::Drag,
        Self::DragEnter,
        Self::DragOver,
        Self::DragLeave,
        Self::Drop,
        Self::DragEnd,
    ];

    /// Platform event name (`"click"`, `"dragstart"`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DblClick => "dblclick",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::MouseMove => "mousemove",
            Self::MouseOver => "mouseover",
            Self::MouseOut => "mouseout",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::ContextMenu => "contextmenu",
            Self::DragStart => "dragstart",
            Self::Drag => "drag",
            Self::DragEnter => "dragenter",
            Self::DragOver => "dragover",
            Self::DragLeave => "dragleave",
            Self::Drop => "drop",
            Self::DragEnd => "dragend",
        }
    }

    /// Look up an event type by its platform name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Check if this event type bubbles
    pub fn bubbles(&self) -> bool {
        !matches!(self, Self::MouseEnter | Self::MouseLeave)
    }

    /// Check if default action can be prevented
    pub fn cancelable(&self) -> bool {
        !matches!(
            self,
            Self::MouseEnter | Self::MouseLeave | Self::DragLeave | Self::DragEnd
        )
    }

    /// Check if this is a drag-and-drop event
    pub fn is_drag(&self) -> bool {
        matches!(
            self,
            Self::DragStart
                | Self::Drag
                | Self::DragEnter
                | Self::DragOver
                | Self::DragLeave
                | Self::Drop
                | Self::DragEnd
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised event name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownEventType(s.to_string()))
    }
}

/// Data transfer for drag operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    items: Vec<(String, String)>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set data for a type
    pub fn set_data(&mut self, mime_type: &str, data: &str) {
        self.items.retain(|(mt, _)| mt != mime_type);
        self.items.push((mime_type.to_string(), data.to_string()));
    }

    /// Get data for a type
    pub fn get_data(&self, mime_type: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(mt, _)| mt == mime_type)
            .map(|(_, d)| d.as_str())
    }

    /// Registered types
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(mt, _)| mt.as_str())
    }
}

/// Dispatched event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: Option<NodeId>,
    /// Element a delegating listener matched this event to
    pub delegate_target: Option<NodeId>,

    // Coordinates
    pub client_x: f64,
    pub client_y: f64,

    // Modifiers
    pub shift_key: bool,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,

    /// Drag payload (drag events only)
    pub data_transfer: Option<DataTransfer>,

    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event of `event_type` aimed at `target`
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            delegate_target: None,
            client_x: 0.0,
            client_y: 0.0,
            shift_key: false,
            ctrl_key: false,
            alt_key: false,
            meta_key: false,
            data_transfer: event_type.is_drag().then(DataTransfer::new),
            bubbles: event_type.bubbles(),
            cancelable: event_type.cancelable(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create a click event
    pub fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, target)
    }

    /// Set pointer coordinates
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.client_x = x;
        self.client_y = y;
        self
    }

    /// Set the shift modifier
    pub fn with_shift(mut self, held: bool) -> Self {
        self.shift_key = held;
        self
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation after the current node
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Clear per-dispatch state so a finished event can be dispatched again
    pub(crate) fn reset_dispatch(&mut self) {
        self.current_target = None;
        self.delegate_target = None;
        self.propagation_stopped = false;
    }
}
