//! Delegation Configuration

use deleg_dom::Event;
use serde::{Deserialize, Serialize};

/// Manager configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegationConfig {
    /// Attribute holding a child's whitespace-separated event list
    pub marker_attribute: String,

    /// How far below the container interest declarations are read
    pub scan_depth: ScanDepth,

    /// Opacity applied to the element being dragged
    pub drag_opacity: String,

    /// Modifier that makes a drop insert after the target instead of before
    pub reorder_modifier: Modifier,
}

impl Default for DelegationConfig {
    fn default() -> Self {
        Self {
            marker_attribute: "data-event-list".to_string(),
            scan_depth: ScanDepth::Children,
            drag_opacity: "0.5".to_string(),
            reorder_modifier: Modifier::Shift,
        }
    }
}

/// Interest declaration scan depth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanDepth {
    /// Direct children of the container only
    #[default]
    Children,
    /// Every element below the container
    Subtree,
}

/// Keyboard modifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    #[default]
    Shift,
    Ctrl,
    Alt,
    Meta,
}

impl Modifier {
    /// Check whether the modifier was held when `event` fired
    pub fn is_held(&self, event: &Event) -> bool {
        match self {
            Self::Shift => event.shift_key,
            Self::Ctrl => event.ctrl_key,
            Self::Alt => event.alt_key,
            Self::Meta => event.meta_key,
        }
    }
}
