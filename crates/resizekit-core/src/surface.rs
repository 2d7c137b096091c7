//! Host-neutral description of the rendered box and its handles.

use serde::{Deserialize, Serialize};

use crate::config::ResizableConfig;
use crate::handles::{Handle, Orientation};

/// Accessibility role of a handle element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Separator,
}

/// One focusable handle element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleElement {
    pub handle: Handle,
    pub role: Role,
    /// Orientation of the handle bar; `None` for corners.
    pub orientation: Option<Orientation>,
    pub label: String,
    /// Handles are tab stops. No keyboard gesture is bound to them.
    pub tab_index: i32,
}

impl HandleElement {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            role: Role::Separator,
            orientation: handle.orientation(),
            label: handle.label(),
            tab_index: 0,
        }
    }
}

/// State flags reflected on the container element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerState {
    pub disabled: bool,
    pub handles_on_hover: bool,
    /// True for the lifetime of an open drag session.
    pub dragging: bool,
}

impl ContainerState {
    /// Data attributes for the flags that are set.
    pub fn data_attributes(&self) -> Vec<(&'static str, &'static str)> {
        let mut attrs = Vec::new();
        if self.disabled {
            attrs.push(("data-disabled", "true"));
        }
        if self.handles_on_hover {
            attrs.push(("data-hover-handles", "true"));
        }
        if self.dragging {
            attrs.push(("data-dragging", "true"));
        }
        attrs
    }
}

/// The container plus one element per rendered handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub container: ContainerState,
    pub handles: Vec<HandleElement>,
}

impl Surface {
    /// Describe the surface for a configuration. Disabled boxes render no
    /// handles.
    pub fn for_config(config: &ResizableConfig, dragging: bool) -> Self {
        let handles = if config.disabled {
            Vec::new()
        } else {
            config.handles.iter().map(HandleElement::new).collect()
        };

        Self {
            container: ContainerState {
                disabled: config.disabled,
                handles_on_hover: config.show_handles_on_hover,
                dragging,
            },
            handles,
        }
    }
}
