//! Owner-supplied configuration for a resizable box.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constraints::{AxisBounds, Constraints, DEFAULT_STEP};
use crate::handles::{Handle, HandleSet};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid resize configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration of a resizable box.
///
/// Misconfigured bounds or steps are accepted as-is and normalized when
/// [`constraints`](Self::constraints) is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizableConfig {
    /// Which handles are rendered and accept presses.
    pub handles: HandleSet,
    pub min_width: f64,
    pub min_height: f64,
    /// Maximum width. `null` in JSON means unbounded.
    #[serde(with = "unbounded")]
    pub max_width: f64,
    /// Maximum height. `null` in JSON means unbounded.
    #[serde(with = "unbounded")]
    pub max_height: f64,
    /// Grid unit sizes snap up to.
    pub step: f64,
    /// Lock width:height to the ratio at the start of each drag.
    pub preserve_aspect_ratio: bool,
    /// Hide handles and ignore presses.
    pub disabled: bool,
    /// Only show handles while the box is hovered. Presentation only.
    pub show_handles_on_hover: bool,
    /// Controlled width the box renders from while idle.
    pub width: Option<f64>,
    /// Controlled height the box renders from while idle.
    pub height: Option<f64>,
}

impl Default for ResizableConfig {
    fn default() -> Self {
        Self {
            handles: HandleSet::all(),
            min_width: 0.0,
            min_height: 0.0,
            max_width: f64::INFINITY,
            max_height: f64::INFINITY,
            step: DEFAULT_STEP,
            preserve_aspect_ratio: false,
            disabled: false,
            show_handles_on_hover: false,
            width: None,
            height: None,
        }
    }
}

impl ResizableConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Set the enabled handles.
    pub fn with_handles(mut self, handles: impl IntoIterator<Item = Handle>) -> Self {
        self.handles = handles.into_iter().collect();
        self
    }

    /// Set the minimum size.
    pub fn with_min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Set the maximum size.
    pub fn with_max_size(mut self, width: f64, height: f64) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }

    /// Set the snapping step.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Enable or disable aspect-ratio locking.
    pub fn with_preserve_aspect_ratio(mut self, preserve: bool) -> Self {
        self.preserve_aspect_ratio = preserve;
        self
    }

    /// Enable or disable the box.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Show handles only on hover.
    pub fn with_handles_on_hover(mut self, on_hover: bool) -> Self {
        self.show_handles_on_hover = on_hover;
        self
    }

    /// Set the controlled size. `None` leaves that dimension to the host.
    pub fn with_controlled_size(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Normalized constraint pipeline for this configuration.
    pub fn constraints(&self) -> Constraints {
        Constraints::new(
            AxisBounds::normalized(self.min_width, self.max_width),
            AxisBounds::normalized(self.min_height, self.max_height),
            self.step,
        )
    }

    /// Check if a handle accepts presses under this configuration.
    pub fn accepts(&self, handle: Handle) -> bool {
        !self.disabled && self.handles.contains(handle)
    }
}

/// Serde adapter mapping an infinite maximum to `null`.
mod unbounded {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
