//! ResizeKit Core Library
//!
//! Headless engine behind a resizable box widget: eight drag handles,
//! pointer-driven size computation, step snapping, bounds clamping and
//! aspect-ratio locking. Hosts supply measurement, presentation and a
//! top-level pointer capture through [`ResizeHost`].

pub mod config;
pub mod constraints;
pub mod engine;
pub mod geometry;
pub mod handles;
pub mod input;
pub mod session;
pub mod surface;

pub use config::{ConfigError, ResizableConfig};
pub use constraints::{AxisBounds, Constraints, clamp_dimension, snap_to_step};
pub use engine::{MeasureError, NoopReason, PresentedSize, ResizeCallbacks, ResizeEffect, ResizeEngine, ResizeHost};
pub use geometry::{candidate_size, drag_delta};
pub use handles::{Handle, HandleSet, Orientation, UnknownHandle, resolve_handles};
pub use input::{MouseButton, PointerEvent};
pub use session::DragSession;
pub use surface::{ContainerState, HandleElement, Role, Surface};
