//! State of an active drag session.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::drag_delta;
use crate::handles::Handle;

/// An open drag on one handle.
///
/// Exists only between a qualifying press and the matching release, cancel
/// or teardown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// The handle being dragged.
    pub handle: Handle,
    /// Pointer position at the press.
    pub origin: Point,
    /// Rendered box size at the press.
    pub start_size: Size,
    /// Width / height at the press, when aspect locking is on and the
    /// start box has a usable ratio.
    pub start_aspect_ratio: Option<f64>,
    /// Last constrained size, reported as final when the session ends.
    pub current: Size,
}

impl DragSession {
    /// Open a session. `preserve_aspect_ratio` captures the start ratio.
    pub fn new(handle: Handle, origin: Point, start_size: Size, preserve_aspect_ratio: bool) -> Self {
        let start_aspect_ratio = if preserve_aspect_ratio && start_size.width > 0.0 && start_size.height > 0.0 {
            Some(start_size.width / start_size.height)
        } else {
            None
        };

        Self {
            handle,
            origin,
            start_size,
            start_aspect_ratio,
            current: start_size,
        }
    }

    /// Pointer displacement from the origin.
    pub fn delta(&self, position: Point) -> Vec2 {
        drag_delta(self.origin, position)
    }
}
