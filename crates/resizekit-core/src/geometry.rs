//! Pointer displacement to candidate size.

use kurbo::{Point, Size, Vec2};

use crate::handles::Handle;

/// Pointer displacement from the drag origin.
pub fn drag_delta(origin: Point, current: Point) -> Vec2 {
    Vec2::new(current.x - origin.x, current.y - origin.y)
}

/// Compute the unconstrained size for a drag on `handle`.
///
/// Each dimension responds to the displacement along its own axis scaled by
/// the handle's sign for that axis. Dimensions the handle does not drive keep
/// their start value. The result may be negative; constraints fix that up.
pub fn candidate_size(handle: Handle, start: Size, delta: Vec2) -> Size {
    let sx = handle.horizontal_sign();
    let sy = handle.vertical_sign();

    let width = if sx == 0.0 { start.width } else { start.width + sx * delta.x };
    let height = if sy == 0.0 { start.height } else { start.height + sy * delta.y };

    Size::new(width, height)
}
