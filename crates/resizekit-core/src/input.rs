//! Pointer events delivered to the resize engine.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::handles::Handle;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button (or a touch/pen contact).
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
///
/// `Down` comes from a handle element. `Move`, `Up` and `Cancel` come from
/// the top-level capture scope and are only routed while a session holds it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        handle: Handle,
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
    Cancel,
}

impl PointerEvent {
    /// Primary-button press on a handle.
    pub fn press(handle: Handle, x: f64, y: f64) -> Self {
        PointerEvent::Down {
            handle,
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// Pointer movement.
    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move { position: Point::new(x, y) }
    }

    /// Pointer release.
    pub fn release(x: f64, y: f64) -> Self {
        PointerEvent::Up { position: Point::new(x, y) }
    }

    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => Some(*position),
            PointerEvent::Cancel => None,
        }
    }
}
