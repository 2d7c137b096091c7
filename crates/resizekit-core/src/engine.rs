//! Drag state machine for a resizable box.
//!
//! The engine owns at most one [`DragSession`]. A press on an enabled handle
//! opens it and acquires the host's top-level pointer capture; the capture
//! guard lives inside the dragging state, so release, cancel and teardown all
//! drop it. Every pointer move yields exactly one constrained size.

use std::fmt;
use std::mem;

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ResizableConfig;
use crate::geometry::candidate_size;
use crate::handles::Handle;
use crate::input::{MouseButton, PointerEvent};
use crate::session::DragSession;
use crate::surface::Surface;

/// Errors a host can report when measuring the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeasureError {
    #[error("Box is not attached to a live layout")]
    Detached,
}

/// Size written to the presentation. `None` leaves a dimension to the host's
/// own layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentedSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl PresentedSize {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

impl From<Size> for PresentedSize {
    fn from(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
        }
    }
}

/// The widget side of the engine: measurement, presentation and the
/// top-level pointer capture.
pub trait ResizeHost {
    /// Guard for the top-level move/release subscription. Dropping it must
    /// unsubscribe.
    type Capture;

    /// Current rendered size of the box.
    fn measure(&self) -> Result<Size, MeasureError>;

    /// Write a size to the presentation.
    fn apply_size(&mut self, size: PresentedSize);

    /// Reflect the dragging indicator on the container.
    fn set_dragging(&mut self, dragging: bool);

    /// Subscribe move/release/cancel at the top-level input scope.
    fn capture_pointer(&mut self) -> Self::Capture;
}

type SizeCallback = Box<dyn FnMut(Size)>;

/// Owner callbacks. Each receives a fresh size snapshot.
#[derive(Default)]
pub struct ResizeCallbacks {
    on_resize_start: Option<SizeCallback>,
    on_resize: Option<SizeCallback>,
    on_resize_end: Option<SizeCallback>,
}

impl ResizeCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the start size when a session opens.
    pub fn on_resize_start(mut self, f: impl FnMut(Size) + 'static) -> Self {
        self.on_resize_start = Some(Box::new(f));
        self
    }

    /// Called once per pointer move during a session.
    pub fn on_resize(mut self, f: impl FnMut(Size) + 'static) -> Self {
        self.on_resize = Some(Box::new(f));
        self
    }

    /// Called with the final size when a session ends.
    pub fn on_resize_end(mut self, f: impl FnMut(Size) + 'static) -> Self {
        self.on_resize_end = Some(Box::new(f));
        self
    }

    fn emit(callback: &mut Option<SizeCallback>, size: Size) {
        if let Some(f) = callback {
            f(size);
        }
    }
}

impl fmt::Debug for ResizeCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeCallbacks")
            .field("on_resize_start", &self.on_resize_start.is_some())
            .field("on_resize", &self.on_resize.is_some())
            .field("on_resize_end", &self.on_resize_end.is_some())
            .finish()
    }
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    Disabled,
    HandleNotEnabled,
    SessionAlreadyActive,
    NoActiveSession,
    SecondaryButton,
    NonFinitePointer,
}

/// Outcome of one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum ResizeEffect {
    Started(Size),
    Resized(Size),
    Ended(Size),
    Noop(NoopReason),
}

impl ResizeEffect {
    /// The press opened a session; the host must stop it propagating to
    /// ancestor click handling.
    pub fn consumes_press(&self) -> bool {
        matches!(self, ResizeEffect::Started(_))
    }

    /// The size carried by the effect, if any.
    pub fn size(&self) -> Option<Size> {
        match self {
            ResizeEffect::Started(size) | ResizeEffect::Resized(size) | ResizeEffect::Ended(size) => Some(*size),
            ResizeEffect::Noop(_) => None,
        }
    }
}

enum DragState<C> {
    Idle,
    Dragging { session: DragSession, _capture: C },
}

/// Interactive resize engine for one box.
pub struct ResizeEngine<H: ResizeHost> {
    host: H,
    config: ResizableConfig,
    callbacks: ResizeCallbacks,
    state: DragState<H::Capture>,
    /// Configuration supplied mid-session, applied once it ends.
    pending_config: Option<ResizableConfig>,
    last_size: Option<Size>,
}

impl<H: ResizeHost> ResizeEngine<H> {
    /// Create an idle engine and render the controlled baseline, if any.
    pub fn new(host: H, config: ResizableConfig, callbacks: ResizeCallbacks) -> Self {
        let mut engine = Self {
            host,
            config: ResizableConfig::default(),
            callbacks,
            state: DragState::Idle,
            pending_config: None,
            last_size: None,
        };
        engine.apply_config(config);
        engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The configuration currently in effect.
    pub fn config(&self) -> &ResizableConfig {
        &self.config
    }

    /// Check if a drag session is open.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging { session, .. } => Some(session),
            DragState::Idle => None,
        }
    }

    /// Last size reported through a callback.
    pub fn last_size(&self) -> Option<Size> {
        self.last_size
    }

    /// Describe the rendered container and handles.
    pub fn surface(&self) -> Surface {
        Surface::for_config(&self.config, self.is_dragging())
    }

    /// Replace the configuration. Deferred until the session ends while
    /// dragging.
    pub fn set_config(&mut self, config: ResizableConfig) {
        if self.is_dragging() {
            log::debug!("Deferring config update until drag ends");
            self.pending_config = Some(config);
        } else {
            self.apply_config(config);
        }
    }

    /// Update the controlled size. While dragging the engine stays the sole
    /// writer; the value is applied when the session ends.
    pub fn set_controlled_size(&mut self, width: Option<f64>, height: Option<f64>) {
        if self.is_dragging() {
            let pending = self.pending_config.get_or_insert_with(|| self.config.clone());
            pending.width = width;
            pending.height = height;
            log::debug!("Deferring controlled size {:?}x{:?} until drag ends", width, height);
        } else {
            let config = self.config.clone().with_controlled_size(width, height);
            self.apply_config(config);
        }
    }

    fn apply_config(&mut self, config: ResizableConfig) {
        let baseline = PresentedSize {
            width: config.width,
            height: config.height,
        };
        self.config = config;
        if !baseline.is_empty() {
            log::debug!("Applying controlled size {:?}", baseline);
            self.host.apply_size(baseline);
        }
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> ResizeEffect {
        match event {
            PointerEvent::Down { handle, position, button } => self.pointer_down(handle, position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Cancel => self.pointer_cancel(),
        }
    }

    /// Press on a handle. Opens a session when the box and handle are
    /// enabled and no session is open.
    pub fn pointer_down(&mut self, handle: Handle, position: Point, button: MouseButton) -> ResizeEffect {
        if self.is_dragging() {
            return ResizeEffect::Noop(NoopReason::SessionAlreadyActive);
        }
        if self.config.disabled {
            return ResizeEffect::Noop(NoopReason::Disabled);
        }
        if !self.config.handles.contains(handle) {
            return ResizeEffect::Noop(NoopReason::HandleNotEnabled);
        }
        if button != MouseButton::Left {
            return ResizeEffect::Noop(NoopReason::SecondaryButton);
        }
        if !position.is_finite() {
            return ResizeEffect::Noop(NoopReason::NonFinitePointer);
        }

        let start_size = self.measure_start_size();
        let session = DragSession::new(handle, position, start_size, self.config.preserve_aspect_ratio);
        log::debug!(
            "Resize started on {} at {:?}, start size {}x{}",
            handle,
            position,
            start_size.width,
            start_size.height
        );

        ResizeCallbacks::emit(&mut self.callbacks.on_resize_start, start_size);
        let capture = self.host.capture_pointer();
        self.host.set_dragging(true);
        self.state = DragState::Dragging {
            session,
            _capture: capture,
        };
        self.last_size = Some(start_size);

        ResizeEffect::Started(start_size)
    }

    /// Pointer movement during a session.
    pub fn pointer_move(&mut self, position: Point) -> ResizeEffect {
        let DragState::Dragging { session, .. } = &mut self.state else {
            return ResizeEffect::Noop(NoopReason::NoActiveSession);
        };
        if !position.is_finite() {
            return ResizeEffect::Noop(NoopReason::NonFinitePointer);
        }

        let candidate = candidate_size(session.handle, session.start_size, session.delta(position));
        let size = self
            .config
            .constraints()
            .apply(session.handle, candidate, session.start_aspect_ratio);
        session.current = size;
        log::trace!("Resize to {}x{}", size.width, size.height);

        self.host.apply_size(size.into());
        ResizeCallbacks::emit(&mut self.callbacks.on_resize, size);
        self.last_size = Some(size);

        ResizeEffect::Resized(size)
    }

    /// Pointer release. Commits the last computed size.
    pub fn pointer_up(&mut self) -> ResizeEffect {
        self.end_session()
    }

    /// Pointer cancel. Commits like a release; there is no abort.
    pub fn pointer_cancel(&mut self) -> ResizeEffect {
        self.end_session()
    }

    /// End any open session, as when the widget is torn down.
    pub fn teardown(&mut self) {
        if self.is_dragging() {
            log::debug!("Tearing down with an open resize session");
            self.end_session();
        }
    }

    fn measure_start_size(&self) -> Size {
        match self.host.measure() {
            Ok(size) => Size::new(sanitize_dimension(size.width), sanitize_dimension(size.height)),
            Err(e) => {
                log::warn!("Failed to measure box, starting from zero size: {}", e);
                Size::ZERO
            }
        }
    }

    fn end_session(&mut self) -> ResizeEffect {
        let DragState::Dragging {
            session,
            _capture: capture,
        } = mem::replace(&mut self.state, DragState::Idle)
        else {
            return ResizeEffect::Noop(NoopReason::NoActiveSession);
        };
        drop(capture);
        self.host.set_dragging(false);

        let size = session.current;
        log::debug!("Resize ended on {} at {}x{}", session.handle, size.width, size.height);
        ResizeCallbacks::emit(&mut self.callbacks.on_resize_end, size);
        self.last_size = Some(size);

        if let Some(config) = self.pending_config.take() {
            self.apply_config(config);
        }

        ResizeEffect::Ended(size)
    }
}

impl<H: ResizeHost> Drop for ResizeEngine<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<H: ResizeHost + fmt::Debug> fmt::Debug for ResizeEngine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeEngine")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("session", &self.session())
            .field("last_size", &self.last_size)
            .finish()
    }
}

fn sanitize_dimension(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
