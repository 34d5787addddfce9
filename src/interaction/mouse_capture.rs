use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Interval, LinearScale, Scale, zoom_factor_from_wheel_delta};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionConfig;

/// Pointer movement, in pixels on each axis, still treated as a click.
pub const CLICK_TOLERANCE_PX: f64 = 2.0;
pub const DEFAULT_ZOOM_SPEED: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
    Other(u16),
}

/// A mouse down/up/move/leave event in client (device pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    #[serde(default)]
    pub button: MouseButton,
    #[serde(default)]
    pub shift_key: bool,
}

impl PointerEvent {
    #[must_use]
    pub fn primary(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            button: MouseButton::Primary,
            shift_key: false,
        }
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    #[serde(default)]
    pub shift_key: bool,
}

impl WheelEvent {
    /// Scroll amount used for zooming.
    ///
    /// Some browsers turn shift+wheel into horizontal scrolling, leaving
    /// `delta_y` at zero; with shift held, `delta_x` stands in for it.
    #[must_use]
    pub fn zoom_delta(&self) -> f64 {
        if self.shift_key && (self.delta_y == 0.0 || self.delta_y.is_nan()) {
            self.delta_x
        } else {
            self.delta_y
        }
    }
}

/// Bounding box of the capture element in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ElementBounds {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Position as fractions of the box: (0, 0) top-left, (1, 1) bottom-right.
    #[must_use]
    pub fn to_logical(&self, client_x: f64, client_y: f64) -> LogicalPosition {
        let unit = Interval::new(0.0, 1.0);
        let x_scale = LinearScale::new(Interval::new(self.left, self.right), unit);
        let y_scale = LinearScale::new(Interval::new(self.top, self.bottom), unit);
        LogicalPosition {
            x: x_scale.map(client_x),
            y: y_scale.map(client_y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalPosition {
    pub x: f64,
    pub y: f64,
}

/// Wheel zoom sensitivity: fixed, or computed from each event.
#[derive(Clone)]
pub enum ZoomSpeed {
    Constant(f64),
    PerEvent(Arc<dyn Fn(&WheelEvent) -> f64 + Send + Sync>),
}

impl ZoomSpeed {
    pub fn per_event<F>(speed: F) -> Self
    where
        F: Fn(&WheelEvent) -> f64 + Send + Sync + 'static,
    {
        Self::PerEvent(Arc::new(speed))
    }

    #[must_use]
    pub fn resolve(&self, event: &WheelEvent) -> f64 {
        match self {
            Self::Constant(speed) => *speed,
            Self::PerEvent(speed) => speed(event),
        }
    }
}

impl Default for ZoomSpeed {
    fn default() -> Self {
        Self::Constant(DEFAULT_ZOOM_SPEED)
    }
}

impl fmt::Debug for ZoomSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(speed) => f.debug_tuple("Constant").field(speed).finish(),
            Self::PerEvent(_) => f.write_str("PerEvent(..)"),
        }
    }
}

/// Receiver of gestures recognized by [`MouseCapture`].
///
/// Positions are logical fractions of the capture element. Every method
/// defaults to doing nothing.
pub trait CaptureHandler {
    fn on_zoom(&mut self, _factor: f64, _position: LogicalPosition, _event: &WheelEvent) {}
    fn on_drag_start(&mut self, _position: LogicalPosition, _event: &PointerEvent) {}
    fn on_drag(&mut self, _position: LogicalPosition, _event: &PointerEvent) {}
    fn on_drag_end(&mut self, _position: LogicalPosition, _event: &PointerEvent) {}
    fn on_click(&mut self, _position: LogicalPosition, _event: &PointerEvent) {}
    /// `None` when the pointer leaves the element.
    fn on_hover(&mut self, _position: Option<LogicalPosition>, _event: &PointerEvent) {}
}

/// Turns raw pointer and wheel events into drag, click, hover and zoom
/// gestures.
///
/// Element bounds are passed with every event since the element may move or
/// resize between events.
#[derive(Debug, Clone, Default)]
pub struct MouseCapture {
    zoom_speed: ZoomSpeed,
    mouse_down: Option<(f64, f64)>,
    last_mouse_move: Option<(f64, f64)>,
}

impl MouseCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zoom_speed(zoom_speed: ZoomSpeed) -> ChartResult<Self> {
        if let ZoomSpeed::Constant(speed) = zoom_speed {
            if !speed.is_finite() {
                return Err(ChartError::InvalidArgument(
                    "zoom speed must be finite".to_owned(),
                ));
            }
        }
        Ok(Self {
            zoom_speed,
            ..Self::default()
        })
    }

    /// Capture that zooms at the configured constant speed.
    pub fn from_config(config: &InteractionConfig) -> ChartResult<Self> {
        Self::with_zoom_speed(ZoomSpeed::Constant(config.zoom_speed))
    }

    #[must_use]
    pub fn zoom_speed(&self) -> &ZoomSpeed {
        &self.zoom_speed
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.mouse_down.is_some()
    }

    #[must_use]
    pub fn last_mouse_move(&self) -> Option<(f64, f64)> {
        self.last_mouse_move
    }

    fn clear(&mut self) {
        self.mouse_down = None;
        self.last_mouse_move = None;
    }

    fn dispatch_drag<H, F>(&self, event: &PointerEvent, bounds: ElementBounds, handler: &mut H, on: F)
    where
        H: CaptureHandler + ?Sized,
        F: FnOnce(&mut H, LogicalPosition, &PointerEvent),
    {
        if event.button == MouseButton::Primary && self.mouse_down.is_some() {
            on(handler, bounds.to_logical(event.client_x, event.client_y), event);
        }
    }

    pub fn mouse_down<H>(&mut self, event: &PointerEvent, bounds: ElementBounds, handler: &mut H)
    where
        H: CaptureHandler + ?Sized,
    {
        if event.button != MouseButton::Primary {
            return;
        }
        self.mouse_down = Some((event.client_x, event.client_y));
        self.last_mouse_move = Some((event.client_x, event.client_y));
        trace!(x = event.client_x, y = event.client_y, "drag start");
        handler.on_drag_start(bounds.to_logical(event.client_x, event.client_y), event);
    }

    pub fn mouse_move<H>(&mut self, event: &PointerEvent, bounds: ElementBounds, handler: &mut H)
    where
        H: CaptureHandler + ?Sized,
    {
        self.dispatch_drag(event, bounds, handler, H::on_drag);
        handler.on_hover(Some(bounds.to_logical(event.client_x, event.client_y)), event);
        self.last_mouse_move = Some((event.client_x, event.client_y));
    }

    /// Ends a drag; a release close enough to the press also counts as a
    /// click.
    pub fn mouse_up<H>(&mut self, event: &PointerEvent, bounds: ElementBounds, handler: &mut H)
    where
        H: CaptureHandler + ?Sized,
    {
        self.dispatch_drag(event, bounds, handler, H::on_drag_end);

        if event.button == MouseButton::Primary {
            if let Some((down_x, down_y)) = self.mouse_down {
                if (down_x - event.client_x).abs() <= CLICK_TOLERANCE_PX
                    && (down_y - event.client_y).abs() <= CLICK_TOLERANCE_PX
                {
                    trace!(x = event.client_x, y = event.client_y, "click");
                    handler.on_click(bounds.to_logical(event.client_x, event.client_y), event);
                }
            }
        }

        self.clear();
    }

    pub fn mouse_leave<H>(&mut self, event: &PointerEvent, bounds: ElementBounds, handler: &mut H)
    where
        H: CaptureHandler + ?Sized,
    {
        self.dispatch_drag(event, bounds, handler, H::on_drag_end);
        handler.on_hover(None, event);
        self.clear();
    }

    /// Zero and NaN deltas are ignored.
    pub fn wheel<H>(&mut self, event: &WheelEvent, bounds: ElementBounds, handler: &mut H)
    where
        H: CaptureHandler + ?Sized,
    {
        let delta = event.zoom_delta();
        if delta == 0.0 || delta.is_nan() {
            return;
        }
        let factor = zoom_factor_from_wheel_delta(delta, self.zoom_speed.resolve(event));
        trace!(delta, factor, "wheel zoom");
        handler.on_zoom(factor, bounds.to_logical(event.client_x, event.client_y), event);
    }
}
