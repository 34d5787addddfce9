use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Interval, pan_interval, zoom_interval};
use crate::interaction::{
    CaptureHandler, DEFAULT_ZOOM_SPEED, LogicalPosition, PointerEvent, WheelEvent,
};

/// Which gestures an [`InteractionCapture`] reacts to, and how fast the
/// wheel zooms once fed to
/// [`MouseCapture::from_config`](crate::interaction::MouseCapture::from_config).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub enable_hover: bool,
    pub enable_brush: bool,
    pub zoom_speed: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            enable_pan: true,
            enable_zoom: true,
            enable_hover: false,
            enable_brush: false,
            zoom_speed: DEFAULT_ZOOM_SPEED,
        }
    }
}

/// Per-event veto over gestures that are enabled.
pub trait InteractionPolicy {
    fn should_zoom(&self, _event: &WheelEvent) -> bool {
        true
    }

    fn should_pan(&self, _event: &PointerEvent) -> bool {
        true
    }

    /// A drag that starts while this holds brushes instead of panning.
    fn should_brush(&self, event: &PointerEvent) -> bool {
        event.shift_key
    }
}

/// Pan and zoom always, brush with shift held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultInteractionPolicy;

impl InteractionPolicy for DefaultInteractionPolicy {}

/// A change the host should make to its view state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ViewportAction {
    SetXDomain(Interval),
    SetSelection(Option<Interval>),
    SetHover(Option<f64>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragMode {
    Idle,
    Panning { last_x: f64 },
    Brushing { start_x: f64 },
}

/// Gesture-to-viewport translator.
///
/// Feed it through [`MouseCapture`](crate::interaction::MouseCapture) and
/// drain [`take_actions`](Self::take_actions) after each event. The X domain
/// it works against is whatever the host last passed to
/// [`set_x_domain`](Self::set_x_domain), advanced by the actions it has
/// emitted since.
#[derive(Debug, Clone)]
pub struct InteractionCapture<P = DefaultInteractionPolicy> {
    config: InteractionConfig,
    policy: P,
    x_domain: Interval,
    drag: DragMode,
    actions: Vec<ViewportAction>,
}

impl InteractionCapture<DefaultInteractionPolicy> {
    #[must_use]
    pub fn new(config: InteractionConfig, x_domain: Interval) -> Self {
        Self::with_policy(config, x_domain, DefaultInteractionPolicy)
    }
}

impl<P: InteractionPolicy> InteractionCapture<P> {
    #[must_use]
    pub fn with_policy(config: InteractionConfig, x_domain: Interval, policy: P) -> Self {
        Self {
            config,
            policy,
            x_domain,
            drag: DragMode::Idle,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> InteractionConfig {
        self.config
    }

    #[must_use]
    pub fn x_domain(&self) -> Interval {
        self.x_domain
    }

    pub fn set_x_domain(&mut self, x_domain: Interval) {
        self.x_domain = x_domain;
    }

    /// Actions emitted since the last call, oldest first.
    pub fn take_actions(&mut self) -> Vec<ViewportAction> {
        std::mem::take(&mut self.actions)
    }

    fn set_x_domain_action(&mut self, x_domain: Interval) {
        self.x_domain = x_domain;
        self.actions.push(ViewportAction::SetXDomain(x_domain));
    }

    fn brush_interval(&self, start_x: f64, end_x: f64) -> Interval {
        let (low, high) = if start_x <= end_x {
            (start_x, end_x)
        } else {
            (end_x, start_x)
        };
        Interval::new(self.x_domain.value_at(low), self.x_domain.value_at(high))
    }

    fn track_drag(&mut self, x: f64) {
        match self.drag {
            DragMode::Idle => {}
            DragMode::Panning { last_x } => {
                let logical_units = last_x - x;
                if logical_units != 0.0 {
                    let panned = pan_interval(self.x_domain, logical_units);
                    self.set_x_domain_action(panned);
                }
                self.drag = DragMode::Panning { last_x: x };
            }
            DragMode::Brushing { start_x } => {
                let selection = self.brush_interval(start_x, x);
                self.actions.push(ViewportAction::SetSelection(Some(selection)));
            }
        }
    }
}

impl<P: InteractionPolicy> CaptureHandler for InteractionCapture<P> {
    fn on_zoom(&mut self, factor: f64, position: LogicalPosition, event: &WheelEvent) {
        if !self.config.enable_zoom || !self.policy.should_zoom(event) {
            return;
        }
        let zoomed = zoom_interval(self.x_domain, factor, position.x);
        debug!(factor, anchor = position.x, "zoom");
        self.set_x_domain_action(zoomed);
    }

    fn on_drag_start(&mut self, position: LogicalPosition, event: &PointerEvent) {
        self.drag = if self.config.enable_brush && self.policy.should_brush(event) {
            DragMode::Brushing {
                start_x: position.x,
            }
        } else if self.config.enable_pan && self.policy.should_pan(event) {
            DragMode::Panning { last_x: position.x }
        } else {
            DragMode::Idle
        };
        debug!(mode = ?self.drag, "drag start");
    }

    fn on_drag(&mut self, position: LogicalPosition, _event: &PointerEvent) {
        self.track_drag(position.x);
    }

    fn on_drag_end(&mut self, position: LogicalPosition, _event: &PointerEvent) {
        self.track_drag(position.x);
        self.drag = DragMode::Idle;
    }

    fn on_click(&mut self, _position: LogicalPosition, _event: &PointerEvent) {
        if self.config.enable_brush {
            self.actions.push(ViewportAction::SetSelection(None));
        }
    }

    fn on_hover(&mut self, position: Option<LogicalPosition>, _event: &PointerEvent) {
        if self.config.enable_hover {
            let hover = position.map(|position| self.x_domain.value_at(position.x));
            self.actions.push(ViewportAction::SetHover(hover));
        }
    }
}
