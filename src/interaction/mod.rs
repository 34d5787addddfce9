//! Pointer and wheel handling.
//!
//! [`MouseCapture`] recognizes gestures from raw events; [`InteractionCapture`]
//! turns those gestures into [`ViewportAction`]s that a host folds into its
//! [`ViewState`].

mod capture;
mod mouse_capture;
mod view_state;

pub use capture::{
    DefaultInteractionPolicy, InteractionCapture, InteractionConfig, InteractionPolicy,
    ViewportAction,
};
pub use mouse_capture::{
    CLICK_TOLERANCE_PX, CaptureHandler, DEFAULT_ZOOM_SPEED, ElementBounds, LogicalPosition,
    MouseButton, MouseCapture, PointerEvent, WheelEvent, ZoomSpeed,
};
pub use view_state::ViewState;
