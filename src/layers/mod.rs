//! Stateless rasterizers, one per chart layer kind.
//!
//! Each layer maps its data through X/Y scales built from the current
//! domains and the pixel size of the surface, then issues a fixed sequence
//! of [`DrawingSurface`] calls. Y pixel positions are measured from the
//! bottom: `height - y_scale.map(value)`. Layers hold no state between
//! renders; a host redraws when the layer value changes (`PartialEq`).

mod bar;
mod brush;
mod bucketed_line;
mod hover_line;
mod line;
mod point;
mod span;
mod x_axis;
mod y_axis;

pub use bar::{BarLayer, BarStyle, render_bar_layer};
pub use brush::{BrushLayer, BrushStyle, render_brush_layer};
pub use bucketed_line::{BucketedLineLayer, BucketedLineStyle, render_bucketed_line_layer};
pub use hover_line::{HoverLineLayer, HoverLineStyle, render_hover_line_layer};
pub use line::{LineLayer, LineStyle, render_line_layer};
pub use point::{PointLayer, PointStyle, render_point_layer};
pub use span::{SpanLayer, SpanStyle, render_span_layer, selection_span_data};
pub use x_axis::{AxisStyle, XAxisLayer, render_x_axis_layer};
pub use y_axis::{YAxisLayer, YAxisLayout, YAxisSpec, YAxisTick};

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface};

/// Period of the dash pattern used by dashed lines and striped buckets.
pub const DASH_PERIOD_PX: f64 = 10.0;
/// Solid part of each dash period.
pub const DASH_SOLID_PX: f64 = 6.0;

/// Default series color, 70% black.
pub(crate) const DEFAULT_SERIES_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.7);

/// How consecutive samples are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    /// A straight segment between the samples.
    #[default]
    Direct,
    /// Step at the previous sample's X: the Y changes first.
    Leading,
    /// Step at the current sample's X: the X advances first.
    Trailing,
}

/// A layer drawable onto any surface at a given pixel size.
pub trait CanvasLayer {
    fn render(&self, width: u32, height: u32, surface: &mut dyn DrawingSurface) -> ChartResult<()>;

    /// Renders at the viewport size. An empty viewport is an error rather
    /// than a silent no-op.
    fn render_viewport(
        &self,
        viewport: Viewport,
        surface: &mut dyn DrawingSurface,
    ) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.render(viewport.width, viewport.height, surface)
    }
}

pub(crate) fn dash_pattern(dashed: bool) -> SmallVec<[f64; 2]> {
    if dashed {
        smallvec![DASH_SOLID_PX, DASH_PERIOD_PX - DASH_SOLID_PX]
    } else {
        SmallVec::new()
    }
}

/// `max` that returns NaN when either side is NaN.
pub(crate) fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

/// `min` that returns NaN when either side is NaN.
pub(crate) fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

/// Clamps into `[min, max]` without panicking when `min > max`.
pub(crate) fn nan_clamp(value: f64, min: f64, max: f64) -> f64 {
    nan_min(nan_max(min, value), max)
}
