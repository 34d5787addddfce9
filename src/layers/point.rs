use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    Interval, LinearScale, PointDatum, Scale, ScaleKind, index_bounds_for_point_data,
};
use crate::error::ChartResult;
use crate::layers::{CanvasLayer, DEFAULT_SERIES_COLOR};
use crate::render::{Color, DrawingSurface};

/// Disk or ring markers. `inner_radius == 0` draws filled disks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    pub y_scale: ScaleKind,
    pub color: Color,
    pub radius: f64,
    pub inner_radius: f64,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            y_scale: ScaleKind::Linear,
            color: DEFAULT_SERIES_COLOR,
            radius: 3.0,
            inner_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLayer<'a> {
    pub data: &'a [PointDatum],
    pub x_domain: Interval,
    pub y_domain: Interval,
    pub style: PointStyle,
}

impl<'a> PointLayer<'a> {
    #[must_use]
    pub fn new(data: &'a [PointDatum], x_domain: Interval, y_domain: Interval) -> Self {
        Self {
            data,
            x_domain,
            y_domain,
            style: PointStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: PointStyle) -> Self {
        self.style = style;
        self
    }
}

impl CanvasLayer for PointLayer<'_> {
    fn render(&self, width: u32, height: u32, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        render_point_layer(self, width, height, surface);
        Ok(())
    }
}

/// Disks are batched into one fill. Rings each get their own path: a
/// batched stroke would draw the segments joining consecutive arcs.
pub fn render_point_layer<S>(layer: &PointLayer<'_>, width: u32, height: u32, surface: &mut S)
where
    S: DrawingSurface + ?Sized,
{
    let bounds = index_bounds_for_point_data(layer.data, layer.x_domain);
    if bounds.is_empty() {
        trace!("point layer skipped: nothing in view");
        return;
    }

    let style = &layer.style;
    let height = f64::from(height);
    let x_scale = LinearScale::rounded(layer.x_domain, Interval::new(0.0, f64::from(width)));
    let y_scale = style
        .y_scale
        .build_rounded(layer.y_domain, Interval::new(0.0, height));

    let is_filled = style.inner_radius == 0.0;
    let radius = if is_filled {
        style.radius
    } else {
        (style.radius - style.inner_radius) / 2.0 + style.inner_radius
    };

    surface.set_line_width(style.radius - style.inner_radius);
    surface.set_stroke_style(style.color);
    surface.set_fill_style(style.color);

    if is_filled {
        surface.begin_path();
    }

    for datum in &layer.data[bounds.range()] {
        let x = x_scale.map(datum.x_value);
        let y = height - y_scale.map(datum.y_value);
        if is_filled {
            surface.move_to(x, y);
            surface.arc(x, y, radius, 0.0, TAU);
        } else {
            surface.begin_path();
            surface.arc(x, y, radius, 0.0, TAU);
            surface.stroke();
        }
    }

    if is_filled {
        surface.fill();
    }
}
