use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Interval, LinearScale, Scale, SpanDatum, index_bounds_for_span_data};
use crate::error::ChartResult;
use crate::layers::{CanvasLayer, DEFAULT_SERIES_COLOR};
use crate::render::{Color, DrawingSurface};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarStyle {
    pub color: Color,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_SERIES_COLOR,
        }
    }
}

/// Bars rising from the zero line, one per span.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayer<'a> {
    pub data: &'a [SpanDatum],
    pub x_domain: Interval,
    pub y_domain: Interval,
    pub style: BarStyle,
}

impl<'a> BarLayer<'a> {
    #[must_use]
    pub fn new(data: &'a [SpanDatum], x_domain: Interval, y_domain: Interval) -> Self {
        Self {
            data,
            x_domain,
            y_domain,
            style: BarStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: BarStyle) -> Self {
        self.style = style;
        self
    }
}

impl CanvasLayer for BarLayer<'_> {
    fn render(&self, width: u32, height: u32, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        render_bar_layer(self, width, height, surface);
        Ok(())
    }
}

/// All bars share one path and one fill.
pub fn render_bar_layer<S>(layer: &BarLayer<'_>, width: u32, height: u32, surface: &mut S)
where
    S: DrawingSurface + ?Sized,
{
    let bounds = index_bounds_for_span_data(layer.data, layer.x_domain);
    if bounds.is_empty() {
        trace!("bar layer skipped: nothing in view");
        return;
    }

    let height = f64::from(height);
    let x_scale = LinearScale::rounded(layer.x_domain, Interval::new(0.0, f64::from(width)));
    let y_scale = LinearScale::rounded(layer.y_domain, Interval::new(0.0, height));
    let bottom = height - y_scale.map(0.0);

    surface.begin_path();
    for datum in &layer.data[bounds.range()] {
        let left = x_scale.map(datum.min_x_value);
        let right = x_scale.map(datum.max_x_value);
        let top = height - y_scale.map(datum.y_value);
        surface.rect(left, bottom, right - left, top - bottom);
    }

    surface.set_fill_style(layer.style.color);
    surface.fill();
}
