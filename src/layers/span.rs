use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Interval, LinearScale, Scale, XSpanDatum, index_bounds_for_span_data};
use crate::error::ChartResult;
use crate::layers::CanvasLayer;
use crate::render::{Color, DrawingSurface};

/// Full-height highlighted X ranges.
///
/// `fill_color` is used for spans without a color of their own; with both
/// absent a span is only outlined (if `border_color` is set).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanStyle {
    pub fill_color: Option<Color>,
    pub border_color: Option<Color>,
}

impl Default for SpanStyle {
    fn default() -> Self {
        Self {
            fill_color: Some(Color::rgba(0.0, 0.0, 0.0, 0.1)),
            border_color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpanLayer<'a> {
    pub data: &'a [XSpanDatum],
    pub x_domain: Interval,
    pub style: SpanStyle,
}

impl<'a> SpanLayer<'a> {
    #[must_use]
    pub fn new(data: &'a [XSpanDatum], x_domain: Interval) -> Self {
        Self {
            data,
            x_domain,
            style: SpanStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: SpanStyle) -> Self {
        self.style = style;
        self
    }
}

impl CanvasLayer for SpanLayer<'_> {
    fn render(&self, width: u32, height: u32, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        render_span_layer(self, width, height, surface);
        Ok(())
    }
}

/// Each span is a separate path since spans may carry their own colors.
pub fn render_span_layer<S>(layer: &SpanLayer<'_>, width: u32, height: u32, surface: &mut S)
where
    S: DrawingSurface + ?Sized,
{
    let bounds = index_bounds_for_span_data(layer.data, layer.x_domain);
    if bounds.is_empty() {
        trace!("span layer skipped: nothing in view");
        return;
    }

    let height = f64::from(height);
    let x_scale = LinearScale::rounded(layer.x_domain, Interval::new(0.0, f64::from(width)));
    let border_color = layer.style.border_color;

    surface.set_line_width(1.0);
    if let Some(border_color) = border_color {
        surface.set_stroke_style(border_color);
    }

    for datum in &layer.data[bounds.range()] {
        let left = x_scale.map(datum.min_x_value);
        let right = x_scale.map(datum.max_x_value);
        surface.begin_path();
        // Overdraw by a pixel top and bottom so the border never shows.
        surface.rect(left, -1.0, right - left, height + 2.0);

        if let Some(fill) = datum.color.or(layer.style.fill_color) {
            surface.set_fill_style(fill);
            surface.fill();
        }
        if border_color.is_some() {
            surface.stroke();
        }
    }
}

/// The dataset that draws a selection as a span: one datum, or none.
#[must_use]
pub fn selection_span_data(selection: Option<Interval>) -> Vec<XSpanDatum> {
    selection
        .map(|selection| XSpanDatum::new(selection.min, selection.max))
        .into_iter()
        .collect()
}
