use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    Interval, LinearScale, PointDatum, Scale, ScaleKind, index_bounds_for_point_data,
};
use crate::error::ChartResult;
use crate::layers::{CanvasLayer, DEFAULT_SERIES_COLOR, JoinType, dash_pattern};
use crate::render::{Color, DrawingSurface, LineCap};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub y_scale: ScaleKind,
    pub color: Color,
    pub line_width: f64,
    pub dashed_line: bool,
    pub join_type: JoinType,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            y_scale: ScaleKind::Linear,
            color: DEFAULT_SERIES_COLOR,
            line_width: 1.0,
            dashed_line: false,
            join_type: JoinType::Direct,
        }
    }
}

/// Polyline through sorted samples.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayer<'a> {
    pub data: &'a [PointDatum],
    pub x_domain: Interval,
    pub y_domain: Interval,
    pub style: LineStyle,
}

impl<'a> LineLayer<'a> {
    #[must_use]
    pub fn new(data: &'a [PointDatum], x_domain: Interval, y_domain: Interval) -> Self {
        Self {
            data,
            x_domain,
            y_domain,
            style: LineStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }
}

impl CanvasLayer for LineLayer<'_> {
    fn render(&self, width: u32, height: u32, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        render_line_layer(self, width, height, surface);
        Ok(())
    }
}

pub fn render_line_layer<S>(layer: &LineLayer<'_>, width: u32, height: u32, surface: &mut S)
where
    S: DrawingSurface + ?Sized,
{
    let data = layer.data;
    if data.len() < 2 {
        trace!(len = data.len(), "line layer skipped: fewer than two samples");
        return;
    }

    let bounds = index_bounds_for_point_data(data, layer.x_domain);
    if bounds.is_empty() {
        trace!("line layer skipped: nothing in view");
        return;
    }

    let style = &layer.style;
    let height = f64::from(height);
    let x_scale = LinearScale::rounded(layer.x_domain, Interval::new(0.0, f64::from(width)));
    let y_scale = style
        .y_scale
        .build_rounded(layer.y_domain, Interval::new(0.0, height));
    let x_of = |datum: &PointDatum| x_scale.map(datum.x_value);
    let y_of = |datum: &PointDatum| height - y_scale.map(datum.y_value);

    // Align 1px strokes with pixel centers.
    surface.translate(0.5, -0.5);
    surface.set_line_dash(&dash_pattern(style.dashed_line));

    let visible = &data[bounds.range()];
    surface.begin_path();
    surface.move_to(x_of(&visible[0]), y_of(&visible[0]));
    for pair in visible.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        let (x, y) = (x_of(current), y_of(current));
        match style.join_type {
            JoinType::Direct => {}
            JoinType::Leading => surface.line_to(x_of(previous), y),
            JoinType::Trailing => surface.line_to(x, y_of(previous)),
        }
        surface.line_to(x, y);
    }

    surface.set_stroke_style(style.color);
    surface.set_line_width(style.line_width);
    surface.set_line_cap(LineCap::Round);
    surface.stroke();
}
