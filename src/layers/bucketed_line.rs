use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    BucketDatum, ContinuousScale, Interval, LinearScale, Scale, ScaleKind,
    index_bounds_for_span_data,
};
use crate::error::ChartResult;
use crate::layers::{
    CanvasLayer, DASH_PERIOD_PX, DASH_SOLID_PX, JoinType, dash_pattern, nan_clamp, nan_max,
};
use crate::render::{Color, DrawingSurface, LineCap};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketedLineStyle {
    pub y_scale: ScaleKind,
    pub color: Color,
    pub line_width: f64,
    pub dashed_line: bool,
    pub join_type: JoinType,
}

impl Default for BucketedLineStyle {
    fn default() -> Self {
        Self {
            y_scale: ScaleKind::Linear,
            color: Color::rgb(68.0 / 255.0, 68.0 / 255.0, 68.0 / 255.0),
            line_width: 1.0,
            dashed_line: false,
            join_type: JoinType::Direct,
        }
    }
}

/// Aggregated series: one box per bucket plus lines joining the buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketedLineLayer<'a> {
    pub data: &'a [BucketDatum],
    pub x_domain: Interval,
    pub y_domain: Interval,
    pub style: BucketedLineStyle,
}

impl<'a> BucketedLineLayer<'a> {
    #[must_use]
    pub fn new(data: &'a [BucketDatum], x_domain: Interval, y_domain: Interval) -> Self {
        Self {
            data,
            x_domain,
            y_domain,
            style: BucketedLineStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: BucketedLineStyle) -> Self {
        self.style = style;
        self
    }
}

impl CanvasLayer for BucketedLineLayer<'_> {
    fn render(&self, width: u32, height: u32, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        render_bucketed_line_layer(self, width, height, surface);
        Ok(())
    }
}

/// Pixel extent of one bucket, Y measured upward from the bottom.
#[derive(Debug, Clone, Copy)]
struct BucketPixels {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    first_y: f64,
    last_y: f64,
}

impl BucketPixels {
    /// Every bucket covers at least one pixel in each direction. The
    /// first/last anchors stay inside the box.
    fn compute(datum: &BucketDatum, x_scale: &LinearScale, y_scale: &ContinuousScale) -> Self {
        let min_x = x_scale.map(datum.min_x_value).ceil();
        let max_x = nan_max(x_scale.map(datum.max_x_value).floor(), min_x + 1.0);
        let min_y = y_scale.map(datum.min_y_value).floor();
        let max_y = nan_max(y_scale.map(datum.max_y_value).floor(), min_y + 1.0);
        let first_y = nan_clamp(y_scale.map(datum.first_y_value).floor(), min_y, max_y - 1.0);
        let last_y = nan_clamp(y_scale.map(datum.last_y_value).floor(), min_y, max_y - 1.0);
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            first_y,
            last_y,
        }
    }

    fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Splits a box into `DASH_SOLID_PX`-tall stripes every `DASH_PERIOD_PX`,
/// top to bottom. The final stripe keeps whatever height remains.
fn stripe_rect<S>(surface: &mut S, x: f64, mut y: f64, width: f64, mut height: f64)
where
    S: DrawingSurface + ?Sized,
{
    loop {
        if !(height > DASH_PERIOD_PX) {
            surface.rect(x, y, width, height);
            return;
        }
        surface.rect(x, y, width, DASH_SOLID_PX);
        y += DASH_PERIOD_PX;
        height -= DASH_PERIOD_PX;
    }
}

pub fn render_bucketed_line_layer<S>(
    layer: &BucketedLineLayer<'_>,
    width: u32,
    height: u32,
    surface: &mut S,
) where
    S: DrawingSurface + ?Sized,
{
    let bounds = index_bounds_for_span_data(layer.data, layer.x_domain);
    if bounds.is_empty() {
        trace!("bucketed line layer skipped: nothing in view");
        return;
    }

    let style = &layer.style;
    let height = f64::from(height);
    let x_scale = LinearScale::new(layer.x_domain, Interval::new(0.0, f64::from(width)));
    let y_scale = style.y_scale.build(layer.y_domain, Interval::new(0.0, height));

    let buckets: Vec<BucketPixels> = layer.data[bounds.range()]
        .iter()
        .map(|datum| BucketPixels::compute(datum, &x_scale, &y_scale))
        .collect();

    // Thick outlines would eat into the box, so grow it by the line width.
    let size_adjust = if style.line_width > 1.0 {
        style.line_width
    } else {
        0.0
    };
    let position_adjust = size_adjust / 2.0;

    surface.begin_path();
    for bucket in &buckets {
        let (bucket_width, bucket_height) = (bucket.width(), bucket.height());
        // A 1x1 box is indistinguishable from the line through it.
        if bucket_width == 1.0 && bucket_height == 1.0 {
            continue;
        }
        let x = bucket.min_x - position_adjust;
        let y = height - bucket.max_y - position_adjust;
        let w = bucket_width + size_adjust;
        let h = bucket_height + size_adjust;
        if style.dashed_line {
            stripe_rect(surface, x, y, w, h);
        } else {
            surface.rect(x, y, w, h);
        }
    }
    surface.set_fill_style(style.color);
    surface.fill();

    surface.translate(0.5, -0.5);
    surface.set_line_dash(&dash_pattern(style.dashed_line));
    surface.begin_path();

    let first = &buckets[0];
    surface.move_to(first.max_x - 1.0, height - first.last_y);
    for pair in buckets.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        match style.join_type {
            JoinType::Direct => {}
            JoinType::Leading => {
                surface.line_to(previous.max_x - 1.0, height - current.first_y);
            }
            JoinType::Trailing => surface.line_to(current.min_x, height - previous.last_y),
        }
        surface.line_to(current.min_x, height - current.first_y);
        surface.move_to(current.max_x - 1.0, height - current.last_y);
    }

    surface.set_stroke_style(style.color);
    surface.set_line_width(style.line_width);
    surface.set_line_cap(LineCap::Round);
    surface.stroke();
}
