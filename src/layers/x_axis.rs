use serde::{Deserialize, Serialize};

use crate::core::{Interval, Scale, ScaleKind, TickFormatSpec, TickSpec, compute_ticks};
use crate::error::ChartResult;
use crate::layers::CanvasLayer;
use crate::render::{Color, DrawingSurface, Font, TextAlign, TextBaseline};

const LABEL_PADDING_X: f64 = 6.0;
const LABEL_PADDING_Y: f64 = 4.0;

/// Tick and label settings shared by X and Y axes.
///
/// `scale: None` means the axis default: time for X, linear for Y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<TickSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_format: Option<TickFormatSpec>,
    pub color: Color,
    pub font: Font,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            scale: None,
            ticks: None,
            tick_format: None,
            color: Color::rgb(68.0 / 255.0, 68.0 / 255.0, 68.0 / 255.0),
            font: Font::default(),
        }
    }
}

/// Vertical gridlines with labels along the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct XAxisLayer {
    pub x_domain: Interval,
    pub style: AxisStyle,
}

impl XAxisLayer {
    #[must_use]
    pub fn new(x_domain: Interval) -> Self {
        Self {
            x_domain,
            style: AxisStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }
}

impl CanvasLayer for XAxisLayer {
    fn render(&self, width: u32, height: u32, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        render_x_axis_layer(self, width, height, surface)
    }
}

/// Fails only when the tick format specifier is invalid; nothing is drawn
/// in that case.
pub fn render_x_axis_layer<S>(
    layer: &XAxisLayer,
    width: u32,
    height: u32,
    surface: &mut S,
) -> ChartResult<()>
where
    S: DrawingSurface + ?Sized,
{
    let style = &layer.style;
    let x_scale = style
        .scale
        .unwrap_or(ScaleKind::Time)
        .build_rounded(layer.x_domain, Interval::new(0.0, f64::from(width)));
    let ticks = compute_ticks(&x_scale, style.ticks.as_ref(), style.tick_format.as_ref())?;
    let height = f64::from(height);

    surface.translate(0.5, -0.5);
    surface.begin_path();

    surface.set_text_align(TextAlign::Left);
    surface.set_text_baseline(TextBaseline::Top);
    surface.set_fill_style(style.color);
    surface.set_font(&style.font);

    for &tick in &ticks.ticks {
        let x = x_scale.map(tick);
        let label = ticks.format.format(tick).to_uppercase();
        surface.fill_text(&label, x + LABEL_PADDING_X, LABEL_PADDING_Y);
        surface.move_to(x, 0.0);
        surface.line_to(x, height);
    }

    surface.set_stroke_style(style.color);
    surface.stroke();
    Ok(())
}
