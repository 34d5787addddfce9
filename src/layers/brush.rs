use serde::{Deserialize, Serialize};

use crate::core::{Interval, LinearScale, Scale};
use crate::error::ChartResult;
use crate::layers::CanvasLayer;
use crate::render::{Color, DrawingSurface};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushStyle {
    pub fill: Color,
    pub stroke: Color,
}

impl Default for BrushStyle {
    fn default() -> Self {
        Self {
            fill: Color::rgba(0.0, 0.0, 0.0, 0.1),
            stroke: Color::rgba(0.0, 0.0, 0.0, 0.3),
        }
    }
}

/// The current selection as a full-height rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushLayer {
    pub selection: Option<Interval>,
    pub x_domain: Interval,
    pub style: BrushStyle,
}

impl BrushLayer {
    #[must_use]
    pub fn new(selection: Option<Interval>, x_domain: Interval) -> Self {
        Self {
            selection,
            x_domain,
            style: BrushStyle::default(),
        }
    }
}

impl CanvasLayer for BrushLayer {
    fn render(&self, width: u32, height: u32, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        render_brush_layer(self, width, height, surface);
        Ok(())
    }
}

pub fn render_brush_layer<S>(layer: &BrushLayer, width: u32, height: u32, surface: &mut S)
where
    S: DrawingSurface + ?Sized,
{
    let Some(selection) = layer.selection else {
        return;
    };

    let x_scale = LinearScale::rounded(layer.x_domain, Interval::new(0.0, f64::from(width)));
    let left = x_scale.map(selection.min);
    let right = x_scale.map(selection.max);

    surface.translate(0.5, -0.5);
    surface.begin_path();
    surface.rect(left, 0.0, right - left, f64::from(height));
    surface.set_fill_style(layer.style.fill);
    surface.fill();
    surface.set_stroke_style(layer.style.stroke);
    surface.set_line_width(1.0);
    surface.stroke();
}
