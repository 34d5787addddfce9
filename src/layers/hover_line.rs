use serde::{Deserialize, Serialize};

use crate::core::{Interval, LinearScale, Scale};
use crate::error::ChartResult;
use crate::layers::CanvasLayer;
use crate::render::{Color, DrawingSurface};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverLineStyle {
    pub color: Color,
    pub line_width: f64,
}

impl Default for HoverLineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            line_width: 1.0,
        }
    }
}

/// Vertical guide at the hovered X value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverLineLayer {
    pub hover: Option<f64>,
    pub x_domain: Interval,
    pub style: HoverLineStyle,
}

impl HoverLineLayer {
    #[must_use]
    pub fn new(hover: Option<f64>, x_domain: Interval) -> Self {
        Self {
            hover,
            x_domain,
            style: HoverLineStyle::default(),
        }
    }
}

impl CanvasLayer for HoverLineLayer {
    fn render(&self, width: u32, height: u32, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        render_hover_line_layer(self, width, height, surface);
        Ok(())
    }
}

pub fn render_hover_line_layer<S>(layer: &HoverLineLayer, width: u32, height: u32, surface: &mut S)
where
    S: DrawingSurface + ?Sized,
{
    let Some(hover) = layer.hover else {
        return;
    };

    let x_scale = LinearScale::rounded(layer.x_domain, Interval::new(0.0, f64::from(width)));
    let x = x_scale.map(hover);

    surface.translate(0.5, -0.5);
    surface.begin_path();
    surface.move_to(x, 0.0);
    surface.line_to(x, f64::from(height));
    surface.set_stroke_style(layer.style.color);
    surface.set_line_width(layer.style.line_width);
    surface.stroke();
}
