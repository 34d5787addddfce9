mod primitives;
mod recording;

pub use primitives::{Color, Font, LineCap, TextAlign, TextBaseline};
pub use recording::{DrawCommand, RecordingSurface};

/// Immediate-mode 2D drawing target with canvas semantics.
///
/// Layers issue path and style calls in a fixed order and never read state
/// back, so any backend that can replay canvas calls can host them. Invalid
/// numeric arguments (NaN, infinities) are passed through unchanged; a
/// backend should treat them as no-ops rather than fail.
pub trait DrawingSurface {
    fn begin_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn fill(&mut self);
    fn stroke(&mut self);

    /// Alternating dash and gap lengths; empty means solid.
    fn set_line_dash(&mut self, segments: &[f64]);

    /// Shifts the origin of every following call.
    fn translate(&mut self, dx: f64, dy: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    fn set_fill_style(&mut self, color: Color);
    fn set_stroke_style(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_font(&mut self, font: &Font);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoSurface;
