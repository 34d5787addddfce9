use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, Font, LineCap, TextAlign, TextBaseline};

/// Canvas-semantics surface over a cairo context.
///
/// Canvas keeps separate fill and stroke colors and keeps the current path
/// after `fill`/`stroke`; cairo has one source and consumes the path. This
/// adapter tracks both colors and uses the preserving cairo calls, so a
/// `fill` followed by `stroke` paints the same path twice.
#[derive(Debug)]
pub struct CairoSurface {
    context: Context,
    fill_color: Color,
    stroke_color: Color,
    font: Font,
    text_align: TextAlign,
    text_baseline: TextBaseline,
}

impl CairoSurface {
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self {
            context,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            font: Font::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
        }
    }

    /// Surface drawing into a fresh offscreen ARGB image.
    pub fn image(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidViewport {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self::new(context))
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    fn apply_color(&self, color: Color) {
        self.context
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
    }
}

impl DrawingSurface for CairoSurface {
    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.rectangle(x, y, width, height);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.context.arc(x, y, radius, start_angle, end_angle);
    }

    fn fill(&mut self) {
        self.apply_color(self.fill_color);
        if let Err(err) = self.context.fill_preserve() {
            warn!(error = %err, "cairo fill failed");
        }
    }

    fn stroke(&mut self) {
        self.apply_color(self.stroke_color);
        if let Err(err) = self.context.stroke_preserve() {
            warn!(error = %err, "cairo stroke failed");
        }
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.context.set_dash(segments, 0.0);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.context.translate(dx, dy);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let layout = pangocairo::functions::create_layout(&self.context);
        let description = FontDescription::from_string(&format!(
            "{} {}px",
            self.font.family, self.font.size_px
        ));
        layout.set_font_description(Some(&description));
        layout.set_text(text);

        let (text_width, text_height) = layout.pixel_size();
        let x = match self.text_align {
            TextAlign::Left => x,
            TextAlign::Center => x - f64::from(text_width) / 2.0,
            TextAlign::Right => x - f64::from(text_width),
        };
        let y = match self.text_baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - f64::from(text_height) / 2.0,
            TextBaseline::Alphabetic => y - f64::from(layout.baseline()) / f64::from(pango::SCALE),
            TextBaseline::Bottom => y - f64::from(text_height),
        };

        self.apply_color(self.fill_color);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context.new_path();
    }

    fn set_fill_style(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.context.set_line_cap(match cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        });
    }

    fn set_font(&mut self, font: &Font) {
        self.font = font.clone();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.text_baseline = baseline;
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
