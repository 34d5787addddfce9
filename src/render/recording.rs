use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::render::{Color, DrawingSurface, Font, LineCap, TextAlign, TextBaseline};

/// One call made against a [`DrawingSurface`].
///
/// Variants mirror canvas method calls and property writes one to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    BeginPath,
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Fill,
    Stroke,
    SetLineDash {
        segments: SmallVec<[f64; 2]>,
    },
    Translate {
        dx: f64,
        dy: f64,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
    FillStyle {
        color: Color,
    },
    StrokeStyle {
        color: Color,
    },
    LineWidth {
        width: f64,
    },
    LineCap {
        cap: LineCap,
    },
    Font {
        font: Font,
    },
    TextAlign {
        align: TextAlign,
    },
    TextBaseline {
        baseline: TextBaseline,
    },
}

impl DrawCommand {
    /// Canvas name of the call or property, e.g. `"moveTo"` or `"fillStyle"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeginPath => "beginPath",
            Self::Rect { .. } => "rect",
            Self::MoveTo { .. } => "moveTo",
            Self::LineTo { .. } => "lineTo",
            Self::Arc { .. } => "arc",
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::SetLineDash { .. } => "setLineDash",
            Self::Translate { .. } => "translate",
            Self::FillText { .. } => "fillText",
            Self::FillStyle { .. } => "fillStyle",
            Self::StrokeStyle { .. } => "strokeStyle",
            Self::LineWidth { .. } => "lineWidth",
            Self::LineCap { .. } => "lineCap",
            Self::Font { .. } => "font",
            Self::TextAlign { .. } => "textAlign",
            Self::TextBaseline { .. } => "textBaseline",
        }
    }

    /// Whether this is a property write rather than a method call.
    #[must_use]
    pub fn is_property(&self) -> bool {
        matches!(
            self,
            Self::FillStyle { .. }
                | Self::StrokeStyle { .. }
                | Self::LineWidth { .. }
                | Self::LineCap { .. }
                | Self::Font { .. }
                | Self::TextAlign { .. }
                | Self::TextBaseline { .. }
        )
    }
}

/// Surface that records every call in order instead of drawing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Method calls only, property writes dropped.
    #[must_use]
    pub fn methods(&self) -> Vec<DrawCommand> {
        self.commands
            .iter()
            .filter(|command| !command.is_property())
            .cloned()
            .collect()
    }

    /// Property writes only.
    #[must_use]
    pub fn properties(&self) -> Vec<DrawCommand> {
        self.commands
            .iter()
            .filter(|command| command.is_property())
            .cloned()
            .collect()
    }

    /// Commands whose canvas name is in `names`, in call order.
    #[must_use]
    pub fn calls_only(&self, names: &[&str]) -> Vec<DrawCommand> {
        self.commands
            .iter()
            .filter(|command| names.contains(&command.name()))
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo { x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.push(DrawCommand::SetLineDash {
            segments: SmallVec::from_slice(segments),
        });
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.push(DrawCommand::Translate { dx, dy });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.push(DrawCommand::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn set_fill_style(&mut self, color: Color) {
        self.push(DrawCommand::FillStyle { color });
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.push(DrawCommand::StrokeStyle { color });
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::LineWidth { width });
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.push(DrawCommand::LineCap { cap });
    }

    fn set_font(&mut self, font: &Font) {
        self.push(DrawCommand::Font { font: font.clone() });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::TextAlign { align });
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(DrawCommand::TextBaseline { baseline });
    }
}
