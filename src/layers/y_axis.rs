use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Interval, Scale, ScaleKind, compute_ticks};
use crate::error::ChartResult;
use crate::layers::AxisStyle;
use crate::render::{Color, Font};

/// One vertical axis: its domain, optional id and tick settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisSpec {
    pub y_domain: Interval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_id: Option<String>,
    #[serde(default)]
    pub style: AxisStyle,
}

impl YAxisSpec {
    #[must_use]
    pub fn new(y_domain: Interval) -> Self {
        Self {
            y_domain,
            axis_id: None,
            style: AxisStyle::default(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, axis_id: impl Into<String>) -> Self {
        self.axis_id = Some(axis_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisTick {
    pub value: f64,
    /// Distance from the top edge, in percent of the axis height.
    pub offset_percent: f64,
    pub label: String,
}

/// Positioned ticks for one axis, ready for a host to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisLayout {
    pub ticks: Vec<YAxisTick>,
    pub color: Color,
}

/// A column of Y axes laid out side by side.
///
/// Unlike the canvas layers this produces positions rather than draw
/// calls; offsets are percentages so they hold at any element height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisLayer {
    pub axes: Vec<YAxisSpec>,
    #[serde(default)]
    pub font: Font,
    #[serde(default = "default_background_color")]
    pub background_color: Color,
}

fn default_background_color() -> Color {
    Color::rgba(1.0, 1.0, 1.0, 0.8)
}

impl YAxisLayer {
    #[must_use]
    pub fn new(axes: Vec<YAxisSpec>) -> Self {
        Self {
            axes,
            font: Font::default(),
            background_color: default_background_color(),
        }
    }

    /// Layouts keyed by axis id, or by position for axes without one, in
    /// axis order.
    pub fn layout(&self) -> ChartResult<IndexMap<String, YAxisLayout>> {
        let mut layouts = IndexMap::with_capacity(self.axes.len());
        for (index, axis) in self.axes.iter().enumerate() {
            let key = match axis.axis_id.as_deref() {
                Some(id) if !id.is_empty() => id.to_owned(),
                _ => index.to_string(),
            };
            let layout = layout_axis(axis)?;
            if layouts.insert(key.clone(), layout).is_some() {
                warn!(axis_id = %key, "duplicate y axis id; later axis wins");
            }
        }
        Ok(layouts)
    }
}

fn layout_axis(axis: &YAxisSpec) -> ChartResult<YAxisLayout> {
    let style = &axis.style;
    let y_scale = style
        .scale
        .unwrap_or(ScaleKind::Linear)
        .build_rounded(axis.y_domain, Interval::new(0.0, 100.0));
    let computed = compute_ticks(&y_scale, style.ticks.as_ref(), style.tick_format.as_ref())?;

    let ticks = computed
        .ticks
        .iter()
        .map(|&value| YAxisTick {
            value,
            offset_percent: 100.0 - y_scale.map(value),
            label: computed.format.format(value),
        })
        .collect();

    Ok(YAxisLayout {
        ticks,
        color: style.color,
    })
}
