use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_epoch_millis, decimal_to_f64};
use crate::error::ChartResult;
use crate::render::Color;

/// Pixel size of the element a layer draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A single sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDatum {
    pub x_value: f64,
    pub y_value: f64,
}

impl PointDatum {
    #[must_use]
    pub const fn new(x_value: f64, y_value: f64) -> Self {
        Self { x_value, y_value }
    }

    /// Builds a sample whose X is the epoch-millisecond value of `time`.
    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x_value: datetime_to_epoch_millis(time),
            y_value: decimal_to_f64(value, "value")?,
        })
    }
}

/// A bar covering `[min_x_value, max_x_value]` with one Y value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanDatum {
    pub min_x_value: f64,
    pub max_x_value: f64,
    pub y_value: f64,
}

impl SpanDatum {
    #[must_use]
    pub const fn new(min_x_value: f64, max_x_value: f64, y_value: f64) -> Self {
        Self {
            min_x_value,
            max_x_value,
            y_value,
        }
    }
}

/// An X-only highlighted region, optionally with its own fill color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XSpanDatum {
    pub min_x_value: f64,
    pub max_x_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl XSpanDatum {
    #[must_use]
    pub const fn new(min_x_value: f64, max_x_value: f64) -> Self {
        Self {
            min_x_value,
            max_x_value,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Aggregated summary of many samples over an X range.
///
/// `first_y_value` and `last_y_value` are the open/close-like anchors that
/// connecting lines attach to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketDatum {
    pub min_x_value: f64,
    pub max_x_value: f64,
    pub min_y_value: f64,
    pub max_y_value: f64,
    pub first_y_value: f64,
    pub last_y_value: f64,
}

impl BucketDatum {
    #[must_use]
    pub const fn new(
        min_x_value: f64,
        max_x_value: f64,
        min_y_value: f64,
        max_y_value: f64,
        first_y_value: f64,
        last_y_value: f64,
    ) -> Self {
        Self {
            min_x_value,
            max_x_value,
            min_y_value,
            max_y_value,
            first_y_value,
            last_y_value,
        }
    }
}
