//! Visible-window index computation over X-sorted series.
//!
//! Every function here assumes the input is sorted ascending by the field it
//! searches on. Unsorted input is not detected; the result is then
//! unspecified but the call still terminates without panicking.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{BucketDatum, Interval, PointDatum, SpanDatum, XSpanDatum};

/// Half-open `[first_index, last_index)` range of a series to rasterize.
///
/// `first_index == last_index` means nothing is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexBounds {
    pub first_index: usize,
    pub last_index: usize,
}

impl IndexBounds {
    #[must_use]
    pub const fn new(first_index: usize, last_index: usize) -> Self {
        Self {
            first_index,
            last_index,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.first_index >= self.last_index
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.last_index.saturating_sub(self.first_index)
    }

    #[must_use]
    pub fn range(self) -> Range<usize> {
        self.first_index..self.last_index.max(self.first_index)
    }
}

/// Datum located at a single X value.
pub trait XPoint {
    fn x_value(&self) -> f64;
}

/// Datum covering an X range.
pub trait XSpan {
    fn min_x_value(&self) -> f64;
    fn max_x_value(&self) -> f64;
}

impl XPoint for PointDatum {
    fn x_value(&self) -> f64 {
        self.x_value
    }
}

impl XSpan for SpanDatum {
    fn min_x_value(&self) -> f64 {
        self.min_x_value
    }

    fn max_x_value(&self) -> f64 {
        self.max_x_value
    }
}

impl XSpan for XSpanDatum {
    fn min_x_value(&self) -> f64 {
        self.min_x_value
    }

    fn max_x_value(&self) -> f64 {
        self.max_x_value
    }
}

impl XSpan for BucketDatum {
    fn min_x_value(&self) -> f64 {
        self.min_x_value
    }

    fn max_x_value(&self) -> f64 {
        self.max_x_value
    }
}

/// Index bounds of point data sorted by `XPoint::x_value`.
#[must_use]
pub fn index_bounds_for_point_data<T: XPoint>(data: &[T], x_bounds: Interval) -> IndexBounds {
    index_bounds_for_point_data_by(data, x_bounds, T::x_value)
}

/// Index bounds of point data sorted by `x_value`.
///
/// Finds the first sample with `x >= x_bounds.min` and one past the last
/// sample with `x <= x_bounds.max`, then widens by one sample on each side so
/// lines crossing the viewport edge keep an anchor outside it.
pub fn index_bounds_for_point_data_by<T, F>(data: &[T], x_bounds: Interval, x_value: F) -> IndexBounds
where
    F: Fn(&T) -> f64,
{
    let first_index = sorted_index_by(data, x_bounds.min, &x_value);
    let last_index = sorted_last_index_by(data, x_bounds.max, &x_value);

    let bounds = adjust_bounds(first_index, last_index, data.len());
    trace!(
        len = data.len(),
        first = bounds.first_index,
        last = bounds.last_index,
        "point data index bounds"
    );
    bounds
}

/// Index bounds of span data sorted by `XSpan::min_x_value`.
#[must_use]
pub fn index_bounds_for_span_data<T: XSpan>(data: &[T], x_bounds: Interval) -> IndexBounds {
    index_bounds_for_span_data_by(data, x_bounds, T::min_x_value, T::max_x_value)
}

/// Index bounds of span data sorted by `min_x_value`.
///
/// The upper index is searched with the span *start* against the visible
/// *end*: a span starting after `x_bounds.max` cannot be visible. This bound
/// is loose, since a span may start in range and still end before it. The
/// lower index is a forward scan for the first span whose end reaches
/// `x_bounds.min`, capped at the upper index.
pub fn index_bounds_for_span_data_by<T, F, G>(
    data: &[T],
    x_bounds: Interval,
    min_x_value: F,
    max_x_value: G,
) -> IndexBounds
where
    F: Fn(&T) -> f64,
    G: Fn(&T) -> f64,
{
    let last_index = sorted_last_index_by(data, x_bounds.max, &min_x_value);
    let first_index = data[..last_index]
        .iter()
        .position(|datum| max_x_value(datum) >= x_bounds.min)
        .unwrap_or(last_index);

    let bounds = adjust_bounds(first_index, last_index, data.len());
    trace!(
        len = data.len(),
        first = bounds.first_index,
        last = bounds.last_index,
        "span data index bounds"
    );
    bounds
}

fn adjust_bounds(first_index: usize, last_index: usize, data_len: usize) -> IndexBounds {
    if first_index == data_len || last_index == 0 {
        // Nothing visible: keep the degenerate range as-is.
        return IndexBounds::new(first_index, last_index);
    }

    IndexBounds::new(
        first_index.saturating_sub(1),
        (last_index + 1).min(data_len),
    )
}

/// Lowest index at which `value` could be inserted keeping the order.
fn sorted_index_by<T, F>(data: &[T], value: f64, key: &F) -> usize
where
    F: Fn(&T) -> f64,
{
    let mut low = 0;
    let mut high = data.len();
    while low < high {
        let mid = low + (high - low) / 2;
        if key(&data[mid]) < value {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low
}

/// Highest index at which `value` could be inserted keeping the order.
fn sorted_last_index_by<T, F>(data: &[T], value: f64, key: &F) -> usize
where
    F: Fn(&T) -> f64,
{
    let mut low = 0;
    let mut high = data.len();
    while low < high {
        let mid = low + (high - low) / 2;
        if key(&data[mid]) <= value {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low
}
