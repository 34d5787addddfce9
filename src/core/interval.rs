use serde::{Deserialize, Serialize};

/// Closed numeric range, typically a visible domain.
///
/// `min <= max` is expected but not enforced; inverted and zero-width
/// intervals flow through every operation without panicking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Value at `fraction` of the way from `min` to `max`.
    #[must_use]
    pub fn value_at(self, fraction: f64) -> f64 {
        self.min + fraction * self.width()
    }

    /// Same bounds with `min <= max`.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.min <= self.max {
            self
        } else {
            Self::new(self.max, self.min)
        }
    }
}

/// Shifts both bounds by `logical_units` widths of the interval.
#[must_use]
pub fn pan_interval(interval: Interval, logical_units: f64) -> Interval {
    let delta = logical_units * interval.width();
    Interval::new(interval.min + delta, interval.max + delta)
}

/// Scales the interval width by `factor`, keeping the point at
/// `anchor_fraction` (0 = `min`, 1 = `max`) in place.
///
/// `factor < 1` zooms in, `factor > 1` zooms out.
#[must_use]
pub fn zoom_interval(interval: Interval, factor: f64, anchor_fraction: f64) -> Interval {
    let width = interval.width();
    let anchor = interval.min + anchor_fraction * width;
    let new_width = width * factor;
    let new_min = anchor - anchor_fraction * new_width;
    Interval::new(new_min, new_min + new_width)
}

/// Maps a wheel delta onto a multiplicative zoom factor.
///
/// Equal and opposite deltas produce reciprocal factors, and no delta can
/// produce a zero or negative factor.
#[must_use]
pub fn zoom_factor_from_wheel_delta(delta: f64, zoom_speed: f64) -> f64 {
    (-delta * zoom_speed).exp()
}
