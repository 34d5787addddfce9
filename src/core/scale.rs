use serde::{Deserialize, Serialize};

use crate::core::interval::Interval;
use crate::core::log_scale::LogScale;
use crate::core::number_format::{
    FormatSpecifier, FormatType, precision_fixed, precision_prefix, precision_round,
    prefix_formatter,
};
use crate::core::primitives::round_half_up;
use crate::core::ticks::TickFormatter;
use crate::core::time_scale::TimeScale;
use crate::error::ChartResult;

/// Default format for linear tick labels: grouped fixed point.
pub const DEFAULT_LINEAR_TICK_FORMAT: &str = ",f";

/// Continuous mapping from a domain interval onto a pixel range.
pub trait Scale {
    fn domain(&self) -> Interval;
    fn range(&self) -> Interval;

    /// Maps a domain value onto the range.
    fn map(&self, value: f64) -> f64;

    /// Maps a range position back onto the domain.
    fn invert(&self, position: f64) -> f64;

    /// Roughly `count` human-friendly values inside the domain.
    fn ticks(&self, count: usize) -> Vec<f64>;

    /// Label formatter suited to `ticks(count)`.
    ///
    /// Fails with `InvalidArgument` when `specifier` cannot be parsed.
    fn tick_format(&self, count: usize, specifier: Option<&str>) -> ChartResult<TickFormatter>;
}

/// Proportional scale, optionally rounding outputs to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: Interval,
    range: Interval,
    round: bool,
}

impl LinearScale {
    #[must_use]
    pub const fn new(domain: Interval, range: Interval) -> Self {
        Self {
            domain,
            range,
            round: false,
        }
    }

    /// Scale whose `map` output is rounded half-up to an integer.
    #[must_use]
    pub const fn rounded(domain: Interval, range: Interval) -> Self {
        Self {
            domain,
            range,
            round: true,
        }
    }

    #[must_use]
    pub const fn is_rounded(self) -> bool {
        self.round
    }
}

impl Scale for LinearScale {
    fn domain(&self) -> Interval {
        self.domain
    }

    fn range(&self) -> Interval {
        self.range
    }

    fn map(&self, value: f64) -> f64 {
        interpolate(self.range, normalize(self.domain, value), self.round)
    }

    fn invert(&self, position: f64) -> f64 {
        interpolate(self.domain, normalize(self.range, position), false)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.min, self.domain.max, count)
    }

    fn tick_format(&self, count: usize, specifier: Option<&str>) -> ChartResult<TickFormatter> {
        linear_tick_format(self.domain, count, specifier)
    }
}

/// Relative position of `value` within `domain`.
///
/// A zero-width domain maps every value to the middle of the range.
pub(crate) fn normalize(domain: Interval, value: f64) -> f64 {
    let span = domain.max - domain.min;
    if span == 0.0 {
        return 0.5;
    }
    (value - domain.min) / span
}

pub(crate) fn interpolate(range: Interval, t: f64, round: bool) -> f64 {
    let value = range.min + (range.max - range.min) * t;
    if round { round_half_up(value) } else { value }
}

const E10: f64 = 7.071_067_811_865_475_5; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Nice tick values covering `[start, stop]`, about `count` of them.
///
/// Values are multiples of 1, 2 or 5 times a power of ten. A reversed
/// interval yields the same values in descending order.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (start, stop) = if reverse { (stop, start) } else { (start, stop) };

    let step = tick_increment(start, stop, count);
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }

    let mut ticks: Vec<f64> = if step > 0.0 {
        let first = (start / step).ceil();
        let last = (stop / step).floor();
        let n = (last - first + 1.0).max(0.0) as usize;
        (0..n).map(|i| (first + i as f64) * step).collect()
    } else {
        let first = (start * step).floor();
        let last = (stop * step).ceil();
        let n = (first - last + 1.0).max(0.0) as usize;
        (0..n).map(|i| (first - i as f64) / step).collect()
    };

    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Power-of-ten tick increment.
///
/// Positive results are the step itself; negative results are the negated
/// inverse of a sub-unit step, which keeps fractional steps exact.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Absolute distance between adjacent nice ticks, signed like `stop - start`.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let step0 = (stop - start).abs() / count.max(1) as f64;
    let mut step1 = 10f64.powf(step0.log10().floor());
    let error = step0 / step1;
    if error >= E10 {
        step1 *= 10.0;
    } else if error >= E5 {
        step1 *= 5.0;
    } else if error >= E2 {
        step1 *= 2.0;
    }
    if stop < start { -step1 } else { step1 }
}

/// Formatter for linear ticks over `domain`.
///
/// Without an explicit precision the formatter picks the fewest digits that
/// still tell adjacent ticks apart.
pub fn linear_tick_format(
    domain: Interval,
    count: usize,
    specifier: Option<&str>,
) -> ChartResult<TickFormatter> {
    let (start, stop) = (domain.min, domain.max);
    let step = tick_step(start, stop, count);
    let mut spec: FormatSpecifier = specifier.unwrap_or(DEFAULT_LINEAR_TICK_FORMAT).parse()?;

    match spec.kind {
        FormatType::SiPrefix => {
            let value = start.abs().max(stop.abs());
            if spec.precision.is_none() {
                spec.precision = precision_prefix(step, value);
            }
            return Ok(TickFormatter::new(prefix_formatter(spec, value)));
        }
        FormatType::None | FormatType::Exponent | FormatType::General | FormatType::Rounded => {
            if spec.precision.is_none() {
                spec.precision = precision_round(step, start.abs().max(stop.abs())).map(|p| {
                    if spec.kind == FormatType::Exponent {
                        p.saturating_sub(1)
                    } else {
                        p
                    }
                });
            }
        }
        FormatType::Fixed | FormatType::Percent => {
            if spec.precision.is_none() {
                spec.precision = precision_fixed(step).map(|p| {
                    if spec.kind == FormatType::Percent {
                        p.saturating_sub(2)
                    } else {
                        p
                    }
                });
            }
        }
        FormatType::Integer => {}
    }

    Ok(TickFormatter::new(move |value| spec.format(value)))
}

/// Which continuous scale a layer or axis maps values with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
    Time,
}

impl ScaleKind {
    #[must_use]
    pub fn build(self, domain: Interval, range: Interval) -> ContinuousScale {
        match self {
            Self::Linear => ContinuousScale::Linear(LinearScale::new(domain, range)),
            Self::Log => ContinuousScale::Log(LogScale::new(domain, range)),
            Self::Time => ContinuousScale::Time(TimeScale::new(domain, range)),
        }
    }

    #[must_use]
    pub fn build_rounded(self, domain: Interval, range: Interval) -> ContinuousScale {
        match self {
            Self::Linear => ContinuousScale::Linear(LinearScale::rounded(domain, range)),
            Self::Log => ContinuousScale::Log(LogScale::rounded(domain, range)),
            Self::Time => ContinuousScale::Time(TimeScale::rounded(domain, range)),
        }
    }
}

/// A scale chosen at runtime from a [`ScaleKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContinuousScale {
    Linear(LinearScale),
    Log(LogScale),
    Time(TimeScale),
}

impl ContinuousScale {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Log(_) => ScaleKind::Log,
            Self::Time(_) => ScaleKind::Time,
        }
    }

    fn inner(&self) -> &dyn Scale {
        match self {
            Self::Linear(scale) => scale,
            Self::Log(scale) => scale,
            Self::Time(scale) => scale,
        }
    }
}

impl Scale for ContinuousScale {
    fn domain(&self) -> Interval {
        self.inner().domain()
    }

    fn range(&self) -> Interval {
        self.inner().range()
    }

    fn map(&self, value: f64) -> f64 {
        self.inner().map(value)
    }

    fn invert(&self, position: f64) -> f64 {
        self.inner().invert(position)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        self.inner().ticks(count)
    }

    fn tick_format(&self, count: usize, specifier: Option<&str>) -> ChartResult<TickFormatter> {
        self.inner().tick_format(count, specifier)
    }
}
