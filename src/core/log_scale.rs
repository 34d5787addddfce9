use serde::{Deserialize, Serialize};

use crate::core::interval::Interval;
use crate::core::number_format::FormatSpecifier;
use crate::core::scale::{Scale, interpolate, linear_ticks, normalize};
use crate::core::ticks::TickFormatter;
use crate::error::ChartResult;

const BASE: f64 = 10.0;

/// Default format for log tick labels: exponent notation, no decimals.
pub const DEFAULT_LOG_TICK_FORMAT: &str = ".0e";

/// Tick count assumed when thinning labels.
const LABEL_DENSITY_COUNT: usize = 10;

/// Base-10 logarithmic scale.
///
/// The domain must not cross or touch zero. A domain entirely below zero is
/// mirrored, so `[-1000, -1]` behaves like `[1, 1000]` with signs flipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogScale {
    domain: Interval,
    range: Interval,
    round: bool,
}

impl LogScale {
    #[must_use]
    pub const fn new(domain: Interval, range: Interval) -> Self {
        Self {
            domain,
            range,
            round: false,
        }
    }

    #[must_use]
    pub const fn rounded(domain: Interval, range: Interval) -> Self {
        Self {
            domain,
            range,
            round: true,
        }
    }

    fn is_mirrored(&self) -> bool {
        self.domain.min < 0.0
    }

    fn log(&self, value: f64) -> f64 {
        if self.is_mirrored() {
            -(-value).log10()
        } else {
            value.log10()
        }
    }

    fn pow(&self, exponent: f64) -> f64 {
        if self.is_mirrored() {
            -pow10(-exponent)
        } else {
            pow10(exponent)
        }
    }

    fn log_domain(&self) -> Interval {
        Interval::new(self.log(self.domain.min), self.log(self.domain.max))
    }
}

/// Exact powers of ten for integral exponents.
fn pow10(exponent: f64) -> f64 {
    if exponent.fract() != 0.0 || exponent.abs() > 300.0 {
        return 10f64.powf(exponent);
    }
    let magnitude = 10f64.powi(exponent.abs() as i32);
    if exponent < 0.0 { 1.0 / magnitude } else { magnitude }
}

impl Scale for LogScale {
    fn domain(&self) -> Interval {
        self.domain
    }

    fn range(&self) -> Interval {
        self.range
    }

    fn map(&self, value: f64) -> f64 {
        let t = normalize(self.log_domain(), self.log(value));
        interpolate(self.range, t, self.round)
    }

    fn invert(&self, position: f64) -> f64 {
        let t = normalize(self.range, position);
        self.pow(interpolate(self.log_domain(), t, false))
    }

    /// Every power of ten and its integer multiples while the domain spans
    /// fewer than `count` decades; nice powers of ten otherwise.
    fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut u, mut v) = (self.domain.min, self.domain.max);
        let reverse = v < u;
        if reverse {
            std::mem::swap(&mut u, &mut v);
        }

        let (mut i, mut j) = (self.log(u), self.log(v));
        if !i.is_finite() || !j.is_finite() {
            return Vec::new();
        }

        let mut ticks = Vec::new();
        if j - i < count as f64 {
            i = i.round() - 1.0;
            j = j.round() + 1.0;
            let mut exponent = i;
            while exponent < j {
                let power = self.pow(exponent);
                let multipliers: Box<dyn Iterator<Item = f64>> = if u > 0.0 {
                    Box::new((1..10).map(f64::from))
                } else {
                    Box::new((1..10).rev().map(f64::from))
                };
                for k in multipliers {
                    let tick = power * k;
                    if tick < u {
                        continue;
                    }
                    if tick > v {
                        break;
                    }
                    ticks.push(tick);
                }
                exponent += 1.0;
            }
        } else {
            let n = (j - i).min(count as f64) as usize;
            ticks = linear_ticks(i, j, n)
                .into_iter()
                .map(|exponent| self.pow(exponent))
                .collect();
        }

        if reverse {
            ticks.reverse();
        }
        ticks
    }

    /// Labels only ticks whose leading digit is small enough to fit `count`
    /// labels; the rest get an empty string.
    fn tick_format(&self, count: usize, specifier: Option<&str>) -> ChartResult<TickFormatter> {
        let spec: FormatSpecifier = specifier.unwrap_or(DEFAULT_LOG_TICK_FORMAT).parse()?;
        let tick_total = self.ticks(LABEL_DENSITY_COUNT).len().max(1);
        let limit = (BASE * count as f64 / tick_total as f64).max(1.0);
        let scale = *self;

        Ok(TickFormatter::new(move |value| {
            let mut leading = value / scale.pow(scale.log(value).round());
            if leading * BASE < BASE - 0.5 {
                leading *= BASE;
            }
            if leading <= limit {
                spec.format(value)
            } else {
                String::new()
            }
        }))
    }
}
