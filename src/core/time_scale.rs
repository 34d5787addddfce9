//! Time scale over epoch milliseconds, with calendar-aware ticks in UTC.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::interval::Interval;
use crate::core::scale::{Scale, interpolate, normalize, tick_step};
use crate::core::ticks::TickFormatter;
use crate::error::{ChartError, ChartResult};

const DURATION_SECOND: f64 = 1_000.0;
const DURATION_MINUTE: f64 = DURATION_SECOND * 60.0;
const DURATION_HOUR: f64 = DURATION_MINUTE * 60.0;
const DURATION_DAY: f64 = DURATION_HOUR * 24.0;
const DURATION_WEEK: f64 = DURATION_DAY * 7.0;
const DURATION_MONTH: f64 = DURATION_DAY * 30.0;
const DURATION_YEAR: f64 = DURATION_DAY * 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Candidate tick spacings, ordered by approximate duration.
const TICK_INTERVALS: [(TimeUnit, u32, f64); 18] = [
    (TimeUnit::Second, 1, DURATION_SECOND),
    (TimeUnit::Second, 5, 5.0 * DURATION_SECOND),
    (TimeUnit::Second, 15, 15.0 * DURATION_SECOND),
    (TimeUnit::Second, 30, 30.0 * DURATION_SECOND),
    (TimeUnit::Minute, 1, DURATION_MINUTE),
    (TimeUnit::Minute, 5, 5.0 * DURATION_MINUTE),
    (TimeUnit::Minute, 15, 15.0 * DURATION_MINUTE),
    (TimeUnit::Minute, 30, 30.0 * DURATION_MINUTE),
    (TimeUnit::Hour, 1, DURATION_HOUR),
    (TimeUnit::Hour, 3, 3.0 * DURATION_HOUR),
    (TimeUnit::Hour, 6, 6.0 * DURATION_HOUR),
    (TimeUnit::Hour, 12, 12.0 * DURATION_HOUR),
    (TimeUnit::Day, 1, DURATION_DAY),
    (TimeUnit::Day, 2, 2.0 * DURATION_DAY),
    (TimeUnit::Week, 1, DURATION_WEEK),
    (TimeUnit::Month, 1, DURATION_MONTH),
    (TimeUnit::Month, 3, 3.0 * DURATION_MONTH),
    (TimeUnit::Year, 1, DURATION_YEAR),
];

/// A calendar unit plus a step, e.g. "every 15 minutes".
///
/// For sub-year units a step greater than one keeps only unit boundaries
/// whose field is a multiple of the step (minute 0, 15, 30, 45). Millisecond
/// and year steps align to multiples of the step since the epoch instead.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TimeInterval {
    unit: TimeUnit,
    step: u32,
}

impl TimeInterval {
    fn every(unit: TimeUnit, step: f64) -> Option<Self> {
        let step = step.floor();
        if !step.is_finite() || step <= 0.0 || step > f64::from(u32::MAX) {
            return None;
        }
        Some(Self {
            unit,
            step: step as u32,
        })
    }

    fn floor(self, t: f64) -> f64 {
        match self.unit {
            TimeUnit::Millisecond => {
                let step = f64::from(self.step);
                (t / step).floor() * step
            }
            TimeUnit::Second => floor_to(t, DURATION_SECOND),
            TimeUnit::Minute => floor_to(t, DURATION_MINUTE),
            TimeUnit::Hour => floor_to(t, DURATION_HOUR),
            TimeUnit::Day => floor_to(t, DURATION_DAY),
            TimeUnit::Week => {
                let day = floor_to(t, DURATION_DAY);
                // 1970-01-01 was a Thursday; weeks start on Sunday.
                let weekday = ((day / DURATION_DAY) + 4.0).rem_euclid(7.0);
                day - weekday * DURATION_DAY
            }
            TimeUnit::Month => to_date(t)
                .and_then(|date| date.with_day(1))
                .map_or(f64::NAN, date_millis),
            TimeUnit::Year => to_date(t)
                .and_then(|date| {
                    let step = i32::try_from(self.step).ok()?;
                    NaiveDate::from_ymd_opt(date.year().div_euclid(step) * step, 1, 1)
                })
                .map_or(f64::NAN, date_millis),
        }
    }

    /// Advances a unit boundary by one step.
    fn offset(self, t: f64) -> f64 {
        match self.unit {
            TimeUnit::Millisecond => t + f64::from(self.step),
            TimeUnit::Second => t + DURATION_SECOND,
            TimeUnit::Minute => t + DURATION_MINUTE,
            TimeUnit::Hour => t + DURATION_HOUR,
            TimeUnit::Day => t + DURATION_DAY,
            TimeUnit::Week => t + DURATION_WEEK,
            TimeUnit::Month => add_months(t, 1),
            TimeUnit::Year => add_months(t, self.step.saturating_mul(12)),
        }
    }

    fn ceil(self, t: f64) -> f64 {
        self.floor(self.offset(self.floor(t - 1.0)))
    }

    fn matches(self, t: f64) -> bool {
        if self.step == 1 {
            return true;
        }
        let step = f64::from(self.step);
        let field = match self.unit {
            TimeUnit::Millisecond | TimeUnit::Week | TimeUnit::Year => return true,
            TimeUnit::Second => (t / DURATION_SECOND).floor().rem_euclid(60.0),
            TimeUnit::Minute => (t / DURATION_MINUTE).floor().rem_euclid(60.0),
            TimeUnit::Hour => (t / DURATION_HOUR).floor().rem_euclid(24.0),
            TimeUnit::Day => to_date(t).map_or(f64::NAN, |date| f64::from(date.day0())),
            TimeUnit::Month => to_date(t).map_or(f64::NAN, |date| f64::from(date.month0())),
        };
        field % step == 0.0
    }

    /// Matching boundaries in `[start, stop)`.
    fn range(self, start: f64, stop: f64) -> Vec<f64> {
        let mut ticks = Vec::new();
        if !start.is_finite() || !stop.is_finite() {
            return ticks;
        }
        let mut t = self.ceil(start);
        while t < stop {
            if self.matches(t) {
                ticks.push(t);
            }
            let next = self.offset(t);
            if !(next > t) {
                break;
            }
            t = next;
        }
        ticks
    }
}

fn floor_to(t: f64, duration: f64) -> f64 {
    (t / duration).floor() * duration
}

fn to_datetime(t: f64) -> Option<DateTime<Utc>> {
    if !t.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(t.floor() as i64)
}

fn to_date(t: f64) -> Option<NaiveDate> {
    to_datetime(t).map(|dt| dt.date_naive())
}

fn date_millis(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(f64::NAN, |dt| dt.and_utc().timestamp_millis() as f64)
}

fn add_months(t: f64, months: u32) -> f64 {
    to_date(t)
        .and_then(|date| date.checked_add_months(Months::new(months)))
        .map_or(f64::NAN, date_millis)
}

/// Picks the tick spacing closest to `|stop - start| / count`.
fn tick_interval(start: f64, stop: f64, count: usize) -> Option<TimeInterval> {
    let target = (stop - start).abs() / count as f64;
    let i = TICK_INTERVALS.partition_point(|&(_, _, duration)| duration <= target);

    if i == TICK_INTERVALS.len() {
        let step = tick_step(start / DURATION_YEAR, stop / DURATION_YEAR, count);
        TimeInterval::every(TimeUnit::Year, step)
    } else if i > 0 {
        let (_, _, lower) = TICK_INTERVALS[i - 1];
        let (_, _, upper) = TICK_INTERVALS[i];
        let (unit, step, _) = if target / lower < upper / target {
            TICK_INTERVALS[i - 1]
        } else {
            TICK_INTERVALS[i]
        };
        TimeInterval::every(unit, f64::from(step))
    } else {
        TimeInterval::every(TimeUnit::Millisecond, tick_step(start, stop, count))
    }
}

/// Multi-scale label: the coarsest unit that still distinguishes `t`.
fn multi_scale_label(t: f64) -> String {
    let unit = |unit| TimeInterval { unit, step: 1 };
    let pattern = if unit(TimeUnit::Second).floor(t) < t {
        ".%3f"
    } else if unit(TimeUnit::Minute).floor(t) < t {
        ":%S"
    } else if unit(TimeUnit::Hour).floor(t) < t {
        "%I:%M"
    } else if unit(TimeUnit::Day).floor(t) < t {
        "%I %p"
    } else if unit(TimeUnit::Month).floor(t) < t {
        if unit(TimeUnit::Week).floor(t) < t {
            "%a %d"
        } else {
            "%b %d"
        }
    } else if unit(TimeUnit::Year).floor(t) < t {
        "%B"
    } else {
        "%Y"
    };
    format_millis(t, pattern)
}

fn format_millis(t: f64, pattern: &str) -> String {
    let mut out = String::new();
    if let Some(dt) = to_datetime(t) {
        if write!(out, "{}", dt.format(pattern)).is_err() {
            warn!(pattern, "time label formatting failed");
            out.clear();
        }
    }
    out
}

/// Converts a time format specifier into a validated strftime pattern.
///
/// `%L` (milliseconds) becomes `%3f`; every other directive passes through.
pub fn parse_time_specifier(specifier: &str) -> ChartResult<String> {
    let mut pattern = String::with_capacity(specifier.len() + 2);
    let mut chars = specifier.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            pattern.push(c);
            continue;
        }
        match chars.next() {
            Some('L') => pattern.push_str("%3f"),
            Some(directive) => {
                pattern.push('%');
                pattern.push(directive);
            }
            None => pattern.push('%'),
        }
    }

    if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidArgument(format!(
            "invalid time format specifier: {specifier:?}"
        )));
    }
    Ok(pattern)
}

/// Linear scale whose domain is epoch milliseconds in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    domain: Interval,
    range: Interval,
    round: bool,
}

impl TimeScale {
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
}

impl Scale for TimeScale {
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
        if count == 0 {
            return Vec::new();
        }
        let (mut t0, mut t1) = (self.domain.min, self.domain.max);
        let reverse = t1 < t0;
        if reverse {
            std::mem::swap(&mut t0, &mut t1);
        }

        let Some(interval) = tick_interval(t0, t1, count) else {
            return Vec::new();
        };
        // Inclusive of the domain end.
        let mut ticks = interval.range(t0, t1 + 1.0);
        if reverse {
            ticks.reverse();
        }
        ticks
    }

    /// Without a specifier, labels use the multi-scale format. The count
    /// does not affect time labels.
    fn tick_format(&self, _count: usize, specifier: Option<&str>) -> ChartResult<TickFormatter> {
        match specifier {
            None => Ok(TickFormatter::new(multi_scale_label)),
            Some(specifier) => {
                let pattern = parse_time_specifier(specifier)?;
                Ok(TickFormatter::new(move |t| format_millis(t, &pattern)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(y: i32, m: u32, d: u32, h: u32, min: u32) -> f64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .map(|dt| dt.and_utc().timestamp_millis() as f64)
            .expect("valid date")
    }

    #[test]
    fn hour_range_ticks_on_quarter_hours() {
        let scale = TimeScale::new(
            Interval::new(millis(2020, 1, 1, 10, 0), millis(2020, 1, 1, 11, 0)),
            Interval::new(0.0, 100.0),
        );
        let ticks = scale.ticks(5);
        let expected: Vec<f64> = [0, 15, 30, 45]
            .iter()
            .map(|&m| millis(2020, 1, 1, 10, m))
            .chain(std::iter::once(millis(2020, 1, 1, 11, 0)))
            .collect();
        assert_eq!(ticks, expected);
    }

    #[test]
    fn month_ticks_land_on_first_of_month() {
        let scale = TimeScale::new(
            Interval::new(millis(2020, 1, 15, 0, 0), millis(2020, 6, 15, 0, 0)),
            Interval::new(0.0, 100.0),
        );
        let ticks = scale.ticks(5);
        assert_eq!(ticks.first().copied(), Some(millis(2020, 2, 1, 0, 0)));
        assert_eq!(ticks.len(), 5);
    }

    #[test]
    fn multi_scale_labels_pick_coarsest_unit() {
        assert_eq!(multi_scale_label(millis(2020, 1, 1, 0, 0)), "2020");
        assert_eq!(multi_scale_label(millis(2020, 3, 1, 0, 0)), "March");
        // 2020-03-08 is a Sunday, so it starts a week.
        assert_eq!(multi_scale_label(millis(2020, 3, 8, 0, 0)), "Mar 08");
        assert_eq!(multi_scale_label(millis(2020, 3, 10, 0, 0)), "Tue 10");
        assert_eq!(multi_scale_label(millis(2020, 3, 10, 15, 0)), "03 PM");
        assert_eq!(multi_scale_label(millis(2020, 3, 10, 15, 30)), "03:30");
        assert_eq!(multi_scale_label(millis(2020, 3, 10, 15, 30) + 250.0), ".250");
    }

    #[test]
    fn custom_specifiers_are_validated() {
        assert_eq!(parse_time_specifier("%H:%M.%L").unwrap(), "%H:%M.%3f");
        assert!(parse_time_specifier("%Q%").is_err());
    }
}
