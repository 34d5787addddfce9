use std::fmt;
use std::sync::Arc;

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::core::interval::Interval;
use crate::core::scale::Scale;
use crate::error::{ChartError, ChartResult};

/// Tick count used when no tick spec (or a non-count spec) is given.
pub const DEFAULT_TICK_COUNT: usize = 5;

type TickFn = dyn Fn(Interval) -> Vec<f64> + Send + Sync;
type FormatFn = dyn Fn(f64) -> String + Send + Sync;

/// Shareable tick label formatter.
#[derive(Clone)]
pub struct TickFormatter(Arc<FormatFn>);

impl TickFormatter {
    pub fn new<F>(format: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(format))
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for TickFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TickFormatter(..)")
    }
}

impl PartialEq for TickFormatter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Where an axis gets its tick values from.
#[derive(Clone)]
pub enum TickSpec {
    /// Ask the scale for about this many nice ticks.
    Count(usize),
    /// Use these values verbatim.
    Values(Vec<f64>),
    /// Compute values from the current domain.
    Function(Arc<TickFn>),
}

impl TickSpec {
    pub fn function<F>(ticks: F) -> Self
    where
        F: Fn(Interval) -> Vec<f64> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(ticks))
    }

    /// Interprets a JSON value as a tick spec.
    ///
    /// Numbers become counts and arrays of numbers become explicit values.
    /// Fractional counts are truncated toward zero, so `2.5` asks for two
    /// ticks. Anything else fails with `InvalidArgument`.
    pub fn from_json(value: &Value) -> ChartResult<Self> {
        match value {
            Value::Number(number) => {
                let count = number
                    .as_f64()
                    .filter(|count| count.is_finite() && *count >= 0.0)
                    .ok_or_else(|| {
                        ChartError::InvalidArgument(format!(
                            "tick count must be a non-negative number, got {number}"
                        ))
                    })?;
                Ok(Self::Count(count.trunc() as usize))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_f64().ok_or_else(|| {
                        ChartError::InvalidArgument(format!(
                            "explicit tick values must be numbers, got {item}"
                        ))
                    })
                })
                .collect::<ChartResult<Vec<_>>>()
                .map(Self::Values),
            other => Err(ChartError::InvalidArgument(format!(
                "ticks must be a function, an array or a number, got {other}"
            ))),
        }
    }

    /// Tick count handed to the formatter.
    #[must_use]
    pub fn effective_count(&self) -> usize {
        match self {
            Self::Count(count) => *count,
            Self::Values(_) | Self::Function(_) => DEFAULT_TICK_COUNT,
        }
    }
}

impl fmt::Debug for TickSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => f.debug_tuple("Count").field(count).finish(),
            Self::Values(values) => f.debug_tuple("Values").field(values).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl PartialEq for TickSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Count(a), Self::Count(b)) => a == b,
            (Self::Values(a), Self::Values(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Serialize for TickSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(count) => serializer.serialize_u64(*count as u64),
            Self::Values(values) => values.serialize(serializer),
            Self::Function(_) => Err(S::Error::custom("tick functions cannot be serialized")),
        }
    }
}

impl<'de> Deserialize<'de> for TickSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// How tick labels are produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TickFormatSpec {
    /// A specifier string understood by the scale's formatter.
    Specifier(String),
    /// A caller-supplied formatter, used as-is.
    Function(TickFormatter),
}

impl TickFormatSpec {
    pub fn function<F>(format: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self::Function(TickFormatter::new(format))
    }
}

impl Serialize for TickFormatSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Specifier(specifier) => serializer.serialize_str(specifier),
            Self::Function(_) => Err(S::Error::custom(
                "tick format functions cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for TickFormatSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Specifier)
    }
}

/// Tick values plus the formatter for their labels.
#[derive(Debug, Clone)]
pub struct ComputedTicks {
    pub ticks: Vec<f64>,
    pub format: TickFormatter,
}

impl ComputedTicks {
    /// `(value, label)` pairs in tick order.
    #[must_use]
    pub fn labeled(&self) -> Vec<(f64, String)> {
        self.ticks
            .iter()
            .map(|&tick| (tick, self.format.format(tick)))
            .collect()
    }
}

/// Derives tick values and a label formatter for `scale`.
///
/// Without a tick spec, or with a zero count, the scale is asked for
/// [`DEFAULT_TICK_COUNT`] ticks. The formatter receives the spec's
/// effective count (zero included), so label precision follows tick density.
pub fn compute_ticks<S>(
    scale: &S,
    ticks: Option<&TickSpec>,
    tick_format: Option<&TickFormatSpec>,
) -> ChartResult<ComputedTicks>
where
    S: Scale + ?Sized,
{
    let count = ticks.map_or(DEFAULT_TICK_COUNT, TickSpec::effective_count);

    let values = match ticks {
        None | Some(TickSpec::Count(0)) => scale.ticks(DEFAULT_TICK_COUNT),
        Some(TickSpec::Count(count)) => scale.ticks(*count),
        Some(TickSpec::Values(values)) => values.clone(),
        Some(TickSpec::Function(ticks)) => ticks(scale.domain()),
    };

    let format = match tick_format {
        Some(TickFormatSpec::Function(format)) => format.clone(),
        Some(TickFormatSpec::Specifier(specifier)) => scale.tick_format(count, Some(specifier))?,
        None => scale.tick_format(count, None)?,
    };

    debug!(count, ticks = values.len(), "computed ticks");
    Ok(ComputedTicks {
        ticks: values,
        format,
    })
}
