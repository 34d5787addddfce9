//! Tick label number formatting.
//!
//! Specifiers follow a compact `[sign][,][.precision][~][type]` grammar:
//!
//! | type | output |
//! |------|--------|
//! | `f`  | fixed point, `precision` decimals |
//! | `d`  | integer, rounded |
//! | `e`  | exponent notation, `precision` decimals |
//! | `%`  | value × 100, fixed point, percent sign |
//! | `s`  | SI prefix, `precision` significant digits |
//! | `r`  | decimal notation, `precision` significant digits |
//! | `g`  | exponent or decimal notation, `precision` significant digits |
//! | none | like `g` with insignificant trailing zeros removed |
//!
//! `,` groups thousands and `~` trims insignificant trailing zeros.

use std::fmt;
use std::str::FromStr;

use crate::error::{ChartError, ChartResult};

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignMode {
    /// Minus for negative values only.
    #[default]
    Minus,
    /// Plus for zero and positive values, minus for negative.
    Plus,
    /// Space for zero and positive values, minus for negative.
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatType {
    #[default]
    None,
    Fixed,
    Integer,
    Exponent,
    Percent,
    SiPrefix,
    Rounded,
    General,
}

impl FormatType {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'f' => Self::Fixed,
            'd' => Self::Integer,
            'e' => Self::Exponent,
            '%' => Self::Percent,
            's' => Self::SiPrefix,
            'r' => Self::Rounded,
            'g' => Self::General,
            _ => return None,
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Fixed => "f",
            Self::Integer => "d",
            Self::Exponent => "e",
            Self::Percent => "%",
            Self::SiPrefix => "s",
            Self::Rounded => "r",
            Self::General => "g",
        }
    }

    fn uses_significant_digits(self) -> bool {
        matches!(
            self,
            Self::General | Self::Rounded | Self::SiPrefix | Self::None
        )
    }
}

/// Parsed number format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatSpecifier {
    pub sign: SignMode,
    pub grouping: bool,
    pub precision: Option<usize>,
    pub trim: bool,
    pub kind: FormatType,
}

impl FromStr for FormatSpecifier {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidArgument(format!("invalid format specifier: {input:?}"));
        let mut spec = Self::default();
        let mut rest = input;

        if let Some(c) = rest.chars().next() {
            let sign = match c {
                '-' => Some(SignMode::Minus),
                '+' => Some(SignMode::Plus),
                ' ' => Some(SignMode::Space),
                _ => None,
            };
            if let Some(sign) = sign {
                spec.sign = sign;
                rest = &rest[1..];
            }
        }

        if let Some(stripped) = rest.strip_prefix(',') {
            spec.grouping = true;
            rest = stripped;
        }

        if let Some(stripped) = rest.strip_prefix('.') {
            let digits_len = stripped
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(stripped.len());
            if digits_len == 0 {
                return Err(invalid());
            }
            let precision = stripped[..digits_len].parse::<usize>().map_err(|_| invalid())?;
            spec.precision = Some(precision);
            rest = &stripped[digits_len..];
        }

        if let Some(stripped) = rest.strip_prefix('~') {
            spec.trim = true;
            rest = stripped;
        }

        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {}
            (Some(c), None) => spec.kind = FormatType::from_char(c).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        }

        Ok(spec)
    }
}

impl fmt::Display for FormatSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign {
            SignMode::Minus => {}
            SignMode::Plus => f.write_str("+")?,
            SignMode::Space => f.write_str(" ")?,
        }
        if self.grouping {
            f.write_str(",")?;
        }
        if let Some(precision) = self.precision {
            write!(f, ".{precision}")?;
        }
        if self.trim {
            f.write_str("~")?;
        }
        f.write_str(self.kind.as_str())
    }
}

impl FormatSpecifier {
    /// Precision after applying the per-type default and limits.
    fn effective_precision(&self) -> usize {
        match self.precision {
            None if self.kind == FormatType::None => 12,
            None => 6,
            Some(p) if self.kind.uses_significant_digits() => p.clamp(1, 21),
            Some(p) => p.min(20),
        }
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_owned();
        }

        let negative = value < 0.0;
        let magnitude = value.abs();
        let precision = self.effective_precision();

        let (mut body, suffix) = if magnitude.is_infinite() {
            ("Infinity".to_owned(), String::new())
        } else {
            match self.kind {
                FormatType::Fixed => (format!("{magnitude:.precision$}"), String::new()),
                FormatType::Integer => (format!("{:.0}", magnitude.round()), String::new()),
                FormatType::Exponent => (format_exponent(magnitude, precision), String::new()),
                FormatType::Percent => (
                    format!("{:.precision$}", magnitude * 100.0),
                    "%".to_owned(),
                ),
                FormatType::SiPrefix => format_si_auto(magnitude, precision),
                FormatType::Rounded => (format_rounded(magnitude, precision), String::new()),
                FormatType::General => (format_general(magnitude, precision), String::new()),
                FormatType::None => (
                    trim_insignificant_zeros(&format_general(magnitude, precision)),
                    String::new(),
                ),
            }
        };

        if self.trim {
            body = trim_insignificant_zeros(&body);
        }

        // A negative value that rounds to zero is printed without a sign.
        let negative = negative && !is_zero_digits(&body);

        if self.grouping {
            body = group_thousands(&body);
        }

        let sign = if negative {
            "-"
        } else {
            match self.sign {
                SignMode::Minus => "",
                SignMode::Plus => "+",
                SignMode::Space => " ",
            }
        };

        format!("{sign}{body}{suffix}")
    }
}

/// Parses and formats in one step.
pub fn format_number(specifier: &str, value: f64) -> ChartResult<String> {
    Ok(specifier.parse::<FormatSpecifier>()?.format(value))
}

/// Decimal exponent of `value` as written in shortest exponent notation.
///
/// Returns `None` for NaN and infinities.
#[must_use]
pub fn decimal_exponent(value: f64) -> Option<i32> {
    if !value.is_finite() {
        return None;
    }
    let repr = format!("{:e}", value.abs());
    repr.split_once('e')
        .and_then(|(_, exponent)| exponent.parse::<i32>().ok())
}

/// Decimal places needed to tell apart values `step` apart.
#[must_use]
pub fn precision_fixed(step: f64) -> Option<usize> {
    decimal_exponent(step.abs()).map(|e| (-e).max(0) as usize)
}

/// Significant digits needed to tell apart values up to `max`, `step` apart.
#[must_use]
pub fn precision_round(step: f64, max: f64) -> Option<usize> {
    let step = step.abs();
    let max = max.abs() - step;
    let max_exponent = decimal_exponent(max)?;
    let step_exponent = decimal_exponent(step)?;
    Some((max_exponent - step_exponent).max(0) as usize + 1)
}

/// Decimal places for SI-prefixed values around `value`, `step` apart.
#[must_use]
pub fn precision_prefix(step: f64, value: f64) -> Option<usize> {
    let value_exponent = decimal_exponent(value)?;
    let step_exponent = decimal_exponent(step.abs())?;
    let prefix_exponent = (value_exponent.div_euclid(3)).clamp(-8, 8) * 3;
    Some((prefix_exponent - step_exponent).max(0) as usize)
}

/// Fixed-point formatter scaled to the SI prefix of `reference`.
///
/// Every value shares the same prefix, so tick labels line up.
#[must_use]
pub fn prefix_formatter(spec: FormatSpecifier, reference: f64) -> impl Fn(f64) -> String + Send + Sync + 'static {
    let prefix_exponent = decimal_exponent(reference)
        .map(|e| e.div_euclid(3).clamp(-8, 8) * 3)
        .unwrap_or(0);
    let scale = 10f64.powi(-prefix_exponent);
    let prefix = SI_PREFIXES[(8 + prefix_exponent / 3) as usize];
    let fixed = FormatSpecifier {
        kind: FormatType::Fixed,
        ..spec
    };
    move |value| format!("{}{prefix}", fixed.format(value * scale))
}

fn format_exponent(value: f64, decimals: usize) -> String {
    let repr = format!("{value:.decimals$e}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => repr,
    }
}

/// Rounds to `digits` significant digits, returning the value and its exponent.
fn round_significant(value: f64, digits: usize) -> (f64, i32) {
    let repr = format!("{:.*e}", digits.saturating_sub(1), value);
    let exponent = repr
        .split_once('e')
        .and_then(|(_, e)| e.parse::<i32>().ok())
        .unwrap_or(0);
    (repr.parse::<f64>().unwrap_or(value), exponent)
}

fn format_rounded(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.*}", digits.saturating_sub(1), 0.0);
    }
    let (rounded, exponent) = round_significant(value, digits);
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    format!("{rounded:.decimals$}")
}

fn format_general(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.*}", digits.saturating_sub(1), 0.0);
    }
    let (_, exponent) = round_significant(value, digits);
    if exponent < -6 || exponent >= digits as i32 {
        format_exponent(value, digits.saturating_sub(1))
    } else {
        format_rounded(value, digits)
    }
}

fn format_si_auto(value: f64, digits: usize) -> (String, String) {
    let exponent = if value == 0.0 {
        0
    } else {
        round_significant(value, digits).1
    };
    let prefix_exponent = exponent.div_euclid(3).clamp(-8, 8) * 3;
    let scaled = value * 10f64.powi(-prefix_exponent);
    let prefix = SI_PREFIXES[(8 + prefix_exponent / 3) as usize];
    (format_rounded(scaled, digits), prefix.to_owned())
}

fn trim_insignificant_zeros(repr: &str) -> String {
    let (mantissa, exponent) = match repr.find('e') {
        Some(index) => repr.split_at(index),
        None => (repr, ""),
    };
    if !mantissa.contains('.') {
        return repr.to_owned();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{exponent}")
}

fn is_zero_digits(body: &str) -> bool {
    let mantissa = body.split('e').next().unwrap_or(body);
    mantissa
        .chars()
        .filter(char::is_ascii_digit)
        .all(|c| c == '0')
        && mantissa.chars().any(|c| c.is_ascii_digit())
}

fn group_thousands(body: &str) -> String {
    let integer_len = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (integer, rest) = body.split_at(integer_len);
    if integer.len() <= 3 {
        return body.to_owned();
    }

    let mut grouped = String::with_capacity(body.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push_str(rest);
    grouped
}
