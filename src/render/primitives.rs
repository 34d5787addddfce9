use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Parses from and serializes to CSS color strings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels and a 0..=1 alpha.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidArgument(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    fn channel8(value: f64) -> u8 {
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

fn invalid_color(input: &str) -> ChartError {
    ChartError::InvalidArgument(format!("invalid color: {input:?}"))
}

fn parse_hex(input: &str, hex: &str) -> ChartResult<Color> {
    let digit = |c: char| c.to_digit(16).ok_or_else(|| invalid_color(input));
    let digits = hex.chars().map(digit).collect::<ChartResult<Vec<u32>>>()?;
    let byte = |hi: u32, lo: u32| (hi * 16 + lo) as u8;

    match digits.as_slice() {
        [r, g, b] => Ok(Color::from_rgb8(byte(*r, *r), byte(*g, *g), byte(*b, *b), 1.0)),
        [r1, r2, g1, g2, b1, b2] => Ok(Color::from_rgb8(
            byte(*r1, *r2),
            byte(*g1, *g2),
            byte(*b1, *b2),
            1.0,
        )),
        [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Color::from_rgb8(
            byte(*r1, *r2),
            byte(*g1, *g2),
            byte(*b1, *b2),
            f64::from(byte(*a1, *a2)) / 255.0,
        )),
        _ => Err(invalid_color(input)),
    }
}

fn parse_functional(input: &str, args: &str, with_alpha: bool) -> ChartResult<Color> {
    let parts = args
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|_| invalid_color(input)))
        .collect::<ChartResult<Vec<f64>>>()?;

    let (rgb, alpha) = match (parts.as_slice(), with_alpha) {
        ([r, g, b], false) => ([*r, *g, *b], 1.0),
        ([r, g, b, a], true) => ([*r, *g, *b], *a),
        _ => return Err(invalid_color(input)),
    };
    let color = Color::rgba(rgb[0] / 255.0, rgb[1] / 255.0, rgb[2] / 255.0, alpha);
    color.validate().map_err(|_| invalid_color(input))?;
    Ok(color)
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(input, hex);
        }
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(input, args, true);
        }
        if let Some(args) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(input, args, false);
        }

        match lower.as_str() {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            "transparent" => Ok(Self::TRANSPARENT),
            "red" => Ok(Self::from_rgb8(255, 0, 0, 1.0)),
            "green" => Ok(Self::from_rgb8(0, 128, 0, 1.0)),
            "blue" => Ok(Self::from_rgb8(0, 0, 255, 1.0)),
            "gray" | "grey" => Ok(Self::from_rgb8(128, 128, 128, 1.0)),
            "orange" => Ok(Self::from_rgb8(255, 165, 0, 1.0)),
            _ => Err(invalid_color(input)),
        }
    }
}

impl fmt::Display for Color {
    /// Opaque colors print as `#rrggbb`, others as `rgba(r, g, b, a)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = (
            Self::channel8(self.red),
            Self::channel8(self.green),
            Self::channel8(self.blue),
        );
        if self.alpha >= 1.0 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "rgba({r}, {g}, {b}, {})", self.alpha)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Stroke end style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Horizontal text anchor relative to the `fill_text` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text anchor relative to the `fill_text` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// CSS-style font shorthand limited to `<size>px <family>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Font {
    pub size_px: f64,
    pub family: String,
}

impl Font {
    #[must_use]
    pub fn new(size_px: f64, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(12.0, "sans-serif")
    }
}

impl FromStr for Font {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidArgument(format!("invalid font: {input:?}"));
        let (size, family) = input.trim().split_once(char::is_whitespace).ok_or_else(invalid)?;
        let size_px = size
            .strip_suffix("px")
            .and_then(|size| size.parse::<f64>().ok())
            .filter(|size| size.is_finite() && *size > 0.0)
            .ok_or_else(invalid)?;
        let family = family.trim();
        if family.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(size_px, family))
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

impl TryFrom<String> for Font {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        value.parse()
    }
}

impl From<Font> for String {
    fn from(font: Font) -> Self {
        font.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_color_forms() {
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!(
            "rgba(0, 0, 0, 0.7)".parse::<Color>().unwrap(),
            Color::rgba(0.0, 0.0, 0.0, 0.7)
        );
        assert_eq!("RGB(255,255,255)".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#00000000".parse::<Color>().unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn rejects_malformed_colors() {
        for input in ["", "#12", "#ggg", "rgba(1,2,3)", "rgb(300, 0, 0)", "chartreuse-ish"] {
            assert!(input.parse::<Color>().is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        let color: Color = "#444".parse().unwrap();
        assert_eq!(color.to_string(), "#444444");
        assert_eq!(Color::rgba(0.0, 0.0, 0.0, 0.1).to_string(), "rgba(0, 0, 0, 0.1)");
    }

    #[test]
    fn font_shorthand_parses_size_and_family() {
        let font: Font = "12px sans-serif".parse().unwrap();
        assert_eq!(font, Font::default());
        assert_eq!(font.to_string(), "12px sans-serif");
        assert!("sans-serif".parse::<Font>().is_err());
        assert!("-3px serif".parse::<Font>().is_err());
    }
}
