use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{AvatarError, Result};

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// The red channel, 0..=255.
    pub r: u8,
    /// The green channel, 0..=255.
    pub g: u8,
    /// The blue channel, 0..=255.
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Near-black used for dark text; pure black reads harsh on saturated backgrounds.
    pub const DARK: Rgb = Rgb::new(17, 17, 17);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parses `#rrggbb`. Surrounding whitespace is ignored, the short `#rgb` form is not accepted.
    pub fn from_hex(input: &str) -> Option<Rgb> {
        let digits = input.trim().strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats the color as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A color in hue/saturation/lightness form.
///
/// `h` is in degrees (0..=360), `s` and `l` are percentages (0..=100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Hsl { h, s, l }
    }

    /// Returns the same hue and saturation with a different lightness.
    pub fn with_lightness(self, l: f64) -> Self {
        Hsl { l, ..self }
    }

    /// Parses the CSS functional form `hsl(h, s%, l%)`.
    ///
    /// Returns `None` on malformed input or when a component is out of range.
    pub fn parse(input: &str) -> Option<Hsl> {
        let body = input
            .trim()
            .strip_prefix("hsl(")?
            .strip_suffix(')')?;
        let mut parts = body.split(',');
        let h = parse_component(parts.next()?, false)?;
        let s = parse_component(parts.next()?, true)?;
        let l = parse_component(parts.next()?, true)?;
        if parts.next().is_some() {
            return None;
        }
        if h >= 360.0 || s > 100.0 || l > 100.0 {
            return None;
        }
        Some(Hsl { h, s, l })
    }
}

/// Parses one `hsl()` component: an unsigned decimal, optionally followed directly by `%`.
fn parse_component(raw: &str, percent: bool) -> Option<f64> {
    let raw = raw.trim();
    let number = if percent { raw.strip_suffix('%')? } else { raw };
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    number.parse::<f64>().ok()
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            format_number(self.h),
            format_number(self.s),
            format_number(self.l)
        )
    }
}

/// Whole numbers print without a fractional part (`45`, not `45.0`).
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Either representation of a color, as accepted for SVG paint values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Rgb(Rgb),
    Hsl(Hsl),
}

impl Color {
    /// Parses `#rrggbb` or `hsl(h, s%, l%)`. `field` names the option in the error message.
    pub fn parse(input: &str, field: &'static str) -> Result<Color> {
        if input.trim().to_ascii_lowercase().starts_with("hsl(") {
            return Hsl::parse(input).map(Color::Hsl).ok_or_else(|| {
                AvatarError::invalid(
                    field,
                    format!(
                        "expected `hsl(h, s%, l%)` with h < 360 and s, l <= 100, got {input:?}"
                    ),
                )
            });
        }
        Rgb::from_hex(input).map(Color::Rgb).ok_or_else(|| {
            AvatarError::invalid(field, format!("unsupported color format {input:?}"))
        })
    }

    /// Parses a color that must be hex (`#rrggbb`).
    pub fn parse_hex(input: &str, field: &'static str) -> Result<Rgb> {
        Rgb::from_hex(input).ok_or_else(|| {
            AvatarError::invalid(field, format!("expected `#rrggbb`, got {input:?}"))
        })
    }

    /// Resolves the color to sRGB.
    pub fn to_rgb(self) -> Rgb {
        match self {
            Color::Rgb(rgb) => rgb,
            Color::Hsl(hsl) => crate::converters::svg::palette::hsl_to_rgb(hsl),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb)
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        Color::Hsl(hsl)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(rgb) => rgb.fmt(f),
            Color::Hsl(hsl) => hsl.fmt(f),
        }
    }
}
