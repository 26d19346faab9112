//! Conversion of web-style property values into typed style values.
//!
//! Every converter is total: malformed or missing input maps to a documented
//! default instead of an error.

use crate::ast::PropValue;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from hex digits (`RGB`, `RRGGBB` or `RRGGBBAA`), with or without `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => {
                let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// Packed `0xAARRGGBB` value.
    pub fn argb(&self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

/// Result of converting a color property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorValue {
    /// Empty, `transparent` or `none`.
    Transparent,
    /// A parsed hex color.
    Solid(Color),
    /// Anything else; rendered as opaque black.
    Fallback,
}

/// Convert a CSS color token.
pub fn color_of(value: Option<&str>) -> ColorValue {
    let value = value.map(str::trim).unwrap_or_default();
    match value {
        "" | "transparent" | "none" => ColorValue::Transparent,
        hex if hex.starts_with('#') => Color::from_hex(hex)
            .map(ColorValue::Solid)
            .unwrap_or(ColorValue::Fallback),
        _ => ColorValue::Fallback,
    }
}

/// Color of a `<width> <style> <color>` border shorthand: its last token.
pub fn border_color_of(border: Option<&str>) -> ColorValue {
    color_of(border.and_then(|b| b.split_whitespace().last()))
}

/// Parse the leading, optionally signed, integer of a string.
///
/// Trailing units and fractional parts are ignored: `"12px"` and `"12.9em"`
/// both give 12.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Convert a length property. Numbers pass through; strings are unit-stripped.
pub fn length_of(value: Option<&PropValue>, fallback: f64) -> f64 {
    match value {
        Some(PropValue::Number(n)) if n.is_finite() => *n,
        Some(PropValue::Text(s)) => parse_leading_int(s).map_or(fallback, |n| n as f64),
        _ => fallback,
    }
}

/// Box-model insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeInsets {
    Uniform(i64),
    Symmetric { vertical: i64, horizontal: i64 },
    Ltrb { left: i64, top: i64, right: i64, bottom: i64 },
}

impl EdgeInsets {
    pub const ZERO: Self = Self::Uniform(0);

    /// Resolved `(left, top, right, bottom)`.
    pub fn sides(&self) -> (i64, i64, i64, i64) {
        match *self {
            Self::Uniform(v) => (v, v, v, v),
            Self::Symmetric { vertical, horizontal } => (horizontal, vertical, horizontal, vertical),
            Self::Ltrb { left, top, right, bottom } => (left, top, right, bottom),
        }
    }
}

/// Convert a CSS `padding`/`margin` shorthand.
///
/// One token is uniform, two are vertical/horizontal, four are
/// top/right/bottom/left. Any other count gives zero insets.
pub fn insets_of(value: Option<&PropValue>) -> EdgeInsets {
    let text = match value {
        Some(PropValue::Number(n)) if n.is_finite() => return EdgeInsets::Uniform(*n as i64),
        Some(PropValue::Text(s)) => s,
        _ => return EdgeInsets::ZERO,
    };
    let parts: Vec<i64> = text
        .split_whitespace()
        .map(|token| parse_leading_int(token).unwrap_or(0))
        .collect();
    match parts[..] {
        [all] => EdgeInsets::Uniform(all),
        [vertical, horizontal] => EdgeInsets::Symmetric { vertical, horizontal },
        [top, right, bottom, left] => EdgeInsets::Ltrb { left, top, right, bottom },
        _ => EdgeInsets::ZERO,
    }
}

/// A width or height constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Unconstrained,
    Fill,
    Fixed(f64),
}

/// Convert a `width`/`height` property.
pub fn size_of(value: Option<&PropValue>) -> Dimension {
    match value {
        Some(PropValue::Number(n)) if n.is_finite() => Dimension::Fixed(*n),
        Some(PropValue::Text(s)) => match s.trim() {
            "" | "auto" => Dimension::Unconstrained,
            "100%" => Dimension::Fill,
            other => parse_leading_int(other)
                .map_or(Dimension::Unconstrained, |n| Dimension::Fixed(n as f64)),
        },
        _ => Dimension::Unconstrained,
    }
}

/// Main-axis alignment of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainAxis {
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Convert `justifyContent`.
pub fn main_axis_of(justify: Option<&str>) -> MainAxis {
    match justify.map(str::trim) {
        Some("center") => MainAxis::Center,
        Some("flex-end") | Some("end") => MainAxis::End,
        Some("space-between") => MainAxis::SpaceBetween,
        Some("space-around") => MainAxis::SpaceAround,
        Some("space-evenly") => MainAxis::SpaceEvenly,
        _ => MainAxis::Start,
    }
}

/// Cross-axis alignment of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossAxis {
    Start,
    Center,
    End,
    Stretch,
}

/// Convert `alignItems`.
pub fn cross_axis_of(align: Option<&str>) -> CrossAxis {
    match align.map(str::trim) {
        Some("center") => CrossAxis::Center,
        Some("flex-end") | Some("end") => CrossAxis::End,
        Some("stretch") => CrossAxis::Stretch,
        _ => CrossAxis::Start,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justify,
}

/// Convert `textAlign`.
pub fn text_align_of(align: Option<&str>) -> TextAlignment {
    match align.map(str::trim) {
        Some("center") => TextAlignment::Center,
        Some("right") => TextAlignment::Right,
        Some("justify") => TextAlignment::Justify,
        _ => TextAlignment::Left,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Convert `fontWeight`. Only the `bold` keyword is bold.
pub fn font_weight_of(weight: Option<&str>) -> FontWeight {
    match weight.map(str::trim) {
        Some("bold") => FontWeight::Bold,
        _ => FontWeight::Normal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextDecoration {
    None,
    Underline,
    LineThrough,
}

/// Convert `textDecoration`.
pub fn text_decoration_of(decoration: Option<&str>) -> TextDecoration {
    match decoration.map(str::trim) {
        Some("underline") => TextDecoration::Underline,
        Some("line-through") => TextDecoration::LineThrough,
        _ => TextDecoration::None,
    }
}

/// Convert `letterSpacing`; `normal` or absent is zero.
pub fn letter_spacing_of(value: Option<&PropValue>) -> f64 {
    match value {
        Some(PropValue::Text(s)) if s.trim() == "normal" => 0.0,
        other => length_of(other, 0.0),
    }
}
