//! Dart literal rendering.

use convert_case::{Case, Casing};
use fluttergen_core::{
    number_text, ColorValue, CrossAxis, Dimension, EdgeInsets, FontWeight, MainAxis,
    TextAlignment, TextDecoration,
};

/// Package name used when a project name has no usable characters.
pub const DEFAULT_PACKAGE_NAME: &str = "flutter_project";

/// Render a style value as a Dart expression.
pub trait ToDart {
    fn to_dart(&self) -> String;
}

impl ToDart for ColorValue {
    fn to_dart(&self) -> String {
        match self {
            ColorValue::Transparent => "Colors.transparent".to_string(),
            ColorValue::Solid(color) => format!("Color(0x{:08X})", color.argb()),
            ColorValue::Fallback => "Colors.black".to_string(),
        }
    }
}

impl ToDart for EdgeInsets {
    fn to_dart(&self) -> String {
        match *self {
            EdgeInsets::Uniform(all) => format!("EdgeInsets.all({})", all),
            EdgeInsets::Symmetric { vertical, horizontal } => format!(
                "EdgeInsets.symmetric(vertical: {}, horizontal: {})",
                vertical, horizontal
            ),
            EdgeInsets::Ltrb { left, top, right, bottom } => {
                format!("EdgeInsets.fromLTRB({}, {}, {}, {})", left, top, right, bottom)
            }
        }
    }
}

impl ToDart for Dimension {
    fn to_dart(&self) -> String {
        match *self {
            Dimension::Unconstrained => "null".to_string(),
            Dimension::Fill => "double.infinity".to_string(),
            Dimension::Fixed(n) => dart_number(n),
        }
    }
}

impl ToDart for MainAxis {
    fn to_dart(&self) -> String {
        let name = match self {
            MainAxis::Start => "start",
            MainAxis::Center => "center",
            MainAxis::End => "end",
            MainAxis::SpaceBetween => "spaceBetween",
            MainAxis::SpaceAround => "spaceAround",
            MainAxis::SpaceEvenly => "spaceEvenly",
        };
        format!("MainAxisAlignment.{}", name)
    }
}

impl ToDart for CrossAxis {
    fn to_dart(&self) -> String {
        let name = match self {
            CrossAxis::Start => "start",
            CrossAxis::Center => "center",
            CrossAxis::End => "end",
            CrossAxis::Stretch => "stretch",
        };
        format!("CrossAxisAlignment.{}", name)
    }
}

impl ToDart for TextAlignment {
    fn to_dart(&self) -> String {
        let name = match self {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
            TextAlignment::Right => "right",
            TextAlignment::Justify => "justify",
        };
        format!("TextAlign.{}", name)
    }
}

impl ToDart for FontWeight {
    fn to_dart(&self) -> String {
        match self {
            FontWeight::Normal => "FontWeight.normal".to_string(),
            FontWeight::Bold => "FontWeight.bold".to_string(),
        }
    }
}

impl ToDart for TextDecoration {
    fn to_dart(&self) -> String {
        match self {
            TextDecoration::None => "TextDecoration.none".to_string(),
            TextDecoration::Underline => "TextDecoration.underline".to_string(),
            TextDecoration::LineThrough => "TextDecoration.lineThrough".to_string(),
        }
    }
}

/// A single-quoted Dart string literal.
pub fn dart_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// A Dart numeric literal; integral values have no fractional part.
pub fn dart_number(value: f64) -> String {
    number_text(value)
}

/// A Dart double literal; always carries a fractional part.
pub fn dart_double(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// A valid pub package name derived from a free-text project name.
pub fn package_name(name: &str) -> String {
    let snake: String = name
        .to_case(Case::Snake)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();
    let snake = snake.trim_matches('_');
    if snake.is_empty() {
        DEFAULT_PACKAGE_NAME.to_string()
    } else if snake.starts_with(|c: char| c.is_ascii_digit()) {
        format!("app_{}", snake)
    } else {
        snake.to_string()
    }
}
