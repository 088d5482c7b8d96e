//! Stroke style values: colour identifiers, widths and stroke appearance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The colour identifier that switches drawing into eraser mode.
pub const TRANSPARENT: &str = "transparent";

/// Width used when a style selection carries no usable width.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// An opaque colour identifier, or the eraser sentinel.
///
/// Serialized as a plain string so that `"transparent"` round-trips to
/// [`ColourValue::Transparent`] and anything else stays opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColourValue {
    /// Erase instead of stroke.
    Transparent,
    /// Any colour identifier understood by the destination surface.
    Named(String),
}

impl ColourValue {
    /// Create a colour value from an identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        if identifier == TRANSPARENT {
            ColourValue::Transparent
        } else {
            ColourValue::Named(identifier)
        }
    }

    /// Whether this colour puts drawing into eraser mode.
    pub fn is_eraser(&self) -> bool {
        matches!(self, ColourValue::Transparent)
    }

    /// The identifier as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            ColourValue::Transparent => TRANSPARENT,
            ColourValue::Named(name) => name,
        }
    }
}

impl Default for ColourValue {
    fn default() -> Self {
        ColourValue::Named("black".to_string())
    }
}

impl From<String> for ColourValue {
    fn from(identifier: String) -> Self {
        ColourValue::new(identifier)
    }
}

impl From<&str> for ColourValue {
    fn from(identifier: &str) -> Self {
        ColourValue::new(identifier)
    }
}

impl From<ColourValue> for String {
    fn from(colour: ColourValue) -> Self {
        match colour {
            ColourValue::Transparent => TRANSPARENT.to_string(),
            ColourValue::Named(name) => name,
        }
    }
}

impl fmt::Display for ColourValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A palette pick: the colour (if any) and the width to draw with.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSelection {
    /// `None` keeps the previously active colour.
    pub colour: Option<ColourValue>,
    /// Always finite and positive.
    pub width: f64,
}

impl StyleSelection {
    /// Create a selection with an explicit colour and width.
    pub fn new(colour: impl Into<ColourValue>, width: f64) -> Self {
        Self {
            colour: Some(colour.into()),
            width: sanitize_width(width),
        }
    }

    /// Build a selection from raw, possibly missing attributes.
    ///
    /// Empty colour strings count as absent. The width is parsed as a leading
    /// integer (so `"4px"` is 4); anything unparseable, zero or negative
    /// falls back to [`DEFAULT_LINE_WIDTH`].
    pub fn parse(colour: Option<&str>, width: Option<&str>) -> Self {
        let colour = colour
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ColourValue::new);
        let width = width
            .and_then(parse_leading_int)
            .map(|w| w as f64)
            .unwrap_or(DEFAULT_LINE_WIDTH);
        Self {
            colour,
            width: sanitize_width(width),
        }
    }
}

fn sanitize_width(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        DEFAULT_LINE_WIDTH
    }
}

/// Parse an optional sign followed by digits, ignoring any trailing text.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

/// Line cap used when stroking paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// How strokes look beyond colour and width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeAppearance {
    pub line_cap: LineCap,
    /// Blur radius in surface units applied to stroked lines.
    pub blur: f64,
}

impl Default for StrokeAppearance {
    fn default() -> Self {
        Self {
            line_cap: LineCap::Round,
            blur: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_is_eraser() {
        assert!(ColourValue::new("transparent").is_eraser());
        assert!(!ColourValue::new("red").is_eraser());
        assert_eq!(ColourValue::from("transparent"), ColourValue::Transparent);
    }

    #[test]
    fn test_colour_serializes_as_plain_string() {
        let json = serde_json::to_string(&ColourValue::Transparent).unwrap();
        assert_eq!(json, "\"transparent\"");

        let colour: ColourValue = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(colour, ColourValue::Named("#ff0000".to_string()));
    }

    #[test]
    fn test_selection_width_fallbacks() {
        assert_eq!(StyleSelection::parse(Some("red"), None).width, 1.0);
        assert_eq!(StyleSelection::parse(Some("red"), Some("thick")).width, 1.0);
        assert_eq!(StyleSelection::parse(Some("red"), Some("0")).width, 1.0);
        assert_eq!(StyleSelection::parse(Some("red"), Some("-3")).width, 1.0);
        assert_eq!(StyleSelection::parse(Some("red"), Some("4px")).width, 4.0);
        assert_eq!(StyleSelection::parse(Some("red"), Some("12")).width, 12.0);
        assert_eq!(StyleSelection::new("red", f64::NAN).width, 1.0);
    }

    #[test]
    fn test_selection_absent_colour() {
        assert_eq!(StyleSelection::parse(None, Some("3")).colour, None);
        assert_eq!(StyleSelection::parse(Some("  "), Some("3")).colour, None);
        assert_eq!(
            StyleSelection::parse(Some("blue"), None).colour,
            Some(ColourValue::Named("blue".to_string()))
        );
    }

    #[test]
    fn test_default_appearance() {
        let appearance = StrokeAppearance::default();
        assert_eq!(appearance.line_cap, LineCap::Round);
        assert!((appearance.blur - 1.0).abs() < f64::EPSILON);
    }
}
