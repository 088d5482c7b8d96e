//! Resolving colour identifiers to concrete colours.

use inkrelay_core::ColourValue;
use peniko::color::{parse_color, Srgb};
use peniko::Color;

/// A resolved colour as RGBA8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneColour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SceneColour {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, without alpha.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha in `0.0..=1.0`.
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl From<Color> for SceneColour {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<SceneColour> for Color {
    fn from(colour: SceneColour) -> Self {
        Color::from_rgba8(colour.r, colour.g, colour.b, colour.a)
    }
}

/// Resolve a colour identifier.
///
/// Accepts anything CSS colour parsing accepts (named colours, hex,
/// `rgb()`, ...). The eraser sentinel resolves to fully transparent. Returns
/// `None` for identifiers that do not name a colour.
pub fn resolve_colour(colour: &ColourValue) -> Option<SceneColour> {
    match colour {
        ColourValue::Transparent => Some(SceneColour::TRANSPARENT),
        ColourValue::Named(name) => parse_color(name.trim())
            .ok()
            .map(|parsed| SceneColour::from(parsed.to_alpha_color::<Srgb>())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_and_hex() {
        let red = resolve_colour(&ColourValue::new("red")).unwrap();
        assert_eq!(red, SceneColour::new(255, 0, 0, 255));

        let teal = resolve_colour(&ColourValue::new("#008080")).unwrap();
        assert_eq!(teal.hex(), "#008080");
    }

    #[test]
    fn test_transparent_sentinel() {
        let colour = resolve_colour(&ColourValue::Transparent).unwrap();
        assert!(colour.opacity().abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_identifier() {
        assert!(resolve_colour(&ColourValue::new("swatch-7")).is_none());
    }

    #[test]
    fn test_peniko_conversion() {
        let colour = SceneColour::new(10, 20, 30, 255);
        assert_eq!(SceneColour::from(Color::from(colour)), colour);
    }
}
