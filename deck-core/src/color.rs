//! RGBA colors parsed from the CSS color strings stored in settings.

use serde::{Deserialize, Serialize};

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse any CSS color: hex forms, named colors, `rgb()`/`rgba()`,
    /// `hsl()` and the rest of CSS Color 4.
    #[must_use]
    pub fn parse(css: &str) -> Option<Self> {
        let parsed = csscolorparser::parse(css.trim()).ok()?;
        let [r, g, b, _] = parsed.to_rgba8();
        Some(Self {
            r,
            g,
            b,
            a: parsed.a.clamp(0.0, 1.0),
        })
    }

    /// Parse a CSS color, falling back to `fallback` when it is malformed.
    #[must_use]
    pub fn parse_or(css: &str, fallback: Self) -> Self {
        Self::parse(css).unwrap_or_else(|| {
            tracing::warn!("Malformed color {css:?}, using fallback");
            fallback
        })
    }

    /// Return this color with the given alpha, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Multiply the alpha by `opacity`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        self.with_alpha(self.a * opacity)
    }

    /// Whether this is pure black, ignoring alpha.
    #[must_use]
    pub fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// CSS `rgba(...)` form.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }

    /// Lowercase `#rrggbb` form (alpha dropped).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#d12d2d"), Some(Color::rgb(0xd1, 0x2d, 0x2d)));
        assert_eq!(Color::parse("#fff"), Some(Color::WHITE));
        assert_eq!(Color::parse("#12"), None);
        assert_eq!(Color::parse("#zzzzzz"), None);
    }

    #[test]
    fn test_parse_named_and_functional() {
        assert_eq!(Color::parse("red"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::parse(" White "), Some(Color::WHITE));
        assert_eq!(
            Color::parse("rgba(0, 128, 255, 0.5)"),
            Some(Color::rgb(0, 128, 255).with_alpha(0.5))
        );
        assert_eq!(Color::parse("hsl(120, 100%, 25%)"), Some(Color::rgb(0, 128, 0)));
    }

    #[test]
    fn test_css_output() {
        let c = Color::rgb(1, 2, 3).with_alpha(0.5);
        assert_eq!(c.to_css(), "rgba(1,2,3,0.5)");
        assert_eq!(c.to_hex(), "#010203");
    }

    #[test]
    fn test_fallback_on_malformed() {
        assert_eq!(Color::parse_or("nope", Color::WHITE), Color::WHITE);
        assert_eq!(Color::parse_or("navy", Color::WHITE), Color::rgb(0, 0, 128));
    }
}
