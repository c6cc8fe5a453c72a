//! Font descriptions and the injected text-measurement seam.
//!
//! Layout never talks to a font rasterizer directly. Everything that needs a
//! width goes through [`TextMeasurer`], so wrapping and shrink-to-fit can be
//! exercised with the deterministic [`FixedAdvance`] measurer.

use serde::{Deserialize, Serialize};

/// Font family, weight and pixel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Family name, e.g. `"Roboto"`.
    pub family: String,
    /// CSS weight, e.g. `"400"` or `"700"`.
    pub weight: String,
    /// Size in pixels.
    pub size: f32,
}

impl FontSpec {
    /// Create a font spec.
    #[must_use]
    pub fn new(family: impl Into<String>, weight: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            weight: weight.into(),
            size,
        }
    }

    /// Same family and weight at a different size.
    #[must_use]
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// CSS shorthand, e.g. `700 72px "Roboto"`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("{} {}px \"{}\"", self.weight, self.size, self.family)
    }

    /// Numeric weight, defaulting to 400 for keywords other than `bold`.
    #[must_use]
    pub fn numeric_weight(&self) -> u16 {
        match self.weight.trim() {
            "bold" => 700,
            w => w.parse().unwrap_or(400),
        }
    }
}

/// Measures the advance width of a run of text.
pub trait TextMeasurer {
    /// Width in pixels of `text` set in `font`.
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &FontSpec) -> f32,
{
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        self(text, font)
    }
}

/// Every character advances by `em_ratio * font.size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    /// Advance per character as a fraction of the font size.
    pub em_ratio: f32,
}

impl FixedAdvance {
    /// Create a measurer with the given per-character ratio.
    #[must_use]
    pub const fn new(em_ratio: f32) -> Self {
        Self { em_ratio }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMeasurer for FixedAdvance {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * self.em_ratio
    }
}
