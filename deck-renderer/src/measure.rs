//! Text measurement for export.
//!
//! [`FontMeasurer`] shapes text with the same font database the exporter
//! rasterizes with, so layout widths match the printed glyphs. When no face
//! matches a font, it falls back to [`HeuristicMeasurer`], which estimates
//! widths from per-character-class advance ratios.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use deck_core::{FontSpec, TextMeasurer};
use rustybuzz::UnicodeBuffer;
use usvg::fontdb::{Database, Family, Query, Stretch, Style, Weight};

/// Estimated advance widths by character class, in ems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicMeasurer {
    /// Spaces and narrow glyphs such as `i`, `l`, `.`.
    pub narrow: f32,
    /// Lowercase letters.
    pub lower: f32,
    /// Uppercase letters and digits.
    pub upper: f32,
    /// `m`, `w`, `M`, `W` and similar.
    pub wide: f32,
    /// Anything else, including suit symbols.
    pub other: f32,
    /// Width multiplier for weights of 600 and above.
    pub bold_factor: f32,
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self {
            narrow: 0.28,
            lower: 0.52,
            upper: 0.66,
            wide: 0.86,
            other: 0.62,
            bold_factor: 1.06,
        }
    }
}

impl HeuristicMeasurer {
    fn advance(&self, ch: char) -> f32 {
        match ch {
            ' ' | 'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' | '(' | ')' => {
                self.narrow
            }
            'm' | 'w' | 'M' | 'W' | '@' => self.wide,
            c if c.is_ascii_lowercase() => self.lower,
            c if c.is_ascii_uppercase() || c.is_ascii_digit() => self.upper,
            _ => self.other,
        }
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        let ems: f32 = text.chars().map(|c| self.advance(c)).sum();
        let weight = if font.numeric_weight() >= 600 {
            self.bold_factor
        } else {
            1.0
        };
        ems * font.size * weight
    }
}

struct FaceData {
    bytes: Vec<u8>,
    index: u32,
}

/// Measures text by shaping it with faces from a font database.
///
/// Faces resolve like the exporter's `font-family="'<family>', sans-serif"`:
/// the named family first, then the database's sans-serif family. Face data
/// is loaded once per family and weight.
pub struct FontMeasurer {
    db: Arc<Database>,
    fallback: HeuristicMeasurer,
    faces: RefCell<HashMap<(String, u16), Option<Rc<FaceData>>>>,
    scratch: RefCell<Option<UnicodeBuffer>>,
}

impl FontMeasurer {
    /// Create a measurer over `db`.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            fallback: HeuristicMeasurer::default(),
            faces: RefCell::new(HashMap::new()),
            scratch: RefCell::new(None),
        }
    }

    /// Use `fallback` for fonts with no matching face.
    #[must_use]
    pub fn with_fallback(mut self, fallback: HeuristicMeasurer) -> Self {
        self.fallback = fallback;
        self
    }

    /// Whether `font` resolves to a face in the database.
    #[must_use]
    pub fn resolves(&self, font: &FontSpec) -> bool {
        self.face(font).is_some()
    }

    fn face(&self, font: &FontSpec) -> Option<Rc<FaceData>> {
        let key = (font.family.clone(), font.numeric_weight());
        if let Some(cached) = self.faces.borrow().get(&key) {
            return cached.clone();
        }
        let loaded = self.load_face(&key.0, key.1);
        self.faces.borrow_mut().insert(key, loaded.clone());
        loaded
    }

    fn load_face(&self, family: &str, weight: u16) -> Option<Rc<FaceData>> {
        let query = Query {
            families: &[Family::Name(family), Family::SansSerif],
            weight: Weight(weight),
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let Some(id) = self.db.query(&query) else {
            tracing::debug!("No face for {family} {weight}; estimating widths");
            return None;
        };
        let data = self.db.with_face_data(id, |bytes, index| FaceData {
            bytes: bytes.to_vec(),
            index,
        });
        if data.is_none() {
            tracing::warn!("Face data for {family} {weight} unreadable; estimating widths");
        }
        data.map(Rc::new)
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
    fn shaped_width(&self, data: &FaceData, text: &str, size: f32) -> Option<f32> {
        let face = rustybuzz::Face::from_slice(&data.bytes, data.index)?;
        let mut buffer = self
            .scratch
            .borrow_mut()
            .take()
            .unwrap_or_else(UnicodeBuffer::new);
        buffer.push_str(text);
        buffer.guess_segment_properties();

        let glyphs = rustybuzz::shape(&face, &[], buffer);
        let units: i32 = glyphs.glyph_positions().iter().map(|p| p.x_advance).sum();
        *self.scratch.borrow_mut() = Some(glyphs.clear());

        let upem = face.units_per_em() as f32;
        (upem > 0.0).then(|| units as f32 * size / upem)
    }
}

impl TextMeasurer for FontMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.face(font)
            .and_then(|face| self.shaped_width(&face, text, font.size))
            .unwrap_or_else(|| self.fallback.measure(text, font))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_scale_with_size_and_weight() {
        let m = HeuristicMeasurer::default();
        let regular = FontSpec::new("Roboto", "400", 10.0);
        let bold = FontSpec::new("Roboto", "700", 10.0);
        let big = FontSpec::new("Roboto", "400", 20.0);

        let w = m.measure("Ace", &regular);
        assert!(w > 0.0);
        assert!((m.measure("Ace", &big) - 2.0 * w).abs() < 1e-4);
        assert!(m.measure("Ace", &bold) > w);
        assert!(m.measure("", &regular).abs() < f32::EPSILON);
    }

    #[test]
    fn test_character_classes() {
        let m = HeuristicMeasurer::default();
        let font = FontSpec::new("Roboto", "400", 10.0);
        assert!(m.measure("ii", &font) < m.measure("aa", &font));
        assert!(m.measure("aa", &font) < m.measure("AA", &font));
        assert!(m.measure("AA", &font) < m.measure("WW", &font));
        assert!((m.measure("10", &font) - m.measure("AK", &font)).abs() < 1e-4);
    }

    #[test]
    fn test_font_measurer_falls_back_without_faces() {
        let measurer = FontMeasurer::new(Arc::new(Database::new()));
        let font = FontSpec::new("Roboto", "700", 24.0);
        assert!(!measurer.resolves(&font));
        let expected = HeuristicMeasurer::default().measure("Draw a card.", &font);
        assert!((measurer.measure("Draw a card.", &font) - expected).abs() < 1e-4);
        assert!(measurer.measure("", &font).abs() < f32::EPSILON);
    }
}
