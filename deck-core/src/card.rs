//! Per-card data records owned by the caller.

use serde::{Deserialize, Serialize};

/// Handle to externally stored face artwork.
///
/// The engine only needs the natural size to place the image; pixels are
/// resolved by id at export time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Asset id (path, URL or content key) understood by the renderer.
    pub id: String,
    /// Natural width in pixels.
    pub width: f32,
    /// Natural height in pixels.
    pub height: f32,
}

impl ImageRef {
    /// Create an image handle.
    #[must_use]
    pub fn new(id: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    /// Whether the image has a usable, non-degenerate size.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Mutable per-card fields read by the compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardRecord {
    /// Face artwork, if any.
    pub face_image: Option<ImageRef>,
    /// Horizontal artwork offset from the card centre.
    pub offset_x: f32,
    /// Vertical artwork offset from the card centre.
    pub offset_y: f32,
    /// Artwork scale on top of the fit-to-safe-area scale.
    pub scale: f32,
    /// Artwork rotation in degrees.
    pub rotation: f32,
    /// Mirror artwork horizontally.
    pub flip_h: bool,
    /// Mirror artwork vertically.
    pub flip_v: bool,
    /// Per-card corner mirroring; `None` defers to the deck default.
    pub mirror_corners: Option<bool>,
    /// Markdown for the ability text panel.
    pub ability_markdown: String,
}

impl Default for CardRecord {
    fn default() -> Self {
        Self {
            face_image: None,
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            flip_h: false,
            flip_v: false,
            mirror_corners: None,
            ability_markdown: String::new(),
        }
    }
}

impl CardRecord {
    /// Reset artwork placement, keeping the image and text.
    pub fn reset_face_transform(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.scale = 1.0;
        self.rotation = 0.0;
        self.flip_h = false;
        self.flip_v = false;
    }

    /// Resolve corner mirroring against the deck default.
    #[must_use]
    pub fn mirror_corners_or(&self, default: bool) -> bool {
        self.mirror_corners.unwrap_or(default)
    }
}

/// Scale that makes an image fill the safe height, relative to the
/// fit-inside-safe-area base scale the compositor already applies.
///
/// Returns `1.0` for degenerate inputs.
#[must_use]
pub fn scale_to_safe_height(image: &ImageRef, safe_width: f32, safe_height: f32) -> f32 {
    if !image.is_drawable() || safe_width <= 0.0 || safe_height <= 0.0 {
        return 1.0;
    }
    let base = (safe_width / image.width).min(safe_height / image.height);
    if !base.is_finite() || base <= 0.0 {
        return 1.0;
    }
    let normalized = (safe_height / image.height) / base;
    if normalized.is_finite() && normalized > 0.0 {
        normalized
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_falls_back_to_default() {
        let mut card = CardRecord::default();
        assert!(card.mirror_corners_or(true));
        card.mirror_corners = Some(false);
        assert!(!card.mirror_corners_or(true));
    }

    #[test]
    fn test_scale_to_safe_height_for_wide_image() {
        // Wide image is width-limited at base scale; filling the height needs more.
        let image = ImageRef::new("wide", 2000.0, 500.0);
        let s = scale_to_safe_height(&image, 665.0, 965.0);
        let base = (665.0_f32 / 2000.0).min(965.0 / 500.0);
        assert!((s - (965.0 / 500.0) / base).abs() < 1e-4);
    }

    #[test]
    fn test_scale_to_safe_height_degenerate() {
        let image = ImageRef::new("empty", 0.0, 0.0);
        assert!((scale_to_safe_height(&image, 665.0, 965.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let json = r#"{"offsetX": 12, "mirrorCorners": null, "abilityMarkdown": "Hi"}"#;
        let card: CardRecord = serde_json::from_str(json).expect("parse");
        assert!((card.offset_x - 12.0).abs() < f32::EPSILON);
        assert!((card.scale - 1.0).abs() < f32::EPSILON);
        assert_eq!(card.mirror_corners, None);
        assert_eq!(card.ability_markdown, "Hi");
    }
}
