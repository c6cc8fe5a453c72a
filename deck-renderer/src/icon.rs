//! Suit icon sheet and tinting.
//!
//! The sheet is a 2×2 grid of suit glyphs addressed by [`Suit::grid`].
//! Tinting works on one quadrant at a time in a scratch buffer owned by the
//! tinter, so one tinter must not be shared between concurrent renders.

use std::collections::HashMap;

use deck_core::{IconTint, Suit};

use crate::error::{RenderError, RenderResult};
use crate::image::{decode_image, encode_png, to_data_uri, ImageFormat, RasterImage};

/// A decoded 2×2 suit icon sheet.
#[derive(Debug, Clone)]
pub struct IconSheet {
    raster: RasterImage,
}

impl IconSheet {
    /// Wrap decoded pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet is smaller than 2×2 pixels or the
    /// buffer does not match its dimensions.
    pub fn from_raster(raster: RasterImage) -> RenderResult<Self> {
        if raster.width < 2 || raster.height < 2 {
            return Err(RenderError::Resource(format!(
                "Icon sheet too small: {}x{}",
                raster.width, raster.height
            )));
        }
        let expected = raster.width as usize * raster.height as usize * 4;
        if raster.data.len() != expected {
            return Err(RenderError::Resource(
                "Icon sheet buffer does not match its size".to_string(),
            ));
        }
        Ok(Self { raster })
    }

    /// Decode an icon sheet from PNG or JPEG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or the sheet is too small.
    pub fn from_bytes(bytes: &[u8]) -> RenderResult<Self> {
        Self::from_raster(decode_image(bytes)?)
    }

    /// Size of one quadrant in pixels.
    #[must_use]
    pub fn cell_size(&self) -> (u32, u32) {
        (self.raster.width / 2, self.raster.height / 2)
    }

    /// Copy the quadrant for `suit` into `out`, replacing its contents.
    fn copy_cell(&self, suit: Suit, out: &mut Vec<u8>) {
        let (cw, ch) = self.cell_size();
        let (gx, gy) = suit.grid();
        let stride = self.raster.width as usize * 4;
        let row_bytes = cw as usize * 4;
        let x0 = (gx * cw) as usize * 4;

        out.clear();
        out.reserve(row_bytes * ch as usize);
        for row in 0..ch as usize {
            let start = (gy * ch) as usize * stride + row * stride + x0;
            out.extend_from_slice(&self.raster.data[start..start + row_bytes]);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TintKey {
    suit: Suit,
    rgb: [u8; 3],
    opacity: u32,
}

impl TintKey {
    fn new(suit: Suit, tint: &IconTint) -> Self {
        Self {
            suit,
            rgb: [tint.color.r, tint.color.g, tint.color.b],
            opacity: tint.opacity.clamp(0.0, 1.0).to_bits(),
        }
    }
}

/// Recolors icon quadrants, reusing one scratch buffer.
///
/// Encoded results are cached per suit and tint, since a card draws the same
/// icon many times.
#[derive(Debug, Default)]
pub struct IconTinter {
    scratch: Vec<u8>,
    cache: HashMap<TintKey, String>,
}

impl IconTinter {
    /// Create a tinter with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tinted RGBA pixels of one quadrant.
    ///
    /// Black leaves the colors as drawn and only applies opacity; any other
    /// color replaces the color of every non-transparent pixel and multiplies
    /// its alpha by the opacity.
    pub fn tint(&mut self, sheet: &IconSheet, suit: Suit, tint: &IconTint) -> &[u8] {
        sheet.copy_cell(suit, &mut self.scratch);
        let opacity = tint.opacity.clamp(0.0, 1.0);
        let recolor = !tint.color.is_black();
        let [r, g, b] = [tint.color.r, tint.color.g, tint.color.b];

        for px in self.scratch.chunks_exact_mut(4) {
            if px[3] == 0 {
                continue;
            }
            if recolor {
                px[0] = r;
                px[1] = g;
                px[2] = b;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let alpha = (f32::from(px[3]) * opacity).round() as u8;
            px[3] = alpha;
        }
        &self.scratch
    }

    /// Tinted quadrant as a PNG data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn data_uri(
        &mut self,
        sheet: &IconSheet,
        suit: Suit,
        tint: &IconTint,
    ) -> RenderResult<String> {
        let key = TintKey::new(suit, tint);
        if let Some(uri) = self.cache.get(&key) {
            return Ok(uri.clone());
        }
        let (w, h) = sheet.cell_size();
        let png = encode_png(w, h, self.tint(sheet, suit, tint))?;
        let uri = to_data_uri(&png, ImageFormat::Png);
        tracing::trace!("Tinted {suit} icon ({} bytes)", png.len());
        self.cache.insert(key, uri.clone());
        Ok(uri)
    }

    /// Drop cached icons, e.g. after switching sheets.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::Color;

    /// 4×4 sheet: each 2×2 quadrant filled with one gray level, with the
    /// top-left pixel of each quadrant transparent.
    fn sheet() -> IconSheet {
        let mut data = Vec::new();
        for y in 0..4u32 {
            for x in 0..4u32 {
                let level = [10u8, 20, 30, 40][((y / 2) * 2 + x / 2) as usize];
                let alpha = if x % 2 == 0 && y % 2 == 0 { 0 } else { 200 };
                data.extend_from_slice(&[level, level, level, alpha]);
            }
        }
        IconSheet::from_raster(RasterImage {
            width: 4,
            height: 4,
            data,
        })
        .expect("sheet")
    }

    #[test]
    fn test_quadrants_follow_suit_grid() {
        let sheet = sheet();
        let mut tinter = IconTinter::new();
        let plain = IconTint::default();
        assert_eq!(tinter.tint(&sheet, Suit::Spades, &plain)[4], 10);
        assert_eq!(tinter.tint(&sheet, Suit::Hearts, &plain)[4], 20);
        assert_eq!(tinter.tint(&sheet, Suit::Clubs, &plain)[4], 30);
        assert_eq!(tinter.tint(&sheet, Suit::Diamonds, &plain)[4], 40);
    }

    #[test]
    fn test_black_keeps_colors_and_applies_opacity() {
        let sheet = sheet();
        let mut tinter = IconTinter::new();
        let px = tinter.tint(
            &sheet,
            Suit::Hearts,
            &IconTint {
                color: Color::BLACK,
                opacity: 0.5,
            },
        );
        assert_eq!(&px[4..8], &[20, 20, 20, 100]);
    }

    #[test]
    fn test_color_replaces_visible_pixels_only() {
        let sheet = sheet();
        let mut tinter = IconTinter::new();
        let px = tinter.tint(
            &sheet,
            Suit::Diamonds,
            &IconTint {
                color: Color::rgb(200, 0, 0),
                opacity: 1.0,
            },
        );
        assert_eq!(&px[0..4], &[40, 40, 40, 0]);
        assert_eq!(&px[4..8], &[200, 0, 0, 200]);
    }

    #[test]
    fn test_data_uri_is_cached() {
        let sheet = sheet();
        let mut tinter = IconTinter::new();
        let tint = IconTint::default();
        let a = tinter.data_uri(&sheet, Suit::Clubs, &tint).expect("uri");
        let b = tinter.data_uri(&sheet, Suit::Clubs, &tint).expect("uri");
        assert_eq!(a, b);
        assert!(a.starts_with("data:image/png;base64,"));
        assert_eq!(tinter.cache.len(), 1);
    }

    #[test]
    fn test_tiny_sheet_is_rejected() {
        let raster = RasterImage {
            width: 1,
            height: 1,
            data: vec![0; 4],
        };
        assert!(IconSheet::from_raster(raster).is_err());
    }
}
