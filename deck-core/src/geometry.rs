//! Card geometry: metrics, points, rectangles and 2D affine transforms.

use serde::{Deserialize, Serialize};

/// Default card width in pixels (2.75in at 300 DPI, bleed included).
pub const DEFAULT_CARD_WIDTH: f32 = 825.0;
/// Default card height in pixels.
pub const DEFAULT_CARD_HEIGHT: f32 = 1125.0;
/// Default bleed margin in pixels.
pub const DEFAULT_BLEED: f32 = 80.0;

/// A point in card pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether a point lies inside (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Resolved card dimensions.
///
/// The safe area is the printable interior inside the bleed on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardMetrics {
    /// Full card width including bleed.
    pub card_width: f32,
    /// Full card height including bleed.
    pub card_height: f32,
    /// Bleed margin on each edge.
    pub bleed: f32,
    /// `card_width - 2 * bleed`.
    pub safe_width: f32,
    /// `card_height - 2 * bleed`.
    pub safe_height: f32,
}

impl CardMetrics {
    /// Build metrics, replacing non-positive or non-finite inputs with the defaults.
    #[must_use]
    pub fn new(card_width: f32, card_height: f32, bleed: f32) -> Self {
        let card_width = positive_or(card_width, DEFAULT_CARD_WIDTH);
        let card_height = positive_or(card_height, DEFAULT_CARD_HEIGHT);
        let bleed = positive_or(bleed, DEFAULT_BLEED);
        Self {
            card_width,
            card_height,
            bleed,
            safe_width: card_width - bleed * 2.0,
            safe_height: card_height - bleed * 2.0,
        }
    }

    /// Map fractional safe-area coordinates to card pixels.
    #[must_use]
    pub fn safe_point(&self, fx: f32, fy: f32) -> Point {
        Point::new(
            self.bleed + fx * self.safe_width,
            self.bleed + fy * self.safe_height,
        )
    }

    /// The safe area as a rectangle.
    #[must_use]
    pub fn safe_rect(&self) -> Rect {
        Rect::new(self.bleed, self.bleed, self.safe_width, self.safe_height)
    }

    /// The full card as a rectangle.
    #[must_use]
    pub fn card_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.card_width, self.card_height)
    }

    /// Card centre.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.card_width / 2.0, self.card_height / 2.0)
    }

    /// Transform that maps the top-left corner onto the point-reflected
    /// bottom-right corner: `translate(W, H) * rotate(180°)`.
    #[must_use]
    pub fn point_reflection(&self) -> Affine {
        Affine::translate(self.card_width, self.card_height)
            .concat(&Affine::rotate(std::f32::consts::PI))
    }
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_CARD_WIDTH, DEFAULT_CARD_HEIGHT, DEFAULT_BLEED)
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// A 2D affine transform in canvas/SVG `matrix(a b c d e f)` order.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    /// Horizontal scale / cosine component.
    pub a: f32,
    /// Vertical skew / sine component.
    pub b: f32,
    /// Horizontal skew / negative sine component.
    pub c: f32,
    /// Vertical scale / cosine component.
    pub d: f32,
    /// Horizontal translation.
    pub e: f32,
    /// Vertical translation.
    pub f: f32,
}

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Translation.
    #[must_use]
    pub const fn translate(dx: f32, dy: f32) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::IDENTITY
        }
    }

    /// Non-uniform scale.
    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Clockwise rotation (y axis pointing down).
    ///
    /// Components within `1e-6` of zero are snapped so quarter and half turns
    /// stay exact.
    #[must_use]
    pub fn rotate(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        let snap = |v: f32| if v.abs() < 1e-6 { 0.0 } else { v };
        Self {
            a: snap(cos),
            b: snap(sin),
            c: snap(-sin),
            d: snap(cos),
            e: 0.0,
            f: 0.0,
        }
    }

    /// Matrix product `self * other`: `other` is applied first.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Apply to a point.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Rotation angle of the linear part, in radians in `(-PI, PI]`.
    #[must_use]
    pub fn rotation(&self) -> f32 {
        self.b.atan2(self.a)
    }

    /// Uniform scale factor of the linear part (geometric mean of axes).
    #[must_use]
    pub fn scale_factor(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }

    /// Whether this is the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_safe_area() {
        let m = CardMetrics::default();
        assert!((m.safe_width - 665.0).abs() < f32::EPSILON);
        assert!((m.safe_height - 965.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_dimensions_fall_back() {
        let m = CardMetrics::new(-1.0, f32::NAN, 0.0);
        assert_eq!(m, CardMetrics::default());
    }

    #[test]
    fn test_point_reflection_maps_corners() {
        let m = CardMetrics::default();
        let r = m.point_reflection();
        let p = r.apply(Point::new(100.0, 40.0));
        assert!((p.x - 725.0).abs() < 1e-3);
        assert!((p.y - 1085.0).abs() < 1e-3);
        assert!((r.rotation().abs() - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_concat_applies_right_operand_first() {
        let t = Affine::translate(10.0, 0.0).concat(&Affine::scale(2.0, 2.0));
        let p = t.apply(Point::new(1.0, 1.0));
        assert!((p.x - 12.0).abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
    }
}
