//! The drawing capability the layout engine renders onto.
//!
//! Mirrors a 2D canvas context: a save/restore stack of transforms and clips,
//! plus fills, strokes, text runs, suit icons and artwork images.

use serde::{Deserialize, Serialize};

use crate::card::ImageRef;
use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::measure::FontSpec;
use crate::suit::Suit;

/// Paint for filled regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Paint {
    /// Flat color.
    Solid {
        /// Fill color.
        color: Color,
    },
    /// Vertical gradient from the top edge to the bottom edge of the rect.
    Linear {
        /// Color at the top.
        from: Color,
        /// Color at the bottom.
        to: Color,
    },
    /// Radial gradient from the rect centre to its farthest edge.
    Radial {
        /// Color at the centre.
        inner: Color,
        /// Color at the edge.
        outer: Color,
    },
}

/// Line styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f32,
    /// Optional `[dash, gap]` pattern.
    pub dash: Option<[f32; 2]>,
}

/// Drop shadow or glow behind text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Shadow color.
    pub color: Color,
    /// Blur radius.
    pub blur: f32,
    /// Horizontal offset.
    pub offset_x: f32,
    /// Vertical offset.
    pub offset_y: f32,
}

/// Fill, outline and shadow for a text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Fill color.
    pub fill: Color,
    /// Optional outline drawn over the fill.
    pub stroke: Option<Stroke>,
    /// Optional shadow or glow.
    pub shadow: Option<Shadow>,
}

impl TextStyle {
    /// Plain filled text.
    #[must_use]
    pub fn filled(fill: Color) -> Self {
        Self {
            fill,
            stroke: None,
            shadow: None,
        }
    }
}

/// Horizontal anchor of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Anchor at the run start.
    Left,
    /// Anchor at the run centre.
    Center,
    /// Anchor at the run end.
    Right,
}

/// Vertical anchor of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    /// `y` is the top of the em box.
    Top,
    /// `y` is the vertical middle of the em box.
    Middle,
    /// `y` is the alphabetic baseline.
    Alphabetic,
}

/// How a suit icon is colored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconTint {
    /// Tint color; black means "draw the sheet as is".
    pub color: Color,
    /// Opacity multiplier in `[0, 1]`.
    pub opacity: f32,
}

impl Default for IconTint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            opacity: 1.0,
        }
    }
}

/// One tint per suit, indexed by [`Suit::index`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SuitTints(pub [IconTint; 4]);

impl SuitTints {
    /// The same tint for every suit.
    #[must_use]
    pub fn uniform(tint: IconTint) -> Self {
        Self([tint; 4])
    }

    /// Tint for one suit.
    #[must_use]
    pub fn get(&self, suit: Suit) -> IconTint {
        self.0[suit.index()]
    }
}

/// Paint layers, in the fixed z-order every card face is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Layer {
    /// Full-bleed background fill.
    Background,
    /// Externally supplied face artwork.
    Artwork,
    /// Centre pips or joker decoration.
    Pips,
    /// Ability text panel.
    AbilityText,
    /// Corner indices or the joker label; always topmost on the face.
    CornerIndex,
    /// Editor-only guides drawn in preview mode.
    Guides,
}

/// A 2D drawing target.
pub trait DrawSurface {
    /// Push the current transform and clip.
    fn save(&mut self);

    /// Pop the most recently saved transform and clip.
    fn restore(&mut self);

    /// Translate the current transform.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Rotate the current transform clockwise by `radians`.
    fn rotate(&mut self, radians: f32);

    /// Scale the current transform.
    fn scale(&mut self, sx: f32, sy: f32);

    /// Intersect the clip with `rect` in current coordinates.
    fn clip_rect(&mut self, rect: Rect);

    /// Tag subsequent draws with a paint layer.
    fn set_layer(&mut self, layer: Layer);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Draw a straight line.
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Draw a single-line text run anchored at `at`.
    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        font: &FontSpec,
        style: &TextStyle,
        align: TextAlign,
        baseline: TextBaseline,
    );

    /// Draw the icon-sheet quadrant for `suit`, `size` pixels square, centred on `center`.
    fn draw_icon(&mut self, suit: Suit, center: Point, size: f32, tint: &IconTint);

    /// Draw an artwork image at its natural size with its top-left corner at `at`.
    fn draw_image(&mut self, image: &ImageRef, at: Point);
}
