//! Recorded draw operations - the building blocks of a card scene.

use serde::{Deserialize, Serialize};

use crate::card::ImageRef;
use crate::geometry::{Affine, Point, Rect};
use crate::measure::FontSpec;
use crate::suit::Suit;
use crate::surface::{IconTint, Layer, Paint, Stroke, TextAlign, TextBaseline, TextStyle};

/// The content of a recorded draw.
///
/// All coordinates are local; the owning [`Element`]'s transform maps them
/// onto the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ElementKind {
    /// A filled rectangle.
    Fill {
        /// Rectangle in local coordinates.
        rect: Rect,
        /// Fill paint.
        paint: Paint,
    },

    /// An outlined rectangle.
    StrokeRect {
        /// Rectangle in local coordinates.
        rect: Rect,
        /// Line styling.
        stroke: Stroke,
    },

    /// A straight line.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line styling.
        stroke: Stroke,
    },

    /// A single-line text run.
    Text {
        /// Text content.
        content: String,
        /// Anchor point.
        origin: Point,
        /// Font.
        font: FontSpec,
        /// Fill, outline and shadow.
        style: TextStyle,
        /// Horizontal anchor.
        align: TextAlign,
        /// Vertical anchor.
        baseline: TextBaseline,
    },

    /// A suit icon from the icon sheet.
    Icon {
        /// Which quadrant to draw.
        suit: Suit,
        /// Icon centre.
        center: Point,
        /// Drawn edge length.
        size: f32,
        /// Recoloring.
        tint: IconTint,
    },

    /// Face artwork.
    Image {
        /// External image handle.
        image: ImageRef,
        /// Top-left corner.
        origin: Point,
    },
}

/// A clip rectangle captured together with the transform active when it was set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Rectangle in the clip's local coordinates.
    pub rect: Rect,
    /// Transform from clip-local to card coordinates.
    pub transform: Affine,
}

/// A recorded draw with its absolute transform, clips and layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Draw content.
    pub kind: ElementKind,
    /// Local-to-card transform at the time of the draw.
    pub transform: Affine,
    /// Active clips, outermost first.
    pub clips: Vec<Clip>,
    /// Paint layer.
    pub layer: Layer,
}

impl Element {
    /// Create an element with an identity transform on the background layer.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            transform: Affine::IDENTITY,
            clips: Vec::new(),
            layer: Layer::Background,
        }
    }

    /// Set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Set the layer.
    #[must_use]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// The element's anchor point mapped to card coordinates.
    ///
    /// Text uses its origin, icons their centre, images their top-left
    /// corner, fills and outlines their top-left corner and lines their start.
    #[must_use]
    pub fn anchor(&self) -> Point {
        let local = match &self.kind {
            ElementKind::Fill { rect, .. } | ElementKind::StrokeRect { rect, .. } => {
                Point::new(rect.x, rect.y)
            }
            ElementKind::Line { from, .. } => *from,
            ElementKind::Text { origin, .. } | ElementKind::Image { origin, .. } => *origin,
            ElementKind::Icon { center, .. } => *center,
        };
        self.transform.apply(local)
    }

    /// Text content, if this is a text run.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Suit, if this is an icon.
    #[must_use]
    pub fn icon_suit(&self) -> Option<Suit> {
        match &self.kind {
            ElementKind::Icon { suit, .. } => Some(*suit),
            _ => None,
        }
    }
}
