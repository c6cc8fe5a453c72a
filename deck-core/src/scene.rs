//! Recorded card scene - an ordered display list that implements [`DrawSurface`].

use serde::{Deserialize, Serialize};

use crate::card::ImageRef;
use crate::element::{Clip, Element, ElementKind};
use crate::geometry::{Affine, Point, Rect};
use crate::measure::FontSpec;
use crate::suit::Suit;
use crate::surface::{
    DrawSurface, IconTint, Layer, Paint, Stroke, TextAlign, TextBaseline, TextStyle,
};
use crate::{CardError, CardResult};

#[derive(Debug, Clone, PartialEq)]
struct GraphicsState {
    transform: Affine,
    clips: Vec<Clip>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            clips: Vec::new(),
        }
    }
}

/// A card face recorded as draw operations in paint order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Elements in the order they were drawn.
    elements: Vec<Element>,
    /// Card width in pixels.
    pub width: f32,
    /// Card height in pixels.
    pub height: f32,
    #[serde(skip)]
    state: GraphicsState,
    #[serde(skip)]
    stack: Vec<GraphicsState>,
    #[serde(skip, default = "default_layer")]
    layer: Layer,
}

fn default_layer() -> Layer {
    Layer::Background
}

impl Scene {
    /// Create a new empty scene with the given card size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
            state: GraphicsState::default(),
            stack: Vec::new(),
            layer: Layer::Background,
        }
    }

    /// Append an element as-is, bypassing the graphics state.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// All elements in paint order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Elements drawn on one layer, in paint order.
    pub fn elements_in(&self, layer: Layer) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.layer == layer)
    }

    /// Layers in the order they first appear.
    #[must_use]
    pub fn layer_order(&self) -> Vec<Layer> {
        let mut order = Vec::new();
        for element in &self.elements {
            if order.last() != Some(&element.layer) {
                order.push(element.layer);
            }
        }
        order
    }

    /// Get the number of elements in the scene.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Drop all elements and reset the graphics state.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.state = GraphicsState::default();
        self.stack.clear();
        self.layer = Layer::Background;
    }

    /// The current local-to-card transform.
    #[must_use]
    pub fn current_transform(&self) -> Affine {
        self.state.transform
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CardResult<String> {
        serde_json::to_string(self).map_err(CardError::Serialization)
    }

    /// Deserialize a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CardResult<Self> {
        serde_json::from_str(json).map_err(CardError::Serialization)
    }

    fn record(&mut self, kind: ElementKind) {
        tracing::trace!("Record {:?} on {:?}", kind, self.layer);
        self.elements.push(Element {
            kind,
            transform: self.state.transform,
            clips: self.state.clips.clone(),
            layer: self.layer,
        });
    }

    fn apply(&mut self, local: &Affine) {
        self.state.transform = self.state.transform.concat(local);
    }
}

impl DrawSurface for Scene {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        } else {
            tracing::warn!("Scene restore without matching save");
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.apply(&Affine::translate(dx, dy));
    }

    fn rotate(&mut self, radians: f32) {
        self.apply(&Affine::rotate(radians));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.apply(&Affine::scale(sx, sy));
    }

    fn clip_rect(&mut self, rect: Rect) {
        let clip = Clip {
            rect,
            transform: self.state.transform,
        };
        self.state.clips.push(clip);
    }

    fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.record(ElementKind::Fill {
            rect,
            paint: paint.clone(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.record(ElementKind::StrokeRect {
            rect,
            stroke: stroke.clone(),
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.record(ElementKind::Line {
            from,
            to,
            stroke: stroke.clone(),
        });
    }

    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        font: &FontSpec,
        style: &TextStyle,
        align: TextAlign,
        baseline: TextBaseline,
    ) {
        if text.is_empty() {
            return;
        }
        self.record(ElementKind::Text {
            content: text.to_string(),
            origin: at,
            font: font.clone(),
            style: style.clone(),
            align,
            baseline,
        });
    }

    fn draw_icon(&mut self, suit: Suit, center: Point, size: f32, tint: &IconTint) {
        self.record(ElementKind::Icon {
            suit,
            center,
            size,
            tint: *tint,
        });
    }

    fn draw_image(&mut self, image: &ImageRef, at: Point) {
        self.record(ElementKind::Image {
            image: image.clone(),
            origin: at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_save_restore_transform() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.save();
        scene.translate(10.0, 20.0);
        scene.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), &Paint::Solid { color: Color::BLACK });
        scene.restore();
        scene.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), &Paint::Solid { color: Color::BLACK });

        let anchors: Vec<_> = scene.elements().map(Element::anchor).collect();
        assert_eq!(anchors[0], Point::new(10.0, 20.0));
        assert_eq!(anchors[1], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_clip_is_scoped_by_restore() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.save();
        scene.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        scene.draw_icon(Suit::Spades, Point::new(1.0, 1.0), 4.0, &IconTint::default());
        scene.restore();
        scene.draw_icon(Suit::Spades, Point::new(1.0, 1.0), 4.0, &IconTint::default());

        let clips: Vec<_> = scene.elements().map(|e| e.clips.len()).collect();
        assert_eq!(clips, vec![1, 0]);
    }

    #[test]
    fn test_layer_order_and_json_roundtrip() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.set_layer(Layer::Pips);
        scene.draw_icon(Suit::Hearts, Point::new(1.0, 1.0), 4.0, &IconTint::default());
        scene.set_layer(Layer::CornerIndex);
        scene.fill_text(
            "A",
            Point::new(0.0, 0.0),
            &FontSpec::new("Roboto", "700", 10.0),
            &TextStyle::filled(Color::BLACK),
            TextAlign::Left,
            TextBaseline::Top,
        );
        assert_eq!(scene.layer_order(), vec![Layer::Pips, Layer::CornerIndex]);

        let json = scene.to_json().expect("serialize");
        let restored = Scene::from_json(&json).expect("deserialize");
        assert_eq!(restored.element_count(), 2);
        assert_eq!(restored.elements().next().and_then(Element::icon_suit), Some(Suit::Hearts));
    }

    #[test]
    fn test_empty_text_is_not_recorded() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.fill_text(
            "",
            Point::default(),
            &FontSpec::new("Roboto", "400", 10.0),
            &TextStyle::filled(Color::BLACK),
            TextAlign::Left,
            TextBaseline::Top,
        );
        assert!(scene.is_empty());
    }
}
