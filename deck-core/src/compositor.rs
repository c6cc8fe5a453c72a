//! Card surface compositor.
//!
//! Draws one card face in the fixed layer order: background, face artwork,
//! pips, ability text, corner index. Jokers replace pips, ability text and
//! corners with a decorative icon arrangement and a centred label. Preview
//! mode adds the editor guides on top; export mode never does.

use serde::{Deserialize, Serialize};

use crate::ability::render_ability_text;
use crate::card::CardRecord;
use crate::corner::draw_corner;
use crate::deck::{CardSlot, Deck};
use crate::geometry::{CardMetrics, Point};
use crate::guides::draw_guides;
use crate::joker::{draw_joker_icons, draw_joker_label, layout_joker};
use crate::measure::TextMeasurer;
use crate::pips::draw_pips;
use crate::scene::Scene;
use crate::settings::Settings;
use crate::suit::Suit;
use crate::surface::{DrawSurface, Layer, Paint};
use crate::CardResult;

/// Whether a render is for on-screen editing or for output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Clean output.
    #[default]
    Export,
    /// Output plus editor guides, when enabled in the settings.
    Preview,
}

/// Fill the whole card, bleed included.
pub fn draw_background(surface: &mut dyn DrawSurface, metrics: &CardMetrics, paint: &Paint) {
    surface.set_layer(Layer::Background);
    surface.fill_rect(metrics.card_rect(), paint);
}

/// Draw a card's face artwork.
///
/// The image is centred on the card plus the record's offset, scaled to fit
/// the safe area times the record's scale, flipped and rotated about its
/// centre. Returns `false` when there is no drawable image.
pub fn draw_face_image(
    surface: &mut dyn DrawSurface,
    metrics: &CardMetrics,
    card: &CardRecord,
) -> bool {
    let Some(image) = card.face_image.as_ref().filter(|i| i.is_drawable()) else {
        if card.face_image.is_some() {
            tracing::warn!("Skipping face image with unusable size");
        }
        return false;
    };

    let base = (metrics.safe_width / image.width).min(metrics.safe_height / image.height);
    let sx = base * card.scale * if card.flip_h { -1.0 } else { 1.0 };
    let sy = base * card.scale * if card.flip_v { -1.0 } else { 1.0 };
    let center = metrics.center();

    surface.set_layer(Layer::Artwork);
    surface.save();
    surface.translate(center.x + card.offset_x, center.y + card.offset_y);
    surface.rotate(card.rotation.to_radians());
    surface.scale(sx, sy);
    surface.draw_image(image, Point::new(-image.width / 2.0, -image.height / 2.0));
    surface.restore();
    true
}

/// Composes card faces from a settings snapshot.
pub struct CardCompositor<'a> {
    settings: &'a Settings,
    measurer: &'a dyn TextMeasurer,
    mode: RenderMode,
    metrics: CardMetrics,
}

impl<'a> CardCompositor<'a> {
    /// Create a compositor in export mode.
    #[must_use]
    pub fn new(settings: &'a Settings, measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            settings,
            measurer,
            mode: RenderMode::Export,
            metrics: settings.metrics(),
        }
    }

    /// Set the render mode.
    #[must_use]
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Card dimensions in use.
    #[must_use]
    pub fn metrics(&self) -> &CardMetrics {
        &self.metrics
    }

    /// Draw a suited card onto `surface`.
    pub fn draw_card(
        &self,
        surface: &mut dyn DrawSurface,
        rank: &str,
        suit: Suit,
        card: &CardRecord,
    ) {
        let s = self.settings;
        let metrics = &self.metrics;
        tracing::debug!("Compose {rank}{} ({:?})", suit.symbol(), self.mode);

        draw_background(surface, metrics, &s.background_paint());
        draw_face_image(surface, metrics, card);

        if s.show_pips {
            surface.set_layer(Layer::Pips);
            let drawn = draw_pips(
                surface,
                rank,
                suit,
                metrics,
                &s.pip_anchors(),
                s.pip_size(),
                &s.icon_tint_for(suit),
            );
            tracing::trace!("Drew {drawn} pips");
        }

        surface.set_layer(Layer::AbilityText);
        render_ability_text(
            surface,
            &card.ability_markdown,
            rank,
            suit,
            metrics,
            &s.ability_style(),
            self.measurer,
        );

        surface.set_layer(Layer::CornerIndex);
        draw_corner(
            surface,
            rank,
            suit,
            metrics,
            &s.corner_style(suit),
            self.measurer,
            card.mirror_corners_or(s.mirror_default),
        );

        self.draw_overlays(surface);
    }

    /// Draw a joker onto `surface`.
    pub fn draw_joker(&self, surface: &mut dyn DrawSurface, card: &CardRecord) {
        let metrics = &self.metrics;
        let style = self.settings.joker_style();
        tracing::debug!("Compose joker ({:?})", self.mode);

        draw_background(surface, metrics, &self.settings.background_paint());
        draw_face_image(surface, metrics, card);

        let layout = layout_joker(metrics, &style, self.measurer);
        surface.set_layer(Layer::Pips);
        draw_joker_icons(surface, &layout, &style);
        surface.set_layer(Layer::CornerIndex);
        draw_joker_label(surface, &layout, &style);

        self.draw_overlays(surface);
    }

    /// Record a suited card as a scene.
    #[must_use]
    pub fn compose_card(&self, rank: &str, suit: Suit, card: &CardRecord) -> Scene {
        let mut scene = Scene::new(self.metrics.card_width, self.metrics.card_height);
        self.draw_card(&mut scene, rank, suit, card);
        scene
    }

    /// Record a joker as a scene.
    #[must_use]
    pub fn compose_joker(&self, card: &CardRecord) -> Scene {
        let mut scene = Scene::new(self.metrics.card_width, self.metrics.card_height);
        self.draw_joker(&mut scene, card);
        scene
    }

    /// Record the card behind a deck slot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CardError::CardNotFound`] if the deck has no such card.
    pub fn compose_slot(&self, deck: &Deck, slot: &CardSlot) -> CardResult<Scene> {
        let card = deck.record(slot)?;
        Ok(match slot {
            CardSlot::Standard { suit, rank, .. } => self.compose_card(rank, *suit, card),
            CardSlot::Joker { .. } => self.compose_joker(card),
        })
    }

    fn draw_overlays(&self, surface: &mut dyn DrawSurface) {
        if self.mode == RenderMode::Preview && self.settings.show_guidelines {
            draw_guides(
                surface,
                &self.metrics,
                &self.settings.pip_anchors(),
                self.settings.safe_zone_inset,
            );
        }
    }
}
