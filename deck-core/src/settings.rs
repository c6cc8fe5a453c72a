//! Deck-wide settings snapshot.
//!
//! Field names follow the flat camelCase keys of the editor's saved settings,
//! so a settings export loads directly. Missing keys take their defaults and
//! unknown keys are ignored. Layout code never reads [`Settings`] directly;
//! it receives the style structs built here.

use serde::{Deserialize, Serialize};

use crate::ability::{AbilityAlignment, AbilityPlacement, AbilityStyle, HeightMode, OverflowMode};
use crate::color::Color;
use crate::corner::{CornerLayoutMode, CornerOffsets, CornerStyle, Orientation};
use crate::deck::{parse_rank_list, MAX_JOKERS};
use crate::geometry::{CardMetrics, DEFAULT_BLEED, DEFAULT_CARD_HEIGHT, DEFAULT_CARD_WIDTH};
use crate::joker::{JokerStyle, JokerSuitStyle, DEFAULT_JOKER_LABEL};
use crate::measure::FontSpec;
use crate::pips::{pip_size, PipAnchors};
use crate::suit::Suit;
use crate::surface::{IconTint, Paint, Shadow, Stroke, SuitTints, TextStyle};
use crate::{CardError, CardResult};

/// How rank text and icons pick their color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorMode {
    /// Red suits use the red color, black suits the black color.
    Bi,
    /// Each suit has its own color.
    PerSuit,
    /// One color for everything.
    #[default]
    #[serde(other)]
    Single,
}

/// Effect drawn behind rank text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayType {
    /// Soft dark drop shadow.
    Shadow,
    /// Halo in the text color.
    Glow,
    /// No effect.
    #[default]
    #[serde(other)]
    None,
}

/// Full-bleed background fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundStyle {
    /// Top-to-bottom gradient.
    Linear,
    /// Centre-out gradient.
    Radial,
    /// Flat primary color.
    #[default]
    #[serde(other)]
    Solid,
}

/// Every deck-wide option, with the editor's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// Card width including bleed.
    pub card_width: f32,
    /// Card height including bleed.
    pub card_height: f32,
    /// Bleed on every edge.
    pub bleed: f32,

    /// Rank font family.
    pub font_family: String,
    /// Rank font weight.
    pub font_weight: String,
    /// Rank font size; also drives pip and icon sizes.
    pub font_size: f32,
    /// Rank color mode.
    pub font_color_mode: ColorMode,
    /// Rank color in single mode.
    pub font_color: String,
    /// Red-suit rank color in bi mode.
    pub font_color_red: String,
    /// Black-suit rank color in bi mode.
    pub font_color_black: String,
    /// Spades rank color in per-suit mode.
    pub font_color_spades: String,
    /// Hearts rank color in per-suit mode.
    pub font_color_hearts: String,
    /// Clubs rank color in per-suit mode.
    pub font_color_clubs: String,
    /// Diamonds rank color in per-suit mode.
    pub font_color_diamonds: String,
    /// Rank text opacity.
    pub font_opacity: f32,
    /// Shadow or glow behind rank text.
    pub overlay_type: OverlayType,
    /// Outline rank text.
    pub outline: bool,
    /// Outline width.
    pub outline_width: f32,
    /// Outline color.
    pub outline_color: String,

    /// Background fill style.
    pub background_style: BackgroundStyle,
    /// Background color, or gradient start.
    pub background_color_primary: String,
    /// Gradient end.
    pub background_color_secondary: String,

    /// Corner arrangement.
    pub layout: CornerLayoutMode,
    /// Corner rank direction.
    pub corner_orientation: Orientation,
    /// Draw centre pips on number cards.
    pub show_pips: bool,
    /// Mirror corners unless a card overrides it.
    pub mirror_default: bool,

    /// Icon color mode.
    pub icon_color_mode: ColorMode,
    /// Icon color in single mode; black draws the sheet untinted.
    pub icon_color: String,
    /// Red-suit icon color in bi mode.
    pub icon_color_red: String,
    /// Black-suit icon color in bi mode.
    pub icon_color_black: String,
    /// Spades icon color in per-suit mode.
    pub icon_color_spades: String,
    /// Hearts icon color in per-suit mode.
    pub icon_color_hearts: String,
    /// Clubs icon color in per-suit mode.
    pub icon_color_clubs: String,
    /// Diamonds icon color in per-suit mode.
    pub icon_color_diamonds: String,
    /// Icon opacity.
    pub icon_opacity: f32,
    /// Icon size multiplier.
    pub icon_scale: f32,

    /// Corner rank nudge, x.
    pub corner_rank_offset_x: f32,
    /// Corner rank nudge, y.
    pub corner_rank_offset_y: f32,
    /// Corner suit nudge, x.
    pub corner_suit_offset_x: f32,
    /// Corner suit nudge, y.
    pub corner_suit_offset_y: f32,

    /// Comma-separated rank list; blank means A–K.
    pub custom_ranks_string: String,
    /// Add jokers to the deck.
    pub include_jokers: bool,
    /// Requested joker count, clamped to `1..=8` when jokers are on.
    pub joker_count: i64,
    /// Joker label.
    pub joker_label: String,
    /// Append " (WILD)" to the joker label.
    pub joker_wild: bool,
    /// Joker label direction.
    pub joker_label_orientation: Orientation,
    /// Joker label font size.
    pub joker_font_size: f32,
    /// Joker icon arrangement.
    pub joker_suit_style: JokerSuitStyle,

    /// Pip row: top.
    pub pip_top: f32,
    /// Pip row: inner top.
    pub pip_inner_top: f32,
    /// Pip row: centre.
    pub pip_center: f32,
    /// Pip row: inner bottom.
    pub pip_inner_bottom: f32,
    /// Pip row: bottom.
    pub pip_bottom: f32,
    /// Pip column: left.
    pub pip_left: f32,
    /// Pip column: right.
    pub pip_right: f32,
    /// Pip column: centre.
    pub pip_center_x: f32,

    /// Draw guides in preview renders.
    pub show_guidelines: bool,
    /// Designer inset guide distance; `None` hides it.
    pub safe_zone_inset: Option<f32>,

    /// Ability panel placement.
    pub ability_placement: AbilityPlacement,
    /// Mirror the ability panel.
    pub ability_mirror: bool,
    /// Ability panel alignment.
    pub ability_alignment: AbilityAlignment,
    /// Ability panel width percentage.
    pub ability_width_percent: f32,
    /// Ability height policy.
    pub ability_height_mode: HeightMode,
    /// Ability fixed height.
    pub ability_fixed_height: f32,
    /// Ability overflow policy.
    pub ability_overflow: OverflowMode,
    /// Ability panel fill color.
    pub ability_background: String,
    /// Ability panel fill opacity.
    pub ability_background_opacity: f32,
    /// Heading font family.
    pub ability_header_font_family: String,
    /// Heading font weight.
    pub ability_header_font_weight: String,
    /// Heading font size.
    pub ability_header_font_size: f32,
    /// Body font family.
    pub ability_body_font_family: String,
    /// Body font weight.
    pub ability_body_font_weight: String,
    /// Body font size.
    pub ability_body_font_size: f32,
    /// Ability text color.
    pub ability_text_color: String,
    /// Ability text opacity.
    pub ability_text_opacity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let black = "#000000".to_string();
        let red = "#d12d2d".to_string();
        Self {
            card_width: DEFAULT_CARD_WIDTH,
            card_height: DEFAULT_CARD_HEIGHT,
            bleed: DEFAULT_BLEED,

            font_family: "Roboto".to_string(),
            font_weight: "700".to_string(),
            font_size: 72.0,
            font_color_mode: ColorMode::Single,
            font_color: black.clone(),
            font_color_red: red.clone(),
            font_color_black: black.clone(),
            font_color_spades: black.clone(),
            font_color_hearts: red.clone(),
            font_color_clubs: black.clone(),
            font_color_diamonds: red.clone(),
            font_opacity: 1.0,
            overlay_type: OverlayType::None,
            outline: false,
            outline_width: 3.0,
            outline_color: black.clone(),

            background_style: BackgroundStyle::Solid,
            background_color_primary: "#ffffff".to_string(),
            background_color_secondary: "#f0f0f0".to_string(),

            layout: CornerLayoutMode::RankAboveSuit,
            corner_orientation: Orientation::Horizontal,
            show_pips: true,
            mirror_default: true,

            icon_color_mode: ColorMode::Single,
            icon_color: black.clone(),
            icon_color_red: red.clone(),
            icon_color_black: black.clone(),
            icon_color_spades: black.clone(),
            icon_color_hearts: red.clone(),
            icon_color_clubs: black.clone(),
            icon_color_diamonds: red,
            icon_opacity: 1.0,
            icon_scale: 1.0,

            corner_rank_offset_x: 0.0,
            corner_rank_offset_y: 0.0,
            corner_suit_offset_x: 0.0,
            corner_suit_offset_y: 0.0,

            custom_ranks_string: String::new(),
            include_jokers: false,
            joker_count: 2,
            joker_label: DEFAULT_JOKER_LABEL.to_string(),
            joker_wild: false,
            joker_label_orientation: Orientation::Horizontal,
            joker_font_size: 72.0,
            joker_suit_style: JokerSuitStyle::CenterCircle,

            pip_top: PipAnchors::default().top,
            pip_inner_top: PipAnchors::default().inner_top,
            pip_center: PipAnchors::default().center,
            pip_inner_bottom: PipAnchors::default().inner_bottom,
            pip_bottom: PipAnchors::default().bottom,
            pip_left: PipAnchors::default().left,
            pip_right: PipAnchors::default().right,
            pip_center_x: PipAnchors::default().center_x,

            show_guidelines: true,
            safe_zone_inset: Some(80.0),

            ability_placement: AbilityPlacement::Bottom,
            ability_mirror: false,
            ability_alignment: AbilityAlignment::Center,
            ability_width_percent: 120.0,
            ability_height_mode: HeightMode::Auto,
            ability_fixed_height: 180.0,
            ability_overflow: OverflowMode::Shrink,
            ability_background: "#ffffff".to_string(),
            ability_background_opacity: 0.0,
            ability_header_font_family: "Roboto".to_string(),
            ability_header_font_weight: "700".to_string(),
            ability_header_font_size: 28.0,
            ability_body_font_family: "Roboto".to_string(),
            ability_body_font_weight: "400".to_string(),
            ability_body_font_size: 20.0,
            ability_text_color: black,
            ability_text_opacity: 1.0,
        }
    }
}

/// Pick the color string for a suit under a color mode.
///
/// Jokers (`suit == None`) always use the single color.
fn mode_color<'a>(
    mode: ColorMode,
    suit: Option<Suit>,
    single: &'a str,
    bi: [&'a str; 2],
    per_suit: [&'a str; 4],
) -> &'a str {
    match (mode, suit) {
        (ColorMode::Bi, Some(s)) => {
            let [red, black] = bi;
            if s.is_red() {
                red
            } else {
                black
            }
        }
        (ColorMode::PerSuit, Some(s)) => per_suit[s.index()],
        _ => single,
    }
}

impl Settings {
    /// Load settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> CardResult<Self> {
        serde_json::from_str(json).map_err(CardError::Serialization)
    }

    /// Serialize settings to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self).map_err(CardError::Serialization)
    }

    /// Card dimensions, with invalid values replaced by defaults.
    #[must_use]
    pub fn metrics(&self) -> CardMetrics {
        CardMetrics::new(self.card_width, self.card_height, self.bleed)
    }

    /// Pip anchor lines.
    #[must_use]
    pub fn pip_anchors(&self) -> PipAnchors {
        PipAnchors {
            left: self.pip_left,
            center_x: self.pip_center_x,
            right: self.pip_right,
            top: self.pip_top,
            inner_top: self.pip_inner_top,
            center: self.pip_center,
            inner_bottom: self.pip_inner_bottom,
            bottom: self.pip_bottom,
        }
    }

    /// Centre pip edge length.
    #[must_use]
    pub fn pip_size(&self) -> f32 {
        pip_size(self.font_size, self.icon_scale)
    }

    /// Corner rank font.
    #[must_use]
    pub fn corner_font(&self) -> FontSpec {
        FontSpec::new(&self.font_family, &self.font_weight, self.font_size)
    }

    /// Rank text color for a suit (or a joker), opacity applied.
    #[must_use]
    pub fn font_color_for(&self, suit: Option<Suit>) -> Color {
        let hex = mode_color(
            self.font_color_mode,
            suit,
            &self.font_color,
            [&self.font_color_red, &self.font_color_black],
            [
                &self.font_color_spades,
                &self.font_color_hearts,
                &self.font_color_clubs,
                &self.font_color_diamonds,
            ],
        );
        Color::parse_or(hex, Color::BLACK).with_opacity(self.font_opacity)
    }

    /// Rank text fill plus the configured outline and overlay effect.
    #[must_use]
    pub fn text_style_for(&self, suit: Option<Suit>) -> TextStyle {
        let fill = self.font_color_for(suit);
        let stroke = (self.outline && self.outline_width > 0.0).then(|| Stroke {
            color: Color::parse_or(&self.outline_color, Color::BLACK),
            width: self.outline_width,
            dash: None,
        });
        let shadow = match self.overlay_type {
            OverlayType::Shadow => Some(Shadow {
                color: Color::BLACK.with_alpha(0.35),
                blur: 4.0,
                offset_x: 2.0,
                offset_y: 3.0,
            }),
            OverlayType::Glow => Some(Shadow {
                color: fill.with_alpha(0.7),
                blur: 10.0,
                offset_x: 0.0,
                offset_y: 0.0,
            }),
            OverlayType::None => None,
        };
        TextStyle {
            fill,
            stroke,
            shadow,
        }
    }

    /// Icon tint for one suit.
    #[must_use]
    pub fn icon_tint_for(&self, suit: Suit) -> IconTint {
        let hex = mode_color(
            self.icon_color_mode,
            Some(suit),
            &self.icon_color,
            [&self.icon_color_red, &self.icon_color_black],
            [
                &self.icon_color_spades,
                &self.icon_color_hearts,
                &self.icon_color_clubs,
                &self.icon_color_diamonds,
            ],
        );
        IconTint {
            color: Color::parse_or(hex, Color::BLACK),
            opacity: self.icon_opacity.clamp(0.0, 1.0),
        }
    }

    /// Icon tints for all four suits.
    #[must_use]
    pub fn suit_tints(&self) -> SuitTints {
        SuitTints(Suit::ALL.map(|s| self.icon_tint_for(s)))
    }

    /// Corner index style for a suit.
    #[must_use]
    pub fn corner_style(&self, suit: Suit) -> CornerStyle {
        CornerStyle {
            font: self.corner_font(),
            layout: self.layout,
            orientation: self.corner_orientation,
            icon_scale: self.icon_scale,
            offsets: CornerOffsets {
                rank_x: self.corner_rank_offset_x,
                rank_y: self.corner_rank_offset_y,
                suit_x: self.corner_suit_offset_x,
                suit_y: self.corner_suit_offset_y,
            },
            text_style: self.text_style_for(Some(suit)),
            tint: self.icon_tint_for(suit),
        }
    }

    /// Ability panel style.
    #[must_use]
    pub fn ability_style(&self) -> AbilityStyle {
        AbilityStyle {
            header_font: FontSpec::new(
                &self.ability_header_font_family,
                &self.ability_header_font_weight,
                self.ability_header_font_size,
            ),
            body_font: FontSpec::new(
                &self.ability_body_font_family,
                &self.ability_body_font_weight,
                self.ability_body_font_size,
            ),
            corner_font: self.corner_font(),
            icon_scale: self.icon_scale,
            alignment: self.ability_alignment,
            placement: self.ability_placement,
            width_percent: self.ability_width_percent,
            height_mode: self.ability_height_mode,
            fixed_height: self.ability_fixed_height,
            overflow: self.ability_overflow,
            mirror: self.ability_mirror,
            background: Color::parse_or(&self.ability_background, Color::WHITE)
                .with_opacity(self.ability_background_opacity),
            text_color: Color::parse_or(&self.ability_text_color, Color::BLACK)
                .with_opacity(self.ability_text_opacity),
            tints: self.suit_tints(),
        }
    }

    /// Joker face style.
    #[must_use]
    pub fn joker_style(&self) -> JokerStyle {
        JokerStyle {
            font: FontSpec::new(&self.font_family, &self.font_weight, self.joker_font_size),
            label: self.joker_label.clone(),
            wild: self.joker_wild,
            orientation: self.joker_label_orientation,
            suit_style: self.joker_suit_style,
            icon_scale: self.icon_scale,
            text_style: self.text_style_for(None),
            tints: self.suit_tints(),
        }
    }

    /// Background paint.
    #[must_use]
    pub fn background_paint(&self) -> Paint {
        let primary = Color::parse_or(&self.background_color_primary, Color::WHITE);
        let secondary = Color::parse_or(&self.background_color_secondary, Color::WHITE);
        match self.background_style {
            BackgroundStyle::Solid => Paint::Solid { color: primary },
            BackgroundStyle::Linear => Paint::Linear {
                from: primary,
                to: secondary,
            },
            BackgroundStyle::Radial => Paint::Radial {
                inner: primary,
                outer: secondary,
            },
        }
    }

    /// Ranks in the deck, in order, duplicates included.
    #[must_use]
    pub fn active_ranks(&self) -> Vec<String> {
        parse_rank_list(&self.custom_ranks_string)
    }

    /// Number of jokers in the deck.
    #[must_use]
    pub fn joker_count(&self) -> usize {
        if !self.include_jokers || self.joker_count <= 0 {
            return 0;
        }
        usize::try_from(self.joker_count).map_or(MAX_JOKERS, |n| n.clamp(1, MAX_JOKERS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_editor() {
        let s = Settings::default();
        assert_eq!(s.metrics(), CardMetrics::default());
        assert!((s.font_size - 72.0).abs() < f32::EPSILON);
        assert_eq!(s.layout, CornerLayoutMode::RankAboveSuit);
        assert_eq!(s.ability_overflow, OverflowMode::Shrink);
        assert_eq!(s.joker_count(), 0);
        assert_eq!(s.active_ranks().len(), 13);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "fontSize": 60,
            "layout": "sideBySide",
            "abilityOverflow": "hidden",
            "jokerSuitStyle": "diamond",
            "iconSheet": null,
            "deckIdentity": {"name": "ignored"}
        }"#;
        let s = Settings::from_json(json).expect("parse");
        assert!((s.font_size - 60.0).abs() < f32::EPSILON);
        assert_eq!(s.layout, CornerLayoutMode::SideBySide);
        assert_eq!(s.ability_overflow, OverflowMode::Hidden);
        assert_eq!(s.joker_suit_style, JokerSuitStyle::Diamond);
        assert!((s.bleed - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_enum_values_fall_back() {
        let json =
            r#"{"layout": "diagonal", "abilityAlignment": "justify", "jokerSuitStyle": "spiral"}"#;
        let s = Settings::from_json(json).expect("parse");
        assert_eq!(s.layout, CornerLayoutMode::SideBySide);
        assert_eq!(s.ability_alignment, AbilityAlignment::Left);
        assert_eq!(s.joker_suit_style, JokerSuitStyle::CenterCircle);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(CardError::Serialization(_))
        ));
    }

    #[test]
    fn test_color_modes() {
        let mut s = Settings {
            font_color: "#123456".to_string(),
            ..Settings::default()
        };
        assert_eq!(s.font_color_for(Some(Suit::Hearts)), Color::rgb(0x12, 0x34, 0x56));

        s.font_color_mode = ColorMode::Bi;
        assert_eq!(s.font_color_for(Some(Suit::Hearts)), Color::rgb(0xd1, 0x2d, 0x2d));
        assert_eq!(s.font_color_for(Some(Suit::Clubs)), Color::BLACK);
        assert_eq!(s.font_color_for(None), Color::rgb(0x12, 0x34, 0x56));

        s.icon_color_mode = ColorMode::PerSuit;
        s.icon_color_clubs = "#00ff00".to_string();
        assert_eq!(s.icon_tint_for(Suit::Clubs).color, Color::rgb(0, 255, 0));
    }

    #[test]
    fn test_text_effects() {
        let s = Settings {
            overlay_type: OverlayType::Glow,
            outline: true,
            ..Settings::default()
        };
        let style = s.text_style_for(Some(Suit::Spades));
        let shadow = style.shadow.expect("glow");
        assert!((shadow.blur - 10.0).abs() < f32::EPSILON);
        assert!((shadow.color.a - 0.7).abs() < f32::EPSILON);
        assert!((style.stroke.expect("outline").width - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_joker_count_clamps() {
        let mut s = Settings {
            include_jokers: true,
            joker_count: 20,
            ..Settings::default()
        };
        assert_eq!(s.joker_count(), 8);
        s.joker_count = 0;
        assert_eq!(s.joker_count(), 0);
        s.joker_count = 3;
        assert_eq!(s.joker_count(), 3);
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings {
            background_style: BackgroundStyle::Radial,
            ..Settings::default()
        };
        let back = Settings::from_json(&s.to_json().expect("serialize")).expect("parse");
        assert_eq!(back, s);
        assert!(matches!(back.background_paint(), Paint::Radial { .. }));
    }

    #[test]
    fn test_css_color_names_and_functions() {
        let json = r#"{
            "outline": true,
            "outlineColor": "red",
            "fontColor": "rgba(0, 0, 255, 0.5)",
            "fontOpacity": 0.5
        }"#;
        let s = Settings::from_json(json).expect("parse");
        let style = s.text_style_for(Some(Suit::Spades));
        assert_eq!(style.stroke.expect("outline").color, Color::rgb(255, 0, 0));
        assert_eq!(style.fill, Color::rgb(0, 0, 255).with_alpha(0.25));
    }
}
