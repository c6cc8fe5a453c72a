//! Ability text panels: markdown with inline suit icons, wrapped and fitted
//! into a box between the corner indices.
//!
//! Layout is computed once per render into an [`AbilityLayout`]; drawing
//! walks that layout. The optional mirrored copy is a second pass of the same
//! draw under a 180° rotation about the card centre.

pub mod markdown;
pub mod segment;
pub mod wrap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{CardMetrics, Point, Rect};
use crate::measure::{FontSpec, TextMeasurer};
use crate::suit::Suit;
use crate::surface::{DrawSurface, Paint, SuitTints, TextAlign, TextBaseline, TextStyle};

pub use markdown::{extract_blocks, Block, BlockKind};
pub use segment::{
    measure_segments, split_inline, InlinePiece, PipSuit, SegmentKind, TextSegment,
};
pub use wrap::{layout_blocks, panel_height, wrap_segments, BlockLayout, LineLayout};

/// Inner padding of the panel on every side.
pub const PADDING: f32 = 14.0;
/// Vertical gap between blocks.
pub const BLOCK_SPACING: f32 = 8.0;
/// Inline pip size relative to the body font size.
pub const PIP_SIZE_RATIO: f32 = 0.9;
/// Rank used to estimate the corner width when none is given.
pub const CORNER_WIDTH_SAMPLE: &str = "10";

/// Horizontal alignment of the panel and of its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AbilityAlignment {
    /// Centred.
    #[default]
    Center,
    /// Flush right.
    Right,
    /// Flush left.
    #[serde(other)]
    Left,
}

/// Vertical panel placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AbilityPlacement {
    /// Below the top corner index.
    Top,
    /// Above the bottom edge.
    #[default]
    #[serde(other)]
    Bottom,
}

/// Panel height policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeightMode {
    /// Use `fixed_height`.
    Fixed,
    /// Grow with content.
    #[default]
    #[serde(other)]
    Auto,
}

/// What happens when content exceeds a fixed height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverflowMode {
    /// Scale the content down uniformly.
    #[default]
    Shrink,
    /// Clip to the box.
    Hidden,
    /// Draw at natural size past the box.
    #[serde(other)]
    Overflow,
}

/// Ability panel configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityStyle {
    /// Heading font.
    pub header_font: FontSpec,
    /// Paragraph and list font.
    pub body_font: FontSpec,
    /// Corner rank font, used to estimate the corner width.
    pub corner_font: FontSpec,
    /// Icon scale shared with corners and pips.
    pub icon_scale: f32,
    /// Alignment.
    pub alignment: AbilityAlignment,
    /// Placement.
    pub placement: AbilityPlacement,
    /// Panel width as a percentage of the space between corners.
    pub width_percent: f32,
    /// Height policy.
    pub height_mode: HeightMode,
    /// Height used by [`HeightMode::Fixed`].
    pub fixed_height: f32,
    /// Overflow policy for [`HeightMode::Fixed`].
    pub overflow: OverflowMode,
    /// Draw a point-mirrored copy.
    pub mirror: bool,
    /// Panel fill; not drawn when fully transparent.
    pub background: Color,
    /// Text fill.
    pub text_color: Color,
    /// Inline pip coloring per suit.
    pub tints: SuitTints,
}

/// Panel box in card coordinates plus the content scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width on the card.
    pub w: f32,
    /// Height on the card.
    pub h: f32,
    /// Uniform content scale, `1.0` unless shrunk.
    pub scale: f32,
}

/// A fully laid out panel ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityLayout {
    /// Panel box.
    pub geometry: PanelGeometry,
    /// Wrapped blocks.
    pub blocks: Vec<BlockLayout>,
    /// Natural (unscaled) content height including padding.
    pub natural_height: f32,
    /// Clip drawing to the box.
    pub clip: bool,
    /// Inline pip advance.
    pub pip_size: f32,
    /// Suit used for `::suit::`.
    pub suit: Suit,
}

/// Width reserved for one corner index.
#[must_use]
pub fn corner_width(
    rank: &str,
    metrics: &CardMetrics,
    style: &AbilityStyle,
    measurer: &dyn TextMeasurer,
) -> f32 {
    let sample = if rank.is_empty() {
        CORNER_WIDTH_SAMPLE
    } else {
        rank
    };
    let fs = style.corner_font.size;
    let rank_width = measurer.measure(sample, &style.corner_font);
    let icon_width = fs * 0.9 * style.icon_scale;
    metrics.bleed + rank_width.max(icon_width) + fs * 0.8
}

/// Lay out the ability panel for one card.
///
/// Returns `None` when the markdown is blank or yields no blocks.
#[must_use]
pub fn layout_ability_panel(
    markdown: &str,
    rank: &str,
    suit: Suit,
    metrics: &CardMetrics,
    style: &AbilityStyle,
    measurer: &dyn TextMeasurer,
) -> Option<AbilityLayout> {
    if markdown.trim().is_empty() {
        return None;
    }
    let blocks = extract_blocks(markdown);
    if blocks.is_empty() {
        return None;
    }

    let corner = corner_width(rank, metrics, style, measurer);
    let base_width = metrics.card_width - corner * 2.0;
    let target_width = base_width * (style.width_percent / 100.0);
    let pip_size = style.body_font.size * PIP_SIZE_RATIO;

    let layouts = layout_blocks(
        &blocks,
        &style.header_font,
        &style.body_font,
        target_width - PADDING * 2.0,
        pip_size,
        suit,
        measurer,
    );
    let natural_height = panel_height(&layouts, PADDING, BLOCK_SPACING);

    let mut scale = 1.0;
    let mut height = natural_height;
    let mut clip = false;
    if style.height_mode == HeightMode::Fixed {
        let desired = style.fixed_height;
        if style.overflow == OverflowMode::Shrink && natural_height > desired && desired > 0.0 {
            scale = desired / natural_height;
        }
        clip = style.overflow == OverflowMode::Hidden;
        height = desired;
    }

    let x = corner
        + match style.alignment {
            AbilityAlignment::Left => 0.0,
            AbilityAlignment::Center => (base_width - target_width) / 2.0,
            AbilityAlignment::Right => base_width - target_width,
        };
    let margin = style.corner_font.size * 0.6;
    let y = match style.placement {
        AbilityPlacement::Top => metrics.bleed + margin,
        AbilityPlacement::Bottom => metrics.card_height - metrics.bleed - margin - height,
    };

    tracing::trace!(
        "Ability panel {} blocks at ({x:.1}, {y:.1}) \
         {target_width:.1}x{height:.1} scale {scale:.3}",
        layouts.len()
    );

    Some(AbilityLayout {
        geometry: PanelGeometry {
            x,
            y,
            w: target_width,
            h: height,
            scale,
        },
        blocks: layouts,
        natural_height,
        clip,
        pip_size,
        suit,
    })
}

/// Paint one copy of a laid-out panel in the current coordinate system.
pub fn draw_ability_panel(
    surface: &mut dyn DrawSurface,
    layout: &AbilityLayout,
    style: &AbilityStyle,
) {
    let g = layout.geometry;
    let inner_w = g.w / g.scale;
    let inner_h = g.h / g.scale;
    let text_style = TextStyle::filled(style.text_color);
    let icon_size = layout.pip_size * style.icon_scale;

    surface.save();
    surface.translate(g.x, g.y);
    surface.scale(g.scale, g.scale);
    let panel = Rect::new(0.0, 0.0, inner_w, inner_h);
    if layout.clip {
        surface.clip_rect(panel);
    }
    if style.background.a > 0.0 {
        surface.fill_rect(
            panel,
            &Paint::Solid {
                color: style.background,
            },
        );
    }

    let mut cursor_y = PADDING;
    for (i, block) in layout.blocks.iter().enumerate() {
        for line in &block.lines {
            let slack = inner_w - PADDING * 2.0 - line.width;
            let mut x = PADDING
                + match style.alignment {
                    AbilityAlignment::Left => 0.0,
                    AbilityAlignment::Center => slack / 2.0,
                    AbilityAlignment::Right => slack,
                };
            let y = cursor_y + block.line_height / 2.0;

            for segment in &line.segments {
                match segment.kind {
                    SegmentKind::Pip => {
                        let suit = segment.suit.unwrap_or(layout.suit);
                        let center = Point::new(x + layout.pip_size / 2.0, y);
                        surface.draw_icon(suit, center, icon_size, &style.tints.get(suit));
                    }
                    SegmentKind::Text => {
                        if let Some(text) = &segment.text {
                            surface.fill_text(
                                text,
                                Point::new(x, y),
                                &block.font,
                                &text_style,
                                TextAlign::Left,
                                TextBaseline::Middle,
                            );
                        }
                    }
                    SegmentKind::Space => {}
                }
                x += segment.width;
            }
            cursor_y += block.line_height;
        }
        if i + 1 < layout.blocks.len() {
            cursor_y += BLOCK_SPACING;
        }
    }
    surface.restore();
}

/// Lay out and paint a card's ability text, plus its mirrored copy when
/// configured.
///
/// Returns the layout that was drawn, or `None` when there was nothing to draw.
pub fn render_ability_text(
    surface: &mut dyn DrawSurface,
    markdown: &str,
    rank: &str,
    suit: Suit,
    metrics: &CardMetrics,
    style: &AbilityStyle,
    measurer: &dyn TextMeasurer,
) -> Option<AbilityLayout> {
    let layout = layout_ability_panel(markdown, rank, suit, metrics, style, measurer)?;
    let passes = if style.mirror { 2 } else { 1 };
    for pass in 0..passes {
        surface.save();
        if pass == 1 {
            surface.translate(metrics.card_width, metrics.card_height);
            surface.rotate(std::f32::consts::PI);
        }
        draw_ability_panel(surface, &layout, style);
        surface.restore();
    }
    Some(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FixedAdvance;
    use crate::scene::Scene;

    fn style() -> AbilityStyle {
        AbilityStyle {
            header_font: FontSpec::new("Roboto", "700", 28.0),
            body_font: FontSpec::new("Roboto", "400", 20.0),
            corner_font: FontSpec::new("Roboto", "700", 72.0),
            icon_scale: 1.0,
            alignment: AbilityAlignment::Center,
            placement: AbilityPlacement::Bottom,
            width_percent: 120.0,
            height_mode: HeightMode::Auto,
            fixed_height: 180.0,
            overflow: OverflowMode::Shrink,
            mirror: false,
            background: Color::WHITE.with_alpha(0.0),
            text_color: Color::BLACK,
            tints: SuitTints::default(),
        }
    }

    #[test]
    fn test_blank_markdown_draws_nothing() {
        let metrics = CardMetrics::default();
        let mut scene = Scene::new(metrics.card_width, metrics.card_height);
        let drawn = render_ability_text(
            &mut scene,
            "  \n ",
            "5",
            Suit::Hearts,
            &metrics,
            &style(),
            &FixedAdvance::default(),
        );
        assert!(drawn.is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_auto_height_bottom_placement() {
        let metrics = CardMetrics::default();
        let s = style();
        let measurer = FixedAdvance::default();
        let layout = layout_ability_panel("Hello", "5", Suit::Hearts, &metrics, &s, &measurer)
            .expect("layout");
        let g = layout.geometry;
        assert!((g.h - (20.0 * 1.3 + 28.0)).abs() < 1e-3);
        assert!((g.y - (1125.0 - 80.0 - 72.0 * 0.6 - g.h)).abs() < 1e-3);
        assert!((g.scale - 1.0).abs() < f32::EPSILON);

        let corner = 80.0 + (72.0 * 0.9_f32).max(36.0) + 72.0 * 0.8;
        let base = 825.0 - 2.0 * corner;
        assert!((g.w - base * 1.2).abs() < 1e-3);
        assert!((g.x - (corner + (base - g.w) / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_fixed_shrink_fits_box() {
        let metrics = CardMetrics::default();
        let mut s = style();
        s.height_mode = HeightMode::Fixed;
        s.fixed_height = 60.0;
        let md = "# Title\n\nOne two three four five six seven eight nine ten eleven twelve.";
        let measurer = FixedAdvance::default();
        let layout = layout_ability_panel(md, "5", Suit::Hearts, &metrics, &s, &measurer)
            .expect("layout");
        assert!(layout.natural_height > 60.0);
        assert!((layout.geometry.h - 60.0).abs() < 1e-4);
        assert!(layout.geometry.scale < 1.0);
        assert!(!layout.clip);
    }

    #[test]
    fn test_fixed_hidden_clips_and_overflow_does_not() {
        let metrics = CardMetrics::default();
        let mut s = style();
        s.height_mode = HeightMode::Fixed;
        s.fixed_height = 40.0;
        s.overflow = OverflowMode::Hidden;
        let md = "a\n\nb\n\nc";
        let measurer = FixedAdvance::default();
        let hidden = layout_ability_panel(md, "5", Suit::Hearts, &metrics, &s, &measurer)
            .expect("layout");
        assert!(hidden.clip);
        assert!((hidden.geometry.scale - 1.0).abs() < f32::EPSILON);

        s.overflow = OverflowMode::Overflow;
        let overflow = layout_ability_panel(md, "5", Suit::Hearts, &metrics, &s, &measurer)
            .expect("layout");
        assert!(!overflow.clip);
        assert!((overflow.geometry.h - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_background_and_pip_drawn() {
        let metrics = CardMetrics::default();
        let mut s = style();
        s.background = Color::WHITE.with_alpha(0.5);
        let mut scene = Scene::new(metrics.card_width, metrics.card_height);
        render_ability_text(
            &mut scene,
            "Gain ::heart::",
            "5",
            Suit::Spades,
            &metrics,
            &s,
            &FixedAdvance::default(),
        );
        let kinds: Vec<_> = scene
            .elements()
            .map(|e| (e.text().map(str::to_string), e.icon_suit()))
            .collect();
        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[1].0.as_deref(), Some("Gain"));
        assert_eq!(kinds[2].1, Some(Suit::Hearts));
    }

    #[test]
    fn test_mirror_pass_reflects_every_element() {
        let metrics = CardMetrics::default();
        let mut s = style();
        s.mirror = true;
        let mut scene = Scene::new(metrics.card_width, metrics.card_height);
        render_ability_text(
            &mut scene,
            "Draw a card. ::suit::",
            "5",
            Suit::Hearts,
            &metrics,
            &s,
            &FixedAdvance::default(),
        );
        let elements: Vec<_> = scene.elements().collect();
        assert_eq!(elements.len() % 2, 0);
        let half = elements.len() / 2;
        for (p, m) in elements[..half].iter().zip(&elements[half..]) {
            let (a, b) = (p.anchor(), m.anchor());
            assert!((b.x - (825.0 - a.x)).abs() < 1e-2);
            assert!((b.y - (1125.0 - a.y)).abs() < 1e-2);
        }
    }
}
