//! Corner index layout: the rank glyphs and suit icon in the top-left corner,
//! optionally repeated point-mirrored in the bottom-right.

use serde::{Deserialize, Serialize};

use crate::geometry::{CardMetrics, Point};
use crate::measure::{FontSpec, TextMeasurer};
use crate::shrink::shrink_to_fit;
use crate::suit::Suit;
use crate::surface::{DrawSurface, IconTint, TextAlign, TextBaseline, TextStyle};

/// Inset of the corner origin from the bleed, in font sizes.
pub const CORNER_INSET_RATIO: f32 = 0.3;
/// Icon edge length relative to the corner font size.
pub const CORNER_ICON_RATIO: f32 = 0.9;
/// Line step of vertically stacked rank glyphs, in font sizes.
pub const VERTICAL_STEP_RATIO: f32 = 0.95;
/// Offset between the rank block and the suit block, in font sizes.
pub const BLOCK_GAP_RATIO: f32 = 1.2;

/// How rank and suit are arranged in the corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CornerLayoutMode {
    /// Rank on top, suit icon below.
    #[default]
    RankAboveSuit,
    /// Suit icon on top, rank below.
    SuitAboveRank,
    /// Suit icon to the right of the rank.
    #[serde(other)]
    SideBySide,
}

/// Direction of a rank or label glyph run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// One character per line, top to bottom.
    Vertical,
    /// A single line.
    #[default]
    #[serde(other)]
    Horizontal,
}

/// Designer nudges applied after centering and shrink.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerOffsets {
    /// Rank horizontal nudge.
    pub rank_x: f32,
    /// Rank vertical nudge.
    pub rank_y: f32,
    /// Suit horizontal nudge.
    pub suit_x: f32,
    /// Suit vertical nudge.
    pub suit_y: f32,
}

/// Everything needed to lay out and paint one corner index.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerStyle {
    /// Rank font at its unshrunk size.
    pub font: FontSpec,
    /// Rank/suit arrangement.
    pub layout: CornerLayoutMode,
    /// Rank glyph direction.
    pub orientation: Orientation,
    /// Multiplier on the suit icon size.
    pub icon_scale: f32,
    /// Fine offsets.
    pub offsets: CornerOffsets,
    /// Rank fill, outline and shadow.
    pub text_style: TextStyle,
    /// Suit icon coloring.
    pub tint: IconTint,
}

/// One positioned rank text run.
#[derive(Debug, Clone, PartialEq)]
pub struct RankGlyph {
    /// Text content; a single character in vertical orientation.
    pub text: String,
    /// Anchor point (baseline top).
    pub at: Point,
}

/// Resolved corner placement in card coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerGeometry {
    /// Font size after shrink.
    pub font_size: f32,
    /// Rank runs, top to bottom.
    pub rank: Vec<RankGlyph>,
    /// Horizontal anchor of the rank runs.
    pub rank_align: TextAlign,
    /// Suit icon centre.
    pub icon_center: Point,
    /// Suit icon edge length (the icon footprint).
    pub icon_size: f32,
}

/// Shrink the corner font so a vertical rank fits the safe height.
///
/// Horizontal ranks are never shrunk.
#[must_use]
pub fn corner_font_size(rank: &str, metrics: &CardMetrics, style: &CornerStyle) -> f32 {
    let base = style.font.size;
    if style.orientation != Orientation::Vertical {
        return base;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = rank.chars().count() as f32;
    shrink_to_fit(
        base,
        |s| s * VERTICAL_STEP_RATIO * count,
        |s| metrics.safe_height - 2.0 * (metrics.bleed + s * CORNER_INSET_RATIO),
    )
}

/// Compute the corner placement for `rank`.
#[must_use]
pub fn layout_corner(
    rank: &str,
    metrics: &CardMetrics,
    style: &CornerStyle,
    measurer: &dyn TextMeasurer,
) -> CornerGeometry {
    let fs = corner_font_size(rank, metrics, style);
    let font = style.font.with_size(fs);
    let base = metrics.bleed + fs * CORNER_INSET_RATIO;
    let footprint = fs * CORNER_ICON_RATIO * style.icon_scale;

    let (mut glyphs, rank_align, rank_height) = match style.orientation {
        Orientation::Horizontal => {
            let width = measurer.measure(rank, &font);
            let glyph = RankGlyph {
                text: rank.to_string(),
                at: Point::new(base + (footprint - width) / 2.0, base),
            };
            (vec![glyph], TextAlign::Left, fs * BLOCK_GAP_RATIO)
        }
        Orientation::Vertical => {
            let column = base + footprint / 2.0;
            let glyphs: Vec<RankGlyph> = rank
                .chars()
                .enumerate()
                .map(|(i, ch)| {
                    #[allow(clippy::cast_precision_loss)]
                    let y = base + fs * VERTICAL_STEP_RATIO * i as f32;
                    RankGlyph {
                        text: ch.to_string(),
                        at: Point::new(column, y),
                    }
                })
                .collect();
            #[allow(clippy::cast_precision_loss)]
            let height = fs * (VERTICAL_STEP_RATIO * glyphs.len() as f32 + 0.25);
            (glyphs, TextAlign::Center, height)
        }
    };

    let icon_column = base + footprint / 2.0;
    let mut icon_center = match style.layout {
        CornerLayoutMode::RankAboveSuit => Point::new(icon_column, base + rank_height),
        CornerLayoutMode::SuitAboveRank => {
            for glyph in &mut glyphs {
                glyph.at.y += fs * BLOCK_GAP_RATIO;
            }
            Point::new(icon_column, base)
        }
        CornerLayoutMode::SideBySide => {
            Point::new(base + footprint + fs * 0.2, base + fs * 0.45)
        }
    };

    let offsets = style.offsets;
    for glyph in &mut glyphs {
        glyph.at.x += offsets.rank_x;
        glyph.at.y += offsets.rank_y;
    }
    icon_center.x += offsets.suit_x;
    icon_center.y += offsets.suit_y;

    CornerGeometry {
        font_size: fs,
        rank: glyphs,
        rank_align,
        icon_center,
        icon_size: footprint,
    }
}

/// Paint the corner index, and its point-mirrored copy when `mirror` is set.
pub fn draw_corner(
    surface: &mut dyn DrawSurface,
    rank: &str,
    suit: Suit,
    metrics: &CardMetrics,
    style: &CornerStyle,
    measurer: &dyn TextMeasurer,
    mirror: bool,
) {
    let geometry = layout_corner(rank, metrics, style, measurer);
    let font = style.font.with_size(geometry.font_size);
    let passes = if mirror { 2 } else { 1 };

    for pass in 0..passes {
        surface.save();
        if pass == 1 {
            surface.translate(metrics.card_width, metrics.card_height);
            surface.rotate(std::f32::consts::PI);
        }
        for glyph in &geometry.rank {
            surface.fill_text(
                &glyph.text,
                glyph.at,
                &font,
                &style.text_style,
                geometry.rank_align,
                TextBaseline::Top,
            );
        }
        surface.draw_icon(suit, geometry.icon_center, geometry.icon_size, &style.tint);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::element::Element;
    use crate::measure::FixedAdvance;
    use crate::scene::Scene;

    fn style(layout: CornerLayoutMode, orientation: Orientation) -> CornerStyle {
        CornerStyle {
            font: FontSpec::new("Roboto", "700", 72.0),
            layout,
            orientation,
            icon_scale: 1.0,
            offsets: CornerOffsets::default(),
            text_style: TextStyle::filled(Color::BLACK),
            tint: IconTint::default(),
        }
    }

    #[test]
    fn test_rank_above_suit_horizontal() {
        let metrics = CardMetrics::default();
        let g = layout_corner(
            "10",
            &metrics,
            &style(CornerLayoutMode::RankAboveSuit, Orientation::Horizontal),
            &FixedAdvance::default(),
        );
        let base = 80.0 + 72.0 * 0.3;
        let footprint = 72.0 * 0.9;
        assert!((g.font_size - 72.0).abs() < f32::EPSILON);
        assert_eq!(g.rank.len(), 1);
        assert!((g.rank[0].at.x - (base + (footprint - 72.0) / 2.0)).abs() < 1e-3);
        assert!((g.rank[0].at.y - base).abs() < 1e-3);
        assert!((g.icon_center.x - (base + footprint / 2.0)).abs() < 1e-3);
        assert!((g.icon_center.y - (base + 72.0 * 1.2)).abs() < 1e-3);
        assert!((g.icon_size - footprint).abs() < 1e-3);
    }

    #[test]
    fn test_suit_above_rank_moves_rank_down() {
        let metrics = CardMetrics::default();
        let g = layout_corner(
            "A",
            &metrics,
            &style(CornerLayoutMode::SuitAboveRank, Orientation::Horizontal),
            &FixedAdvance::default(),
        );
        let base = 80.0 + 72.0 * 0.3;
        assert!((g.icon_center.y - base).abs() < 1e-3);
        assert!((g.rank[0].at.y - (base + 72.0 * 1.2)).abs() < 1e-3);
    }

    #[test]
    fn test_side_by_side_icon_position() {
        let metrics = CardMetrics::default();
        let g = layout_corner(
            "A",
            &metrics,
            &style(CornerLayoutMode::SideBySide, Orientation::Horizontal),
            &FixedAdvance::default(),
        );
        let base = 80.0 + 72.0 * 0.3;
        assert!((g.icon_center.x - (base + 72.0 * 0.9 + 72.0 * 0.2)).abs() < 1e-3);
        assert!((g.icon_center.y - (base + 72.0 * 0.45)).abs() < 1e-3);
    }

    #[test]
    fn test_vertical_stack_and_offset() {
        let metrics = CardMetrics::default();
        let g = layout_corner(
            "10",
            &metrics,
            &style(CornerLayoutMode::RankAboveSuit, Orientation::Vertical),
            &FixedAdvance::default(),
        );
        assert_eq!(g.rank.len(), 2);
        assert_eq!(g.rank_align, TextAlign::Center);
        assert!((g.rank[1].at.y - g.rank[0].at.y - 72.0 * 0.95).abs() < 1e-3);
        assert!((g.rank[0].at.x - g.icon_center.x).abs() < 1e-3);
        let expected = g.rank[0].at.y + 72.0 * (0.95 * 2.0 + 0.25);
        assert!((g.icon_center.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_vertical_long_rank_shrinks_but_offsets_do_not() {
        let metrics = CardMetrics::default();
        let mut s = style(CornerLayoutMode::RankAboveSuit, Orientation::Vertical);
        let rank = "ABCDEFGHIJKLMNOP";
        let plain = layout_corner(rank, &metrics, &s, &FixedAdvance::default());
        assert!(plain.font_size < 72.0);

        s.offsets.rank_y = 500.0;
        let nudged = layout_corner(rank, &metrics, &s, &FixedAdvance::default());
        assert!((nudged.font_size - plain.font_size).abs() < f32::EPSILON);
        assert!((nudged.rank[0].at.y - plain.rank[0].at.y - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_horizontal_never_shrinks() {
        let metrics = CardMetrics::default();
        let s = style(CornerLayoutMode::RankAboveSuit, Orientation::Horizontal);
        assert!((corner_font_size("1234567890123", &metrics, &s) - 72.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mirror_draws_point_reflection() {
        let metrics = CardMetrics::default();
        let s = style(CornerLayoutMode::RankAboveSuit, Orientation::Horizontal);
        let mut scene = Scene::new(metrics.card_width, metrics.card_height);
        draw_corner(
            &mut scene,
            "7",
            Suit::Diamonds,
            &metrics,
            &s,
            &FixedAdvance::default(),
            true,
        );
        let elements: Vec<&Element> = scene.elements().collect();
        assert_eq!(elements.len(), 4);
        for (primary, mirrored) in elements[..2].iter().zip(&elements[2..]) {
            let p = primary.anchor();
            let m = mirrored.anchor();
            assert!((m.x - (metrics.card_width - p.x)).abs() < 1e-3);
            assert!((m.y - (metrics.card_height - p.y)).abs() < 1e-3);
            let turn = mirrored.transform.rotation() - primary.transform.rotation();
            assert!((turn.abs() - std::f32::consts::PI).abs() < 1e-5);
        }
    }
}
