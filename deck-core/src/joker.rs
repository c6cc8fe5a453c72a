//! Joker faces: a centred, fitted label plus a decorative arrangement of the
//! four suit icons.
//!
//! Each arrangement is a pure function of the label's centre and half
//! extents, so patterns stay clear of the label at any font size.

use std::f32::consts::FRAC_1_SQRT_2;

use serde::{Deserialize, Serialize};

use crate::corner::{Orientation, RankGlyph, VERTICAL_STEP_RATIO};
use crate::geometry::{CardMetrics, Point};
use crate::measure::{FontSpec, TextMeasurer};
use crate::shrink::{shrink_stack_to_height, shrink_to_fit};
use crate::suit::Suit;
use crate::surface::{DrawSurface, SuitTints, TextAlign, TextBaseline, TextStyle};

/// Label used when none is configured.
pub const DEFAULT_JOKER_LABEL: &str = "JOKER";
/// Appended to the label of wild jokers.
pub const WILD_SUFFIX: &str = " (WILD)";
/// Gap between the label and the nearest icon, in icon sizes.
pub const LABEL_GAP_RATIO: f32 = 0.6;
/// Distance between neighbouring icons in a row or column, in icon sizes.
pub const ICON_STEP_RATIO: f32 = 1.25;

/// Named arrangements of the four suit icons around the joker label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JokerSuitStyle {
    /// Four icons on the square's corners around the label.
    CenterSquare,
    /// One icon above, right of, below and left of the label.
    Diamond,
    /// A row of four under the label.
    BelowLabelRow,
    /// Two icons on each side of the label.
    CenterRowSplit,
    /// Two icons above and two below the label.
    CenterColumn,
    /// No icons.
    None,
    /// Four icons on the diagonals of a circle around the label.
    #[default]
    #[serde(other)]
    CenterCircle,
}

/// Joker face configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct JokerStyle {
    /// Label font at its unshrunk size.
    pub font: FontSpec,
    /// Configured label; blank falls back to [`DEFAULT_JOKER_LABEL`].
    pub label: String,
    /// Append [`WILD_SUFFIX`].
    pub wild: bool,
    /// Label direction.
    pub orientation: Orientation,
    /// Icon arrangement.
    pub suit_style: JokerSuitStyle,
    /// Multiplier on the icon size.
    pub icon_scale: f32,
    /// Label fill, outline and shadow.
    pub text_style: TextStyle,
    /// Icon tints per suit.
    pub tints: SuitTints,
}

/// The text drawn on a joker.
#[must_use]
pub fn joker_label(label: &str, wild: bool) -> String {
    let base = match label.trim() {
        "" => DEFAULT_JOKER_LABEL,
        trimmed => trimmed,
    };
    if wild {
        format!("{base}{WILD_SUFFIX}")
    } else {
        base.to_string()
    }
}

/// Label centre and half extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelExtents {
    /// Label centre.
    pub center: Point,
    /// Half the label width.
    pub half_width: f32,
    /// Half the label height.
    pub half_height: f32,
}

/// One decoration icon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconPlacement {
    /// Which suit.
    pub suit: Suit,
    /// Icon centre.
    pub center: Point,
}

fn grid_signs(suit: Suit) -> (f32, f32) {
    let (gx, gy) = suit.grid();
    let sign = |g: u32| if g == 0 { -1.0 } else { 1.0 };
    (sign(gx), sign(gy))
}

/// Icon placements for a pattern, suits in [`Suit::ALL`] order.
#[must_use]
pub fn suit_pattern(
    style: JokerSuitStyle,
    label: &LabelExtents,
    icon_size: f32,
) -> Vec<IconPlacement> {
    let Point { x: cx, y: cy } = label.center;
    let (hw, hh) = (label.half_width, label.half_height);
    let s = icon_size;
    let gap = LABEL_GAP_RATIO * s;
    let step = ICON_STEP_RATIO * s;
    let near_x = hw + gap + s / 2.0;
    let near_y = hh + gap + s / 2.0;

    let at = |i: usize, x: f32, y: f32| IconPlacement {
        suit: Suit::ALL[i],
        center: Point::new(x, y),
    };

    match style {
        JokerSuitStyle::None => Vec::new(),
        JokerSuitStyle::CenterCircle => {
            let r = hw.max(hh) + s;
            Suit::ALL
                .iter()
                .enumerate()
                .map(|(i, suit)| {
                    let (sx, sy) = grid_signs(*suit);
                    at(i, cx + sx * r * FRAC_1_SQRT_2, cy + sy * r * FRAC_1_SQRT_2)
                })
                .collect()
        }
        JokerSuitStyle::CenterSquare => {
            let d = hw.max(hh) + 0.75 * s;
            Suit::ALL
                .iter()
                .enumerate()
                .map(|(i, suit)| {
                    let (sx, sy) = grid_signs(*suit);
                    at(i, cx + sx * d, cy + sy * d)
                })
                .collect()
        }
        JokerSuitStyle::Diamond => vec![
            at(0, cx, cy - near_y),
            at(1, cx + near_x, cy),
            at(2, cx, cy + near_y),
            at(3, cx - near_x, cy),
        ],
        JokerSuitStyle::BelowLabelRow => (0..4)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let offset = (i as f32 - 1.5) * step;
                at(i, cx + offset, cy + near_y)
            })
            .collect(),
        JokerSuitStyle::CenterRowSplit => vec![
            at(0, cx - near_x - step, cy),
            at(1, cx - near_x, cy),
            at(2, cx + near_x, cy),
            at(3, cx + near_x + step, cy),
        ],
        JokerSuitStyle::CenterColumn => vec![
            at(0, cx, cy - near_y - step),
            at(1, cx, cy - near_y),
            at(2, cx, cy + near_y),
            at(3, cx, cy + near_y + step),
        ],
    }
}

/// Resolved joker face.
#[derive(Debug, Clone, PartialEq)]
pub struct JokerLayout {
    /// Full label text.
    pub label: String,
    /// Label font size after shrink.
    pub font_size: f32,
    /// Label runs, centred and middle-anchored.
    pub glyphs: Vec<RankGlyph>,
    /// Label box.
    pub extents: LabelExtents,
    /// Decoration icons.
    pub icons: Vec<IconPlacement>,
    /// Decoration icon edge length.
    pub icon_size: f32,
}

/// Fit the joker label into the safe area and arrange the icons around it.
#[must_use]
pub fn layout_joker(
    metrics: &CardMetrics,
    style: &JokerStyle,
    measurer: &dyn TextMeasurer,
) -> JokerLayout {
    let label = joker_label(&style.label, style.wild);
    let center = metrics.center();
    let count = label.chars().count();

    let (font_size, glyphs, half_width, half_height) = match style.orientation {
        Orientation::Horizontal => {
            let fs = shrink_to_fit(
                style.font.size,
                |s| measurer.measure(&label, &style.font.with_size(s)),
                |_| metrics.safe_width,
            );
            let width = measurer.measure(&label, &style.font.with_size(fs));
            let glyph = RankGlyph {
                text: label.clone(),
                at: center,
            };
            (fs, vec![glyph], width / 2.0, fs / 2.0)
        }
        Orientation::Vertical => {
            let fs = shrink_stack_to_height(
                style.font.size,
                count,
                VERTICAL_STEP_RATIO,
                metrics.safe_height,
            );
            let font = style.font.with_size(fs);
            let step = fs * VERTICAL_STEP_RATIO;
            #[allow(clippy::cast_precision_loss)]
            let total = step * count as f32;
            let top = center.y - total / 2.0;
            let mut widest: f32 = 0.0;
            let glyphs: Vec<RankGlyph> = label
                .chars()
                .enumerate()
                .map(|(i, ch)| {
                    let text = ch.to_string();
                    widest = widest.max(measurer.measure(&text, &font));
                    #[allow(clippy::cast_precision_loss)]
                    let y = top + step * (i as f32 + 0.5);
                    RankGlyph {
                        text,
                        at: Point::new(center.x, y),
                    }
                })
                .collect();
            (fs, glyphs, widest / 2.0, total / 2.0)
        }
    };

    let extents = LabelExtents {
        center,
        half_width,
        half_height,
    };
    let icon_size = style.font.size * 0.9 * style.icon_scale;
    let icons = suit_pattern(style.suit_style, &extents, icon_size);

    JokerLayout {
        label,
        font_size,
        glyphs,
        extents,
        icons,
        icon_size,
    }
}

/// Paint the decoration icons, upright.
pub fn draw_joker_icons(surface: &mut dyn DrawSurface, layout: &JokerLayout, style: &JokerStyle) {
    for icon in &layout.icons {
        surface.draw_icon(icon.suit, icon.center, layout.icon_size, &style.tints.get(icon.suit));
    }
}

/// Paint the label.
pub fn draw_joker_label(surface: &mut dyn DrawSurface, layout: &JokerLayout, style: &JokerStyle) {
    let font = style.font.with_size(layout.font_size);
    for glyph in &layout.glyphs {
        surface.fill_text(
            &glyph.text,
            glyph.at,
            &font,
            &style.text_style,
            TextAlign::Center,
            TextBaseline::Middle,
        );
    }
}
