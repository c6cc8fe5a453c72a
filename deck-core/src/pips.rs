//! Pip layout: rank token → ordered pip placements in safe-area fractions.
//!
//! Ranks A–10 come from the standard 52-card table. Ranks 11–15 use a
//! hand-authored three-column row table; 16–20 and 21–25 use four and five
//! columns with a growing centre row. Anything above 25 is drawn at full
//! five-column density.

use serde::{Deserialize, Serialize};

use crate::geometry::{CardMetrics, Point};
use crate::suit::Suit;
use crate::surface::{DrawSurface, IconTint};

/// Fractional anchor lines of the pip grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipAnchors {
    /// Left column.
    pub left: f32,
    /// Centre column.
    pub center_x: f32,
    /// Right column.
    pub right: f32,
    /// Top row.
    pub top: f32,
    /// Row between top and centre.
    pub inner_top: f32,
    /// Centre row; pips strictly below it are drawn upside down.
    pub center: f32,
    /// Row between centre and bottom.
    pub inner_bottom: f32,
    /// Bottom row.
    pub bottom: f32,
}

impl PipAnchors {
    /// The five row anchors, top to bottom.
    #[must_use]
    pub fn rows(&self) -> [f32; 5] {
        [
            self.top,
            self.inner_top,
            self.center,
            self.inner_bottom,
            self.bottom,
        ]
    }
}

impl Default for PipAnchors {
    fn default() -> Self {
        Self {
            left: 0.30,
            center_x: 0.5,
            right: 0.70,
            top: 0.16,
            inner_top: 0.33,
            center: 0.5,
            inner_bottom: 0.67,
            bottom: 0.84,
        }
    }
}

/// One pip, in fractions of the safe area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipPlacement {
    /// Horizontal position in `[0, 1]`.
    pub x: f32,
    /// Vertical position in `[0, 1]`.
    pub y: f32,
    /// Draw upside down (bottom half of the card).
    pub rotate180: bool,
}

/// Row counts for ranks 11–15 over three columns, top row first.
const THREE_COLUMN_ROWS: [(u32, [usize; 5]); 5] = [
    (11, [3, 3, 0, 3, 2]),
    (12, [3, 3, 0, 3, 3]),
    (13, [3, 3, 1, 3, 3]),
    (14, [3, 3, 2, 3, 3]),
    (15, [3, 3, 3, 3, 3]),
];

/// Centre-row counts for ranks 16–20 (four columns).
const FOUR_COLUMN_CENTER: [usize; 5] = [0, 1, 2, 3, 4];

/// Centre-row counts for ranks 21–25 (five columns).
const FIVE_COLUMN_CENTER: [usize; 5] = [1, 2, 3, 4, 5];

#[derive(Clone, Copy)]
enum Col {
    L,
    C,
    R,
}

#[derive(Clone, Copy)]
enum Row {
    T,
    IT,
    CN,
    IB,
    B,
}

/// Standard A–10 arrangements, in draw order.
fn standard_table(rank: &str) -> &'static [(Col, Row)] {
    use Col::{C, L, R};
    use Row::{B, CN, IB, IT, T};

    match rank {
        "A" | "1" => &[(C, CN)],
        "2" => &[(C, T), (C, B)],
        "3" => &[(C, T), (C, CN), (C, B)],
        "4" => &[(L, T), (R, T), (L, B), (R, B)],
        "5" => &[(L, T), (R, T), (C, CN), (L, B), (R, B)],
        "6" => &[(L, T), (R, T), (L, CN), (R, CN), (L, B), (R, B)],
        "7" => &[(C, IT), (L, T), (R, T), (L, CN), (R, CN), (L, B), (R, B)],
        "8" => &[
            (L, IT),
            (R, IT),
            (L, T),
            (R, T),
            (L, IB),
            (R, IB),
            (L, B),
            (R, B),
        ],
        "9" => &[
            (C, CN),
            (L, IT),
            (R, IT),
            (L, T),
            (R, T),
            (L, IB),
            (R, IB),
            (L, B),
            (R, B),
        ],
        "10" => &[
            (C, IT),
            (C, IB),
            (L, IT),
            (R, IT),
            (L, T),
            (R, T),
            (L, IB),
            (R, IB),
            (L, B),
            (R, B),
        ],
        _ => &[],
    }
}

/// Compute the pip placements for a rank token.
///
/// Face cards, joker labels and anything else outside the tables yield an
/// empty list.
#[must_use]
pub fn pip_layout(rank: &str, anchors: &PipAnchors) -> Vec<PipPlacement> {
    let rank = rank.trim();
    let standard = standard_table(rank);
    if !standard.is_empty() {
        return standard
            .iter()
            .map(|&(col, row)| {
                let x = match col {
                    Col::L => anchors.left,
                    Col::C => anchors.center_x,
                    Col::R => anchors.right,
                };
                let y = match row {
                    Row::T => anchors.top,
                    Row::IT => anchors.inner_top,
                    Row::CN => anchors.center,
                    Row::IB => anchors.inner_bottom,
                    Row::B => anchors.bottom,
                };
                placement(x, y, anchors)
            })
            .collect();
    }

    match extended_row_counts(rank) {
        Some((counts, columns)) => {
            place_counts(&counts, &column_positions(columns, anchors), anchors)
        }
        None => Vec::new(),
    }
}

/// Row counts and column count for an extended rank (11+).
///
/// The count comes from the token's leading digits, so `11b` lays out like
/// `11`. Returns `None` when there are no leading digits or the count is
/// 10 or less.
#[must_use]
pub fn extended_row_counts(rank: &str) -> Option<([usize; 5], usize)> {
    let token = rank.trim();
    let end = token.find(|c: char| !c.is_ascii_digit()).unwrap_or(token.len());
    let digits = &token[..end];
    if digits.is_empty() {
        return None;
    }
    // All digits, so parsing only fails on overflow.
    let n: u32 = digits.parse().unwrap_or(u32::MAX);
    match n {
        11..=15 => THREE_COLUMN_ROWS
            .iter()
            .find(|(r, _)| *r == n)
            .map(|(_, rows)| (*rows, 3)),
        16..=20 => {
            let center = FOUR_COLUMN_CENTER[(n - 16) as usize];
            Some((full_rows_with_center(4, center), 4))
        }
        21..=25 => {
            let center = FIVE_COLUMN_CENTER[(n - 21) as usize];
            Some((full_rows_with_center(5, center), 5))
        }
        26.. => Some((full_rows_with_center(5, 5), 5)),
        _ => None,
    }
}

fn full_rows_with_center(full: usize, center: usize) -> [usize; 5] {
    [full, full, center, full, full]
}

/// Column x positions for `count` columns.
#[must_use]
pub fn column_positions(count: usize, anchors: &PipAnchors) -> Vec<f32> {
    let (l, c, r) = (anchors.left, anchors.center_x, anchors.right);
    match count {
        0 => Vec::new(),
        1 => vec![c],
        3 => vec![l, c, r],
        4 => vec![l, (l + c) / 2.0, (c + r) / 2.0, r],
        5 => vec![l, (l + c) / 2.0, c, (c + r) / 2.0, r],
        n => {
            #[allow(clippy::cast_precision_loss)]
            let step = (r - l) / (n - 1) as f32;
            #[allow(clippy::cast_precision_loss)]
            (0..n).map(|i| l + step * i as f32).collect()
        }
    }
}

fn place_counts(
    row_counts: &[usize; 5],
    columns: &[f32],
    anchors: &PipAnchors,
) -> Vec<PipPlacement> {
    let ncols = columns.len();
    let mut out = Vec::with_capacity(row_counts.iter().sum());
    for (&count, y) in row_counts.iter().zip(anchors.rows()) {
        let count = count.min(ncols);
        let start = (ncols - count) / 2;
        for &x in &columns[start..start + count] {
            out.push(placement(x, y, anchors));
        }
    }
    out
}

fn placement(x: f32, y: f32, anchors: &PipAnchors) -> PipPlacement {
    PipPlacement {
        x,
        y,
        rotate180: y > anchors.center,
    }
}

/// Pip edge length for a corner font size and icon scale.
#[must_use]
pub fn pip_size(font_size: f32, icon_scale: f32) -> f32 {
    font_size * 1.4 * icon_scale
}

/// Draw the centre pips for `rank` in `suit`.
///
/// Pips in the bottom half are drawn rotated 180° about their own centre.
/// Returns the number of pips drawn.
pub fn draw_pips(
    surface: &mut dyn DrawSurface,
    rank: &str,
    suit: Suit,
    metrics: &CardMetrics,
    anchors: &PipAnchors,
    size: f32,
    tint: &IconTint,
) -> usize {
    let layout = pip_layout(rank, anchors);
    if layout.is_empty() {
        tracing::trace!("No pips for rank {rank:?}");
        return 0;
    }
    for pip in &layout {
        let center = metrics.safe_point(pip.x, pip.y);
        if pip.rotate180 {
            surface.save();
            surface.translate(center.x, center.y);
            surface.rotate(std::f32::consts::PI);
            surface.draw_icon(suit, Point::default(), size, tint);
            surface.restore();
        } else {
            surface.draw_icon(suit, center, size, tint);
        }
    }
    layout.len()
}
