//! Greedy line wrapping and block layout.

use serde::{Deserialize, Serialize};

use super::markdown::Block;
use super::segment::{measure_segments, split_inline, TextSegment};
use crate::measure::{FontSpec, TextMeasurer};
use crate::suit::Suit;

/// Line height relative to the block font size.
pub const LINE_HEIGHT_RATIO: f32 = 1.3;

/// One wrapped line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineLayout {
    /// Segments left to right.
    pub segments: Vec<TextSegment>,
    /// Sum of segment widths.
    pub width: f32,
}

impl LineLayout {
    fn push(&mut self, segment: TextSegment) {
        self.width += segment.width;
        self.segments.push(segment);
    }

    fn trim_trailing_spaces(&mut self) {
        while self.segments.last().is_some_and(TextSegment::is_space) {
            if let Some(space) = self.segments.pop() {
                self.width -= space.width;
            }
        }
    }

    /// Concatenated text, pips omitted.
    #[must_use]
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|s| s.text.as_deref())
            .collect()
    }
}

/// Wrap segments greedily into lines no wider than `max_width`.
///
/// A line only exceeds `max_width` when it holds a single segment that is
/// wider on its own. Lines never start or end with whitespace.
#[must_use]
pub fn wrap_segments(segments: &[TextSegment], max_width: f32) -> Vec<LineLayout> {
    let mut lines = Vec::new();
    let mut line = LineLayout::default();

    let mut finish = |line: &mut LineLayout| {
        line.trim_trailing_spaces();
        if !line.segments.is_empty() {
            lines.push(std::mem::take(line));
        }
    };

    for segment in segments {
        let overflows = line.width + segment.width > max_width;
        if segment.is_space() {
            if line.segments.is_empty() {
                continue;
            }
            if overflows {
                finish(&mut line);
                continue;
            }
        } else if overflows && !line.segments.is_empty() {
            finish(&mut line);
        }
        line.push(segment.clone());
    }
    finish(&mut line);
    lines
}

/// A wrapped block with its font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockLayout {
    /// Wrapped lines.
    pub lines: Vec<LineLayout>,
    /// Distance between line tops.
    pub line_height: f32,
    /// Font the block is set in.
    pub font: FontSpec,
    /// Set in the header font.
    pub is_heading: bool,
}

impl BlockLayout {
    /// Total height of the block's lines.
    #[must_use]
    pub fn height(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let lines = self.lines.len() as f32;
        lines * self.line_height
    }
}

/// Segment and wrap every block, choosing header or body font per block.
#[must_use]
pub fn layout_blocks(
    blocks: &[Block],
    header_font: &FontSpec,
    body_font: &FontSpec,
    max_width: f32,
    pip_size: f32,
    own_suit: Suit,
    measurer: &dyn TextMeasurer,
) -> Vec<BlockLayout> {
    blocks
        .iter()
        .map(|block| {
            let font = if block.is_heading() {
                header_font
            } else {
                body_font
            };
            let pieces = split_inline(&block.text);
            let segments = measure_segments(&pieces, font, pip_size, own_suit, measurer);
            BlockLayout {
                lines: wrap_segments(&segments, max_width),
                line_height: font.size * LINE_HEIGHT_RATIO,
                font: font.clone(),
                is_heading: block.is_heading(),
            }
        })
        .collect()
}

/// Natural panel height: block heights, spacing between blocks and padding.
#[must_use]
pub fn panel_height(layouts: &[BlockLayout], padding: f32, block_spacing: f32) -> f32 {
    let content: f32 = layouts.iter().map(BlockLayout::height).sum();
    #[allow(clippy::cast_precision_loss)]
    let gaps = layouts.len().saturating_sub(1) as f32 * block_spacing;
    content + gaps + padding * 2.0
}
