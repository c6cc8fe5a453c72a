//! Inline pip tokens and measured text segments.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::measure::{FontSpec, TextMeasurer};
use crate::suit::Suit;

static PIP_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)::(suit|spades?|hearts?|clubs?|diamonds?)::")
        .expect("pip token pattern is valid")
});

/// Suit reference carried by an inline pip token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipSuit {
    /// `::suit::`: the card's own suit.
    Own,
    /// An explicit suit.
    Suit(Suit),
}

impl PipSuit {
    /// Resolve against the card's suit.
    #[must_use]
    pub fn resolve(self, own: Suit) -> Suit {
        match self {
            Self::Own => own,
            Self::Suit(suit) => suit,
        }
    }

    fn from_token(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        let singular = name.trim_end_matches('s');
        match singular {
            "spade" => Self::Suit(Suit::Spades),
            "heart" => Self::Suit(Suit::Hearts),
            "club" => Self::Suit(Suit::Clubs),
            "diamond" => Self::Suit(Suit::Diamonds),
            _ => Self::Own,
        }
    }
}

/// A run of inline content before measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlinePiece {
    /// Plain text, whitespace included.
    Text(String),
    /// An inline suit icon.
    Pip(PipSuit),
}

/// Split text into plain runs and pip tokens, in order.
#[must_use]
pub fn split_inline(text: &str) -> Vec<InlinePiece> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for caps in PIP_TOKEN.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            pieces.push(InlinePiece::Text(text[last..whole.start()].to_string()));
        }
        pieces.push(InlinePiece::Pip(PipSuit::from_token(name.as_str())));
        last = whole.end();
    }
    if last < text.len() {
        pieces.push(InlinePiece::Text(text[last..].to_string()));
    }
    pieces
}

/// Segment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// A word.
    Text,
    /// A whitespace run.
    Space,
    /// An inline suit icon; atomic.
    Pip,
}

/// A measured, unbreakable unit of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSegment {
    /// Category.
    pub kind: SegmentKind,
    /// Advance width in pixels.
    pub width: f32,
    /// Text for words and spaces.
    pub text: Option<String>,
    /// Resolved suit for pips.
    pub suit: Option<Suit>,
}

impl TextSegment {
    /// Whether this segment is a whitespace run.
    #[must_use]
    pub fn is_space(&self) -> bool {
        self.kind == SegmentKind::Space
    }
}

/// Turn inline pieces into measured segments.
///
/// Words are split on whitespace runs; every whitespace run advances by the
/// width of a single space. Pips take `pip_size` and resolve `::suit::`
/// against `own_suit`.
#[must_use]
pub fn measure_segments(
    pieces: &[InlinePiece],
    font: &FontSpec,
    pip_size: f32,
    own_suit: Suit,
    measurer: &dyn TextMeasurer,
) -> Vec<TextSegment> {
    let space_width = measurer.measure(" ", font);
    let mut out = Vec::new();

    for piece in pieces {
        match piece {
            InlinePiece::Pip(pip) => out.push(TextSegment {
                kind: SegmentKind::Pip,
                width: pip_size,
                text: None,
                suit: Some(pip.resolve(own_suit)),
            }),
            InlinePiece::Text(text) => {
                for (is_space, run) in whitespace_runs(text) {
                    let (kind, width) = if is_space {
                        (SegmentKind::Space, space_width)
                    } else {
                        (SegmentKind::Text, measurer.measure(run, font))
                    };
                    out.push(TextSegment {
                        kind,
                        width,
                        text: Some(run.to_string()),
                        suit: None,
                    });
                }
            }
        }
    }
    out
}

/// Alternating word and whitespace runs, tagged with whether each is whitespace.
fn whitespace_runs(text: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        match current {
            Some(prev) if prev != ws => {
                runs.push((prev, &text[start..i]));
                start = i;
            }
            _ => {}
        }
        current = Some(ws);
    }
    if let Some(ws) = current {
        runs.push((ws, &text[start..]));
    }
    runs
}
