//! The four suits and their icon-sheet addressing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CardError;

/// A card suit.
///
/// Each suit owns one quadrant of the 2×2 icon sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// ♠, top-left quadrant.
    Spades,
    /// ♥, top-right quadrant.
    Hearts,
    /// ♣, bottom-left quadrant.
    Clubs,
    /// ♦, bottom-right quadrant.
    Diamonds,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Clubs, Self::Diamonds];

    /// Stable lowercase id (`"spades"`, ...).
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Spades => "spades",
            Self::Hearts => "hearts",
            Self::Clubs => "clubs",
            Self::Diamonds => "diamonds",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Spades => "Spades",
            Self::Hearts => "Hearts",
            Self::Clubs => "Clubs",
            Self::Diamonds => "Diamonds",
        }
    }

    /// Single-letter symbol used in export file names.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Spades => 'S',
            Self::Hearts => 'H',
            Self::Clubs => 'C',
            Self::Diamonds => 'D',
        }
    }

    /// Unicode suit glyph.
    #[must_use]
    pub fn display(self) -> char {
        match self {
            Self::Spades => '♠',
            Self::Hearts => '♥',
            Self::Clubs => '♣',
            Self::Diamonds => '♦',
        }
    }

    /// `(grid_x, grid_y)` quadrant in the icon sheet.
    #[must_use]
    pub fn grid(self) -> (u32, u32) {
        match self {
            Self::Spades => (0, 0),
            Self::Hearts => (1, 0),
            Self::Clubs => (0, 1),
            Self::Diamonds => (1, 1),
        }
    }

    /// Position in [`Suit::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Spades => 0,
            Self::Hearts => 1,
            Self::Clubs => 2,
            Self::Diamonds => 3,
        }
    }

    /// Hearts and diamonds are red.
    #[must_use]
    pub fn is_red(self) -> bool {
        matches!(self, Self::Hearts | Self::Diamonds)
    }

    /// Look up a suit by id, case-insensitively.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.id().eq_ignore_ascii_case(id.trim()))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Suit {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| CardError::UnknownSuit(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_quadrants_are_distinct() {
        let mut grids: Vec<_> = Suit::ALL.iter().map(|s| s.grid()).collect();
        grids.sort_unstable();
        grids.dedup();
        assert_eq!(grids.len(), 4);
    }

    #[test]
    fn test_parse_suit() {
        assert_eq!("Hearts".parse::<Suit>().expect("suit"), Suit::Hearts);
        assert!("stars".parse::<Suit>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Suit::Diamonds).expect("serialize");
        assert_eq!(json, "\"diamonds\"");
    }
}
