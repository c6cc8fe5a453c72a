//! Deck model: active ranks, per-card records, jokers and the export order.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card::CardRecord;
use crate::joker::DEFAULT_JOKER_LABEL;
use crate::settings::Settings;
use crate::suit::Suit;
use crate::{CardError, CardResult};

/// The standard thirteen ranks.
pub const BASE_RANKS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// Upper bound on jokers in a deck.
pub const MAX_JOKERS: usize = 8;

/// Parse a comma-separated rank list.
///
/// Entries are trimmed and empty entries dropped; a blank list yields
/// [`BASE_RANKS`]. Repeated ranks are kept and become numbered copies.
#[must_use]
pub fn parse_rank_list(raw: &str) -> Vec<String> {
    let ranks: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();
    if ranks.is_empty() {
        BASE_RANKS.iter().map(|r| (*r).to_string()).collect()
    } else {
        ranks
    }
}

/// One renderable card in export order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CardSlot {
    /// A suited card.
    Standard {
        /// Suit.
        suit: Suit,
        /// Rank token.
        rank: String,
        /// 1-based copy number for repeated ranks.
        copy: usize,
    },
    /// A joker.
    Joker {
        /// 1-based joker number.
        index: usize,
    },
}

impl CardSlot {
    /// A first-copy suited card.
    #[must_use]
    pub fn standard(suit: Suit, rank: impl Into<String>) -> Self {
        Self::Standard {
            suit,
            rank: rank.into(),
            copy: 1,
        }
    }

    /// Export file stem (without extension).
    ///
    /// Suited cards are `{rank}{symbol}`, with `_{copy}` for later copies.
    /// Jokers use the label with whitespace removed, suffixed `_{index}` when
    /// the deck has more than one. Path separators, characters reserved on
    /// Windows and leading dots become `_`, so a stem never leaves the
    /// output directory.
    #[must_use]
    pub fn file_stem(&self, joker_label: &str, joker_total: usize) -> String {
        let stem = match self {
            Self::Standard { suit, rank, copy } => {
                if *copy > 1 {
                    format!("{rank}{}_{copy}", suit.symbol())
                } else {
                    format!("{rank}{}", suit.symbol())
                }
            }
            Self::Joker { index } => {
                let label = match joker_label.trim() {
                    "" => DEFAULT_JOKER_LABEL,
                    l => l,
                };
                let base: String = label.chars().filter(|c| !c.is_whitespace()).collect();
                if joker_total > 1 {
                    format!("{base}_{index}")
                } else {
                    base
                }
            }
        };
        sanitize_file_stem(&stem)
    }

    /// Export file name with the given extension.
    #[must_use]
    pub fn file_name(&self, joker_label: &str, joker_total: usize, extension: &str) -> String {
        format!("{}.{extension}", self.file_stem(joker_label, joker_total))
    }
}

fn sanitize_file_stem(stem: &str) -> String {
    let mut leading = true;
    stem.chars()
        .map(|c| {
            let dot = leading && c == '.';
            leading = dot;
            let reserved = matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
            if dot || reserved || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

impl fmt::Display for CardSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard { suit, rank, copy } if *copy > 1 => write!(f, "{rank}:{suit}:{copy}"),
            Self::Standard { suit, rank, .. } => write!(f, "{rank}:{suit}"),
            Self::Joker { index } => write!(f, "joker:{index}"),
        }
    }
}

/// Parses `rank:suit`, `rank:suit:copy` or `joker:index`.
impl FromStr for CardSlot {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CardError::InvalidSelector(s.to_string());
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let number = |p: &str| p.parse::<usize>().ok().filter(|n| *n >= 1);

        match parts.as_slice() {
            [kind, index] if kind.eq_ignore_ascii_case("joker") => Ok(Self::Joker {
                index: number(index).ok_or_else(invalid)?,
            }),
            [rank, suit] if !rank.is_empty() => Ok(Self::standard(suit.parse::<Suit>()?, *rank)),
            [rank, suit, copy] if !rank.is_empty() => Ok(Self::Standard {
                suit: suit.parse()?,
                rank: (*rank).to_string(),
                copy: number(copy).ok_or_else(invalid)?,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Suit and rank guessed from an artwork file name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetMatch {
    /// Suit id found among the name's words.
    pub suit: Option<Suit>,
    /// Active rank found among the name's words.
    pub rank: Option<String>,
}

/// Match a file name like `queen_hearts_Q.png` against the active ranks.
///
/// The name is lowercased, its extension dropped and split on
/// non-alphanumeric characters; the first word naming a suit and the first
/// word naming an active rank win.
#[must_use]
pub fn match_asset_name(name: &str, ranks: &[String]) -> AssetMatch {
    let lower = name.to_lowercase();
    let stem = match lower.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            stem
        }
        _ => lower.as_str(),
    };
    let words: Vec<&str> = stem
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    AssetMatch {
        suit: words.iter().find_map(|w| {
            Suit::ALL.into_iter().find(|s| s.id() == *w)
        }),
        rank: words.iter().find_map(|w| {
            let upper = w.to_uppercase();
            ranks.iter().find(|r| **r == upper).cloned()
        }),
    }
}

/// All card records of a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Deck {
    ranks: Vec<String>,
    cards: BTreeMap<Suit, BTreeMap<String, Vec<CardRecord>>>,
    jokers: Vec<CardRecord>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(parse_rank_list(""), 0)
    }
}

impl Deck {
    /// Create a deck with blank records for every suit × rank and `jokers` jokers.
    #[must_use]
    pub fn new(ranks: Vec<String>, jokers: usize) -> Self {
        let mut deck = Self {
            ranks: Vec::new(),
            cards: BTreeMap::new(),
            jokers: Vec::new(),
        };
        deck.set_ranks(ranks);
        deck.set_joker_count(jokers);
        deck
    }

    /// Create a deck sized by the settings' rank list and joker options.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.active_ranks(), settings.joker_count())
    }

    /// Replace the active rank list.
    ///
    /// Existing records are kept; each rank gets exactly as many copies as
    /// it appears in `ranks`. Records of ranks no longer listed are retained
    /// so switching back restores them.
    pub fn set_ranks(&mut self, ranks: Vec<String>) {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for rank in &ranks {
            *counts.entry(rank.as_str()).or_default() += 1;
        }
        for suit in Suit::ALL {
            let by_rank = self.cards.entry(suit).or_default();
            for (rank, &count) in &counts {
                let copies = by_rank.entry((*rank).to_string()).or_default();
                copies.resize_with(count, CardRecord::default);
            }
        }
        tracing::debug!("Deck ranks set to {} entries", ranks.len());
        self.ranks = ranks;
    }

    /// Resize the joker list, keeping existing jokers.
    pub fn set_joker_count(&mut self, count: usize) {
        self.jokers.resize_with(count.min(MAX_JOKERS), CardRecord::default);
    }

    /// Active ranks in order, repeats included.
    #[must_use]
    pub fn ranks(&self) -> &[String] {
        &self.ranks
    }

    /// Number of jokers.
    #[must_use]
    pub fn joker_count(&self) -> usize {
        self.jokers.len()
    }

    /// A suited card record (`copy` is 1-based).
    #[must_use]
    pub fn card(&self, suit: Suit, rank: &str, copy: usize) -> Option<&CardRecord> {
        self.cards.get(&suit)?.get(rank)?.get(copy.checked_sub(1)?)
    }

    /// Mutable suited card record.
    pub fn card_mut(&mut self, suit: Suit, rank: &str, copy: usize) -> Option<&mut CardRecord> {
        self.cards.get_mut(&suit)?.get_mut(rank)?.get_mut(copy.checked_sub(1)?)
    }

    /// A joker record (`index` is 1-based).
    #[must_use]
    pub fn joker(&self, index: usize) -> Option<&CardRecord> {
        self.jokers.get(index.checked_sub(1)?)
    }

    /// Mutable joker record.
    pub fn joker_mut(&mut self, index: usize) -> Option<&mut CardRecord> {
        self.jokers.get_mut(index.checked_sub(1)?)
    }

    /// The record behind a slot.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::CardNotFound`] if the deck has no such card.
    pub fn record(&self, slot: &CardSlot) -> CardResult<&CardRecord> {
        let found = match slot {
            CardSlot::Standard { suit, rank, copy } => self.card(*suit, rank, *copy),
            CardSlot::Joker { index } => self.joker(*index),
        };
        found.ok_or_else(|| CardError::CardNotFound(slot.to_string()))
    }

    /// Mutable record behind a slot.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::CardNotFound`] if the deck has no such card.
    pub fn record_mut(&mut self, slot: &CardSlot) -> CardResult<&mut CardRecord> {
        let name = slot.to_string();
        let found = match slot {
            CardSlot::Standard { suit, rank, copy } => self.card_mut(*suit, rank, *copy),
            CardSlot::Joker { index } => self.joker_mut(*index),
        };
        found.ok_or(CardError::CardNotFound(name))
    }

    /// Every card in export order: each suit through the active ranks, then
    /// the jokers.
    #[must_use]
    pub fn export_list(&self) -> Vec<CardSlot> {
        let mut slots = Vec::with_capacity(self.ranks.len() * 4 + self.jokers.len());
        for suit in Suit::ALL {
            let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
            for rank in &self.ranks {
                let copy = seen.entry(rank.as_str()).or_default();
                *copy += 1;
                slots.push(CardSlot::Standard {
                    suit,
                    rank: rank.clone(),
                    copy: *copy,
                });
            }
        }
        slots.extend((1..=self.jokers.len()).map(|index| CardSlot::Joker { index }));
        slots
    }

    /// Load a deck from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> CardResult<Self> {
        serde_json::from_str(json).map_err(CardError::Serialization)
    }

    /// Serialize the deck to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self).map_err(CardError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rank_list() {
        assert_eq!(parse_rank_list("").len(), 13);
        assert_eq!(parse_rank_list(" , ,"), parse_rank_list(""));
        assert_eq!(parse_rank_list(" 1, 2 ,11,,12 "), vec!["1", "2", "11", "12"]);
    }

    #[test]
    fn test_duplicate_ranks_become_copies() {
        let deck = Deck::new(parse_rank_list("A,5,5"), 0);
        assert!(deck.card(Suit::Hearts, "5", 2).is_some());
        assert!(deck.card(Suit::Hearts, "5", 3).is_none());
        assert!(deck.card(Suit::Hearts, "5", 0).is_none());

        let names: Vec<String> = deck
            .export_list()
            .iter()
            .take(3)
            .map(|s| s.file_name("JOKER", 0, "png"))
            .collect();
        assert_eq!(names, vec!["AS.png", "5S.png", "5S_2.png"]);
    }

    #[test]
    fn test_export_order_and_joker_names() {
        let deck = Deck::new(parse_rank_list("A,2"), 2);
        let slots = deck.export_list();
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[2], CardSlot::standard(Suit::Hearts, "A"));
        assert_eq!(slots[8], CardSlot::Joker { index: 1 });
        assert_eq!(slots[9].file_name("Big Joker", 2, "png"), "BigJoker_2.png");
        assert_eq!(CardSlot::Joker { index: 1 }.file_name(" ", 1, "png"), "JOKER.png");
    }

    #[test]
    fn test_file_stems_cannot_name_paths() {
        let slot = |rank: &str| CardSlot::standard(Suit::Spades, rank);
        assert_eq!(slot("../x").file_stem("", 0), "___xS");
        assert_eq!(slot("1/2").file_stem("", 0), "1_2S");
        assert_eq!(slot("a\\b:c").file_stem("", 0), "a_b_cS");
        assert_eq!(slot("1.5").file_stem("", 0), "1.5S");
        let joker = CardSlot::Joker { index: 1 };
        assert_eq!(joker.file_stem(".hidden", 1), "_hidden");
        assert_eq!(joker.file_stem("Wild?", 2), "Wild__1");
    }

    #[test]
    fn test_joker_count_is_capped() {
        let mut deck = Deck::new(parse_rank_list(""), 12);
        assert_eq!(deck.joker_count(), MAX_JOKERS);
        deck.set_joker_count(1);
        assert!(deck.joker(1).is_some());
        assert!(deck.joker(2).is_none());
    }

    #[test]
    fn test_set_ranks_keeps_existing_records() {
        let mut deck = Deck::new(parse_rank_list("A,2"), 0);
        if let Some(card) = deck.card_mut(Suit::Clubs, "A", 1) {
            card.ability_markdown = "kept".to_string();
        }
        deck.set_ranks(parse_rank_list("A,3"));
        assert_eq!(
            deck.card(Suit::Clubs, "A", 1).map(|c| c.ability_markdown.as_str()),
            Some("kept")
        );
        assert!(deck.card(Suit::Clubs, "3", 1).is_some());
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!(
            "5:hearts".parse::<CardSlot>().expect("slot"),
            CardSlot::standard(Suit::Hearts, "5")
        );
        assert_eq!(
            "5:Hearts:2".parse::<CardSlot>().expect("slot"),
            CardSlot::Standard {
                suit: Suit::Hearts,
                rank: "5".to_string(),
                copy: 2
            }
        );
        assert_eq!("joker:3".parse::<CardSlot>().expect("slot"), CardSlot::Joker { index: 3 });
        assert!(matches!("joker:0".parse::<CardSlot>(), Err(CardError::InvalidSelector(_))));
        assert!(matches!("5:stars".parse::<CardSlot>(), Err(CardError::UnknownSuit(_))));
        assert!(matches!("nonsense".parse::<CardSlot>(), Err(CardError::InvalidSelector(_))));
    }

    #[test]
    fn test_record_lookup_errors() {
        let deck = Deck::default();
        assert!(deck.record(&CardSlot::standard(Suit::Spades, "K")).is_ok());
        assert!(matches!(
            deck.record(&CardSlot::standard(Suit::Spades, "99")),
            Err(CardError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_asset_name_matching() {
        let ranks = parse_rank_list("");
        let m = match_asset_name("Queen_hearts-Q.PNG", &ranks);
        assert_eq!(m.suit, Some(Suit::Hearts));
        assert_eq!(m.rank.as_deref(), Some("Q"));
        assert_eq!(match_asset_name("cover.jpg", &ranks), AssetMatch::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut deck = Deck::new(parse_rank_list("A"), 1);
        if let Some(card) = deck.card_mut(Suit::Diamonds, "A", 1) {
            card.mirror_corners = Some(false);
        }
        let back = Deck::from_json(&deck.to_json().expect("serialize")).expect("parse");
        assert_eq!(back, deck);
    }
}
