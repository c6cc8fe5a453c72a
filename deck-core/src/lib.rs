//! # Deck Core
//!
//! Layout engine for print-ready playing cards. Decides where every mark on
//! a card face goes and records it as a [`Scene`] for a renderer to rasterize.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  deck-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Compositor      │  Settings / Deck         │
//! │  - Layer order   │  - Editor defaults       │
//! │  - Joker path    │  - Ranks, copies, jokers │
//! │  - Guides        │  - Export naming         │
//! ├─────────────────────────────────────────────┤
//! │  Pips  │  Corner index  │  Ability text     │
//! │  - Pattern tables       │  - Markdown blocks│
//! │  - Shrink to fit        │  - Greedy wrap    │
//! ├─────────────────────────────────────────────┤
//! │  DrawSurface → Scene (display list)         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Text measurement is injected through [`TextMeasurer`]; nothing here
//! touches fonts, pixels or the filesystem.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ability;
pub mod card;
pub mod color;
pub mod compositor;
pub mod corner;
pub mod deck;
pub mod element;
pub mod error;
pub mod geometry;
pub mod guides;
pub mod joker;
pub mod measure;
pub mod pips;
pub mod scene;
pub mod settings;
pub mod shrink;
pub mod suit;
pub mod surface;

pub use ability::{
    render_ability_text, AbilityAlignment, AbilityLayout, AbilityPlacement, AbilityStyle,
    HeightMode, OverflowMode, PanelGeometry,
};
pub use card::{scale_to_safe_height, CardRecord, ImageRef};
pub use color::Color;
pub use compositor::{CardCompositor, RenderMode};
pub use corner::{draw_corner, layout_corner, CornerLayoutMode, CornerStyle, Orientation};
pub use deck::{
    match_asset_name, parse_rank_list, AssetMatch, CardSlot, Deck, BASE_RANKS, MAX_JOKERS,
};
pub use element::{Clip, Element, ElementKind};
pub use error::{CardError, CardResult};
pub use geometry::{Affine, CardMetrics, Point, Rect};
pub use joker::{layout_joker, JokerLayout, JokerStyle, JokerSuitStyle};
pub use measure::{FixedAdvance, FontSpec, TextMeasurer};
pub use pips::{draw_pips, pip_layout, PipAnchors, PipPlacement};
pub use scene::Scene;
pub use settings::Settings;
pub use suit::Suit;
pub use surface::{
    DrawSurface, IconTint, Layer, Paint, Shadow, Stroke, SuitTints, TextAlign, TextBaseline,
    TextStyle,
};

/// Deck core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
