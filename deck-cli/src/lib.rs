//! # Saorsa Deck CLI
//!
//! Renders a deck described by settings and deck JSON files into a
//! directory of print files.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p deck-cli -- --settings settings.json --icons suits.png --out cards
//! ```
//!
//! ## A single card, with preview guides:
//!
//! ```bash
//! cargo run -p deck-cli -- --settings settings.json --card Q:hearts --preview --format svg
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `JobConfig` - Validated job: inputs, output directory, format and target
//! - [`run`] - Loads inputs, attaches artwork and writes the requested files

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod job;

pub use job::{run, RunReport};

use std::path::PathBuf;

use clap::Parser;
use deck_core::CardSlot;
use deck_renderer::ExportFormat;

/// Command-line arguments for saorsa-deck.
#[derive(Debug, Clone, Parser)]
#[command(name = "saorsa-deck")]
#[command(about = "Render print-ready playing cards")]
#[command(version)]
pub struct CliArgs {
    /// Settings JSON (camelCase keys); defaults are used when omitted
    #[arg(long, env = "DECK_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Deck JSON with per-card records; built from the settings when omitted
    #[arg(long, env = "DECK_FILE")]
    pub deck: Option<PathBuf>,

    /// Suit icon sheet (2×2 grid: spades, hearts / clubs, diamonds)
    #[arg(long, env = "DECK_ICONS")]
    pub icons: Option<PathBuf>,

    /// Directory of artwork named like `queen_hearts_Q.png`
    #[arg(long, env = "DECK_ASSETS")]
    pub assets: Option<PathBuf>,

    /// Output directory
    #[arg(long, short, env = "DECK_OUT", default_value = "cards")]
    pub out: PathBuf,

    /// Output format: png, jpeg, svg or pdf
    #[arg(long, short, default_value = "png")]
    pub format: String,

    /// Render only this card (`rank:suit`, `rank:suit:copy` or `joker:index`)
    #[arg(long)]
    pub card: Option<String>,

    /// Draw preview guides (single card only)
    #[arg(long, requires = "card")]
    pub preview: bool,

    /// Raster scale factor
    #[arg(long, default_value = "1.0")]
    pub scale: f32,

    /// Print resolution for PDF page size
    #[arg(long, default_value = "300")]
    pub dpi: f32,

    /// Extra font directory (repeatable)
    #[arg(long = "font-dir")]
    pub font_dirs: Vec<PathBuf>,

    /// Skip loading installed system fonts
    #[arg(long)]
    pub no_system_fonts: bool,

    /// Write the deck, with matched artwork attached, to this JSON file
    #[arg(long)]
    pub save_deck: Option<PathBuf>,
}

/// What to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every card in export order.
    Deck,
    /// One card.
    Card(CardSlot),
}

/// A validated render job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Settings file.
    pub settings: Option<PathBuf>,
    /// Deck file.
    pub deck: Option<PathBuf>,
    /// Icon sheet.
    pub icons: Option<PathBuf>,
    /// Artwork directory.
    pub assets: Option<PathBuf>,
    /// Output directory.
    pub out: PathBuf,
    /// Output format.
    pub format: ExportFormat,
    /// Whole deck or one card.
    pub target: Target,
    /// Draw preview guides.
    pub preview: bool,
    /// Raster scale factor.
    pub scale: f32,
    /// PDF resolution.
    pub dpi: f32,
    /// Extra font directories.
    pub font_dirs: Vec<PathBuf>,
    /// Load system fonts.
    pub system_fonts: bool,
    /// Where to save the deck JSON.
    pub save_deck: Option<PathBuf>,
}

impl TryFrom<CliArgs> for JobConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> anyhow::Result<Self> {
        let format: ExportFormat = args.format.parse()?;
        let target = match args.card.as_deref() {
            Some(selector) => Target::Card(selector.parse()?),
            None => Target::Deck,
        };
        if !(args.scale.is_finite() && args.scale > 0.0) {
            anyhow::bail!("Scale must be positive, got {}", args.scale);
        }
        if !(args.dpi.is_finite() && args.dpi > 0.0) {
            anyhow::bail!("DPI must be positive, got {}", args.dpi);
        }

        Ok(Self {
            settings: args.settings,
            deck: args.deck,
            icons: args.icons,
            assets: args.assets,
            out: args.out,
            format,
            target,
            preview: args.preview,
            scale: args.scale,
            dpi: args.dpi,
            font_dirs: args.font_dirs,
            system_fonts: !args.no_system_fonts,
            save_deck: args.save_deck,
        })
    }
}
