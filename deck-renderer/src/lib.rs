//! # Deck Renderer
//!
//! Turns card scenes recorded by `deck-core` into print files.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐    ┌──────────────┐    ┌────────────────────┐
//! │  Scene   │ ─▶ │ SVG document │ ─▶ │ resvg / tiny-skia  │ ─▶ PNG / JPEG / PDF
//! └──────────┘    └──────────────┘    └────────────────────┘
//!                   ▲          ▲
//!            IconTinter    ImageStore
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod error;
pub mod export;
pub mod icon;
pub mod image;
pub mod measure;

pub use batch::{CancelToken, DeckExporter, ExportProgress, ExportSummary};
pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat, SceneExporter};
pub use icon::{IconSheet, IconTinter};
pub use crate::image::{ImageStore, RasterImage};
pub use measure::{FontMeasurer, HeuristicMeasurer};

/// Renderer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
