//! Sequential whole-deck export.
//!
//! Cards render one at a time in deck export order. Cancellation is
//! cooperative and checked only between cards, so a card that has started
//! always finishes.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use deck_core::{CardCompositor, CardSlot, Deck, RenderMode, Settings, TextMeasurer};

use crate::error::{RenderError, RenderResult};
use crate::export::{ExportFormat, SceneExporter};

/// Shared flag for stopping a running export.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an un-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clear a previous request.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Progress after each written card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportProgress {
    /// Cards finished so far.
    pub done: usize,
    /// Cards in this export.
    pub total: usize,
    /// File name of the card just written.
    pub file_name: String,
}

/// Files produced by an export, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Output file names.
    pub files: Vec<String>,
}

/// Renders and encodes every card of a deck.
pub struct DeckExporter<'a> {
    settings: &'a Settings,
    measurer: &'a dyn TextMeasurer,
    exporter: SceneExporter,
    format: ExportFormat,
    cancel: CancelToken,
}

impl<'a> DeckExporter<'a> {
    /// Create a deck exporter writing `format`.
    #[must_use]
    pub fn new(
        settings: &'a Settings,
        measurer: &'a dyn TextMeasurer,
        exporter: SceneExporter,
        format: ExportFormat,
    ) -> Self {
        Self {
            settings,
            measurer,
            exporter,
            format,
            cancel: CancelToken::new(),
        }
    }

    /// A handle that cancels this exporter's runs.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Output file name for a slot.
    #[must_use]
    pub fn file_name(&self, deck: &Deck, slot: &CardSlot) -> String {
        slot.file_name(
            &self.settings.joker_label,
            deck.joker_count(),
            self.format.extension(),
        )
    }

    /// Render and encode one card.
    ///
    /// # Errors
    ///
    /// Returns an error if the card is not in the deck or encoding fails.
    pub fn render_slot(&mut self, deck: &Deck, slot: &CardSlot) -> RenderResult<Vec<u8>> {
        let scene = CardCompositor::new(self.settings, self.measurer)
            .with_mode(RenderMode::Export)
            .compose_slot(deck, slot)?;
        self.exporter.export(&scene, self.format)
    }

    /// Export `slots` in order, handing each encoded card to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Cancelled`] if cancelled between cards, or the
    /// first render or sink error.
    pub fn export_with<S, P>(
        &mut self,
        deck: &Deck,
        slots: &[CardSlot],
        mut sink: S,
        mut progress: P,
    ) -> RenderResult<ExportSummary>
    where
        S: FnMut(&str, &[u8]) -> RenderResult<()>,
        P: FnMut(&ExportProgress),
    {
        let total = slots.len();
        let mut summary = ExportSummary::default();
        tracing::info!("Exporting {total} cards as {:?}", self.format);

        for (done, slot) in slots.iter().enumerate() {
            if self.cancel.is_cancelled() {
                tracing::info!("Export cancelled after {done} of {total} cards");
                return Err(RenderError::Cancelled(done));
            }
            let file_name = self.file_name(deck, slot);
            let bytes = self.render_slot(deck, slot)?;
            sink(&file_name, &bytes)?;
            tracing::debug!("Wrote {file_name} ({} bytes)", bytes.len());

            progress(&ExportProgress {
                done: done + 1,
                total,
                file_name: file_name.clone(),
            });
            summary.files.push(file_name);
        }
        Ok(summary)
    }

    /// Export the whole deck into `out_dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if cancelled, if a card fails to render, or on I/O failure.
    pub fn export_to_dir<P>(
        &mut self,
        deck: &Deck,
        out_dir: &Path,
        progress: P,
    ) -> RenderResult<ExportSummary>
    where
        P: FnMut(&ExportProgress),
    {
        std::fs::create_dir_all(out_dir)?;
        let slots = deck.export_list();
        self.export_with(
            deck,
            &slots,
            |name, bytes| {
                std::fs::write(out_dir.join(name), bytes)?;
                Ok(())
            },
            progress,
        )
    }
}
