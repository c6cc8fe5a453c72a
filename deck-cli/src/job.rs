//! Executes a [`JobConfig`]: load inputs, attach artwork, write files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use deck_core::{match_asset_name, CardCompositor, CardSlot, Deck, RenderMode, Settings};
use deck_renderer::image::ImageFormat;
use deck_renderer::{DeckExporter, ExportConfig, IconSheet, SceneExporter};

use crate::{JobConfig, Target};

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Files written, in order.
    pub files: Vec<PathBuf>,
    /// Artwork files attached from the assets directory.
    pub matched_assets: usize,
}

/// Run a render job.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or parsed, if the
/// selected card is not in the deck, or if rendering or writing fails.
pub fn run(config: &JobConfig) -> anyhow::Result<RunReport> {
    let settings = load_settings(config.settings.as_deref())?;
    let mut deck = load_deck(config.deck.as_deref(), &settings)?;

    let mut exporter = SceneExporter::new(ExportConfig {
        dpi: config.dpi,
        scale: config.scale,
        system_fonts: config.system_fonts,
        font_dirs: config.font_dirs.clone(),
        ..ExportConfig::default()
    });
    if let Some(path) = &config.icons {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading icons {}", path.display()))?;
        exporter.set_icons(Some(IconSheet::from_bytes(&bytes)?));
    } else {
        tracing::warn!("No icon sheet given; suits render as text glyphs");
    }

    let base_dir = config.deck.as_deref().and_then(Path::parent);
    load_deck_images(&deck, &mut exporter, base_dir);

    let mut report = RunReport::default();
    if let Some(dir) = &config.assets {
        report.matched_assets = attach_assets(&mut deck, &mut exporter, dir)?;
    }
    if let Some(path) = &config.save_deck {
        std::fs::write(path, deck.to_json()?)
            .with_context(|| format!("writing deck {}", path.display()))?;
        tracing::info!("Saved deck to {}", path.display());
    }

    std::fs::create_dir_all(&config.out)
        .with_context(|| format!("creating {}", config.out.display()))?;
    let measurer = exporter.text_measurer();

    match &config.target {
        Target::Card(slot) => {
            let mode = if config.preview {
                RenderMode::Preview
            } else {
                RenderMode::Export
            };
            let scene = CardCompositor::new(&settings, &measurer)
                .with_mode(mode)
                .compose_slot(&deck, slot)?;
            let bytes = exporter.export(&scene, config.format)?;
            let path = config.out.join(slot.file_name(
                &settings.joker_label,
                deck.joker_count(),
                config.format.extension(),
            ));
            std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
            report.files.push(path);
        }
        Target::Deck => {
            let mut batch = DeckExporter::new(&settings, &measurer, exporter, config.format);
            let summary = batch.export_to_dir(&deck, &config.out, |p| {
                tracing::info!("[{}/{}] {}", p.done, p.total, p.file_name);
            })?;
            report.files = summary
                .files
                .iter()
                .map(|name| config.out.join(name))
                .collect();
        }
    }
    Ok(report)
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let Some(path) = path else {
        tracing::debug!("Using default settings");
        return Ok(Settings::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings {}", path.display()))?;
    Settings::from_json(&json).with_context(|| format!("parsing settings {}", path.display()))
}

/// Load the deck file, or build one from the settings. A loaded deck is
/// resized to the settings' rank list and joker count, keeping its records.
fn load_deck(path: Option<&Path>, settings: &Settings) -> anyhow::Result<Deck> {
    let Some(path) = path else {
        return Ok(Deck::from_settings(settings));
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading deck {}", path.display()))?;
    let mut deck =
        Deck::from_json(&json).with_context(|| format!("parsing deck {}", path.display()))?;
    deck.set_ranks(settings.active_ranks());
    deck.set_joker_count(settings.joker_count());
    Ok(deck)
}

/// Put every face image the deck refers to into the exporter's store.
///
/// Relative ids resolve against `base_dir`. Images that fail to load are
/// logged and left out; the exporter skips them when drawing.
fn load_deck_images(deck: &Deck, exporter: &mut SceneExporter, base_dir: Option<&Path>) {
    for slot in deck.export_list() {
        let Some(image) = deck.record(&slot).ok().and_then(|r| r.face_image.as_ref()) else {
            continue;
        };
        if exporter.images().contains(&image.id) {
            continue;
        }
        let loaded = if image.id.starts_with("data:") {
            exporter.images_mut().insert_data_uri(image.id.clone(), &image.id)
        } else {
            let path = match base_dir {
                Some(dir) if Path::new(&image.id).is_relative() => dir.join(&image.id),
                _ => PathBuf::from(&image.id),
            };
            std::fs::read(&path)
                .map_err(deck_renderer::RenderError::from)
                .and_then(|bytes| exporter.images_mut().insert(image.id.clone(), bytes))
        };
        if let Err(e) = loaded {
            tracing::warn!("Face image for {slot} unavailable: {e}");
        }
    }
}

/// Attach artwork from `dir` to cards whose names match, leaving cards
/// that already have a face image alone. Returns the number attached.
fn attach_assets(
    deck: &mut Deck,
    exporter: &mut SceneExporter,
    dir: &Path,
) -> anyhow::Result<usize> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading assets {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ImageFormat::from_extension(ext) != ImageFormat::Unknown)
        })
        .collect();
    entries.sort();

    let ranks = deck.ranks().to_vec();
    let mut attached = 0;
    for path in entries {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let found = match_asset_name(name, &ranks);
        let (Some(suit), Some(rank)) = (found.suit, found.rank) else {
            tracing::debug!("No card matches asset {name}");
            continue;
        };
        let slot = CardSlot::standard(suit, rank);
        if deck.record(&slot)?.face_image.is_some() {
            continue;
        }
        let image = match exporter.images_mut().load_file(&path) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!("Skipping asset {name}: {e}");
                continue;
            }
        };
        deck.record_mut(&slot)?.face_image = Some(image);
        tracing::debug!("Attached {name} to {slot}");
        attached += 1;
    }
    tracing::info!("Attached {attached} assets from {}", dir.display());
    Ok(attached)
}
