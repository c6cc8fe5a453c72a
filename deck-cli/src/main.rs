//! # Saorsa Deck
//!
//! Command-line renderer for print-ready playing cards.

use clap::Parser;
use deck_cli::{run, CliArgs, JobConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing.
///
/// Set `RUST_LOG` to control log levels (default: info,deck_core=debug,deck_renderer=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,deck_core=debug,deck_renderer=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = JobConfig::try_from(args)?;
    tracing::info!(
        "Rendering {:?} as {:?} into {}",
        config.target,
        config.format,
        config.out.display()
    );

    let report = run(&config)?;
    tracing::info!("Wrote {} files", report.files.len());
    Ok(())
}
