//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initialises logging
//! - parses CLI arguments and the selection config
//! - picks the data source (local file or cached download)
//! - runs the pipeline with the PNG chart sink

use clap::Parser;
use log::info;

use crate::cli::Cli;
use crate::data::{CachedDownload, DataSource, LocalFile};
use crate::error::AppError;
use crate::io::selection::read_selection;
use crate::plot::PngChartSink;

pub mod pipeline;

/// Entry point for the `case-growth` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = Cli::parse();

    let file = read_selection(&cli.config)?;
    let selection = file.selection();
    let mut settings = file.settings();
    if let Some(dir) = &cli.out_dir {
        settings.output_dir = dir.clone();
    }

    let source = data_source(&cli);
    let mut sink = PngChartSink::new();
    let run = pipeline::run_pipeline(source.as_ref(), &selection, &settings, &mut sink)?;

    info!(
        "Done: {} labels listed, {} charts ({} curves, {} empty)",
        run.collection.len(),
        run.summary.charts,
        run.summary.curves,
        run.summary.empty_curves
    );
    Ok(())
}

fn data_source(cli: &Cli) -> Box<dyn DataSource> {
    match &cli.data {
        Some(path) => Box::new(LocalFile::new(path)),
        None => Box::new(CachedDownload::from_env(cli.url.clone())),
    }
}

/// `RUST_LOG` wins; otherwise show `info` and above.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}
