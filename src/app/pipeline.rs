//! Shared pipeline logic, independent of where data comes from or where
//! charts go.
//!
//! data source -> parse/aggregate -> label listing + chart chains -> sink

use std::fs;

use log::info;

use crate::data::DataSource;
use crate::domain::{ReportSelection, ReportSettings, SeriesCollection};
use crate::error::AppError;
use crate::io::ingest::parse_series;
use crate::plot::ChartSink;
use crate::report::{ReportSummary, run_report};

/// All outputs of one run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub collection: SeriesCollection,
    pub summary: ReportSummary,
}

/// Execute the full pipeline.
pub fn run_pipeline(
    source: &dyn DataSource,
    selection: &ReportSelection,
    settings: &ReportSettings,
    sink: &mut dyn ChartSink,
) -> Result<RunOutput, AppError> {
    // 1) Obtain the raw CSV.
    info!("Reading case data from {}", source.describe());
    let text = source.fetch()?;

    // 2) Parse + aggregate.
    let collection = parse_series(&text)?;
    if let (Some(first), Some(last)) = (collection.start_date(), collection.end_date()) {
        info!("Dataset covers {first} .. {last}");
    }

    // 3) Listing + charts.
    fs::create_dir_all(&settings.output_dir).map_err(|e| {
        AppError::input(format!(
            "Failed to create output directory '{}': {e}",
            settings.output_dir.display()
        ))
    })?;
    let summary = run_report(&collection, selection, settings, sink)?;

    Ok(RunOutput { collection, summary })
}
