//! Report driver: selected labels -> chart sink, plus the label listing.

use log::{info, warn};

use crate::domain::{ChartKind, ChartSpec, ReportSelection, ReportSettings, SeriesCollection};
use crate::error::AppError;
use crate::io::listing::write_label_listing;
use crate::plot::ChartSink;

pub mod chains;

pub use chains::build_curve;

/// What a report run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub charts: usize,
    pub curves: usize,
    pub empty_curves: usize,
}

/// Resolve every selected label up front so a typo aborts before any output.
pub fn resolve_selection<'a>(
    collection: &'a SeriesCollection,
    selection: &'a ReportSelection,
) -> Result<Vec<(&'a str, &'a [f64])>, AppError> {
    selection
        .names
        .iter()
        .map(|name| {
            collection
                .get(name)
                .map(|series| (name.as_str(), series))
                .ok_or_else(|| AppError::unknown_label(name))
        })
        .collect()
}

/// Push every resolved series through each chart's chain into `sink`.
///
/// With an empty selection no chart is started.
pub fn render_charts(
    selected: &[(&str, &[f64])],
    collection: &SeriesCollection,
    settings: &ReportSettings,
    sink: &mut dyn ChartSink,
) -> Result<ReportSummary, AppError> {
    let mut summary = ReportSummary::default();
    if selected.is_empty() {
        info!("No labels selected; skipping charts");
        return Ok(summary);
    }

    for kind in ChartKind::ALL {
        let spec = ChartSpec::new(kind, settings.chart_path(kind), collection.start_date());
        sink.begin_chart(&spec)?;
        for &(label, series) in selected {
            let curve = build_curve(kind, series, settings);
            if curve.is_empty() {
                warn!("'{label}' has no data to plot on {}", kind.file_name());
                summary.empty_curves += 1;
            }
            sink.add_curve(label, &curve)?;
            summary.curves += 1;
        }
        sink.finish_chart()?;
        summary.charts += 1;
    }

    Ok(summary)
}

/// Full report: label listing (always) and charts for the selection.
pub fn run_report(
    collection: &SeriesCollection,
    selection: &ReportSelection,
    settings: &ReportSettings,
    sink: &mut dyn ChartSink,
) -> Result<ReportSummary, AppError> {
    // Lookup errors must surface before anything is written.
    let selected = resolve_selection(collection, selection)?;

    write_label_listing(&settings.listing_path(), collection)?;
    render_charts(&selected, collection, settings, sink)
}
