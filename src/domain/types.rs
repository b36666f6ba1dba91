//! Shared domain types.
//!
//! These types are intentionally kept small:
//!
//! - the loaded dataset (`SeriesCollection`) is read-only after construction
//! - report inputs (`ReportSelection`, `ReportSettings`) come straight from the
//!   selection JSON
//! - chart outputs (`ChartSpec`, `Curve`) are plain data handed to a sink

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

/// Unique key of a region's series: `"Country"` or `"Country:Province"`.
pub type Label = String;

/// Cumulative counts, one value per day in file column order.
pub type Series = Vec<f64>;

/// Builds the label for a CSV row.
pub fn row_label(country: &str, subdivision: &str) -> Label {
    if subdivision.is_empty() {
        country.to_string()
    } else {
        format!("{country}:{subdivision}")
    }
}

/// All series of one dataset, keyed by label.
///
/// Constructed once by the loader; there is deliberately no mutable access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesCollection {
    series: BTreeMap<Label, Series>,
    date_labels: Vec<String>,
    start_date: Option<NaiveDate>,
}

impl SeriesCollection {
    pub fn new(series: BTreeMap<Label, Series>, date_labels: Vec<String>, start_date: Option<NaiveDate>) -> Self {
        Self {
            series,
            date_labels,
            start_date,
        }
    }

    pub fn get(&self, label: &str) -> Option<&[f64]> {
        self.series.get(label).map(Vec::as_slice)
    }

    /// Labels in lexicographic order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of date columns (= length of every series).
    pub fn days(&self) -> usize {
        self.date_labels.len()
    }

    /// Header labels of the date columns, as they appear in the file.
    pub fn date_labels(&self) -> &[String] {
        &self.date_labels
    }

    /// Date of the first data column, if the header labels parse as dates.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Date of the last data column, if known.
    pub fn end_date(&self) -> Option<NaiveDate> {
        let start = self.start_date?;
        let offset = i64::try_from(self.days().checked_sub(1)?).ok()?;
        start.checked_add_signed(Duration::days(offset))
    }
}

/// Ordered labels to chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSelection {
    pub names: Vec<Label>,
}

/// Which moving-average variant smooths the report chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoothing {
    /// Convolution form: shortens the series by `window - 1`, each value is the
    /// mean of the trailing window.
    #[default]
    Trailing,
    /// Length-preserving form with edge-clamped indices.
    Centered,
}

/// Tunables for the report chains.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub output_dir: PathBuf,
    pub smoothing: Smoothing,
    /// Moving-average window width (days).
    pub window: usize,
    /// Number of most recent points kept per curve.
    pub recent: usize,
    /// Case count a series must exceed before it appears on the rate-vs-cases chart.
    pub threshold: f64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            smoothing: Smoothing::Trailing,
            window: 7,
            recent: 45,
            threshold: 100.0,
        }
    }
}

impl ReportSettings {
    pub fn listing_path(&self) -> PathBuf {
        self.output_dir.join(LABEL_LISTING_FILE)
    }

    pub fn chart_path(&self, kind: ChartKind) -> PathBuf {
        self.output_dir.join(kind.file_name())
    }
}

/// File name of the label listing inside the output directory.
pub const LABEL_LISTING_FILE: &str = "labels.txt";

/// The fixed set of diagnostic charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    AbsoluteGrowth,
    GrowthRate,
    SecondOrderGrowthRate,
    RateVsCases,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::AbsoluteGrowth,
        ChartKind::GrowthRate,
        ChartKind::SecondOrderGrowthRate,
        ChartKind::RateVsCases,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::AbsoluteGrowth => "absolute_growth.png",
            ChartKind::GrowthRate => "growth_rate.png",
            ChartKind::SecondOrderGrowthRate => "second_order_growth_rate.png",
            ChartKind::RateVsCases => "rate_vs_cases.png",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::AbsoluteGrowth => "New cases per day (smoothed)",
            ChartKind::GrowthRate => "Daily growth rate (smoothed)",
            ChartKind::SecondOrderGrowthRate => "Growth rate of new cases (smoothed)",
            ChartKind::RateVsCases => "Growth rate vs. cumulative cases",
        }
    }

    pub fn x_desc(self) -> &'static str {
        match self {
            ChartKind::RateVsCases => "Cumulative cases",
            _ => "Day",
        }
    }

    pub fn y_desc(self) -> &'static str {
        match self {
            ChartKind::AbsoluteGrowth => "New cases",
            _ => "Growth rate",
        }
    }

    pub fn scale(self) -> AxisScale {
        match self {
            ChartKind::RateVsCases => AxisScale::LogLog,
            _ => AxisScale::Linear,
        }
    }

    /// Whether x values are day indices (and can be labelled as dates).
    pub fn x_is_day(self) -> bool {
        !matches!(self, ChartKind::RateVsCases)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    LogLog,
}

/// Everything a sink needs to set up and save one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub path: PathBuf,
    /// Date of day index 0, used to label day axes.
    pub start_date: Option<NaiveDate>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, path: impl AsRef<Path>, start_date: Option<NaiveDate>) -> Self {
        Self {
            kind,
            path: path.as_ref().to_path_buf(),
            start_date,
        }
    }
}

/// One labelled curve: paired x/y values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Curve {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_label_joins_country_and_subdivision() {
        assert_eq!(row_label("Canada", "Ontario"), "Canada:Ontario");
        assert_eq!(row_label("Italy", ""), "Italy");
    }

    #[test]
    fn end_date_counts_from_start() {
        let mut series = BTreeMap::new();
        series.insert("X".to_string(), vec![1.0, 2.0, 3.0]);
        let start = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
        let collection = SeriesCollection::new(
            series,
            vec!["1/22/20".into(), "1/23/20".into(), "1/24/20".into()],
            Some(start),
        );
        assert_eq!(collection.end_date(), NaiveDate::from_ymd_opt(2020, 1, 24));
        assert_eq!(collection.days(), 3);
    }

    #[test]
    fn chart_paths_live_in_output_dir() {
        let settings = ReportSettings {
            output_dir: PathBuf::from("out"),
            ..ReportSettings::default()
        };
        assert_eq!(settings.listing_path(), PathBuf::from("out").join("labels.txt"));
        assert_eq!(
            settings.chart_path(ChartKind::RateVsCases),
            PathBuf::from("out").join("rate_vs_cases.png")
        );
    }
}
