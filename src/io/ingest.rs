//! CSV ingest: raw case CSV text -> `SeriesCollection`.
//!
//! Expected layout (one header row, then one row per region):
//!
//! ```text
//! Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,...
//! ,Italy,41.87,12.56,0,0,...
//! Ontario,Canada,51.25,-85.32,0,0,...
//! ```
//!
//! Design goals:
//! - **Strict**: any malformed row aborts the load with its line number
//!   (unlike a screening tool, a silently dropped region would skew totals)
//! - **Explicit aggregation**: country totals are built in a
//!   `CountryAccumulator` owned by the load, then folded into the collection
//! - **No plotting/transform logic here**

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use log::{debug, info};
use thiserror::Error;

use crate::domain::{Label, Series, SeriesCollection, row_label};
use crate::error::AppError;
use crate::io::normalize::normalize_line;

/// Columns before the first date column: province, country, lat, long.
pub const META_COLUMNS: usize = 4;

const COL_SUBDIVISION: usize = 0;
const COL_COUNTRY: usize = 1;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Input is empty: expected a header line.")]
    MissingHeader,
    #[error("Line {line}: expected at least {} columns (4 region columns + 1 date), found {found}.", META_COLUMNS + 1)]
    TooFewColumns { line: usize, found: usize },
    #[error("Line {line}: expected {expected} columns (as in the header), found {found}.")]
    ColumnCount { line: usize, expected: usize, found: usize },
    #[error("Line {line}, column {column}: '{token}' is not a number.")]
    InvalidNumber { line: usize, column: usize, token: String },
    #[error("Line {line}: duplicate label '{label}'.")]
    DuplicateLabel { line: usize, label: Label },
    #[error("Line {line}: series for '{country}' has {found} values, aggregate has {expected}.")]
    LengthMismatch {
        line: usize,
        country: String,
        expected: usize,
        found: usize,
    },
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::input(format!("Malformed case data: {err}"))
    }
}

/// Running element-wise country totals, keyed by country name.
///
/// Every row contributes to its country, a plain country row (no subdivision)
/// included. Only one plain row per country is allowed.
#[derive(Debug, Default)]
pub struct CountryAccumulator {
    totals: HashMap<String, Series>,
    plain_rows: HashSet<String>,
}

impl CountryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one row's series to its country's total.
    ///
    /// `line` is only used for error context.
    pub fn add(&mut self, line: usize, country: &str, is_subdivision: bool, series: &[f64]) -> Result<(), LoadError> {
        if !is_subdivision && !self.plain_rows.insert(country.to_string()) {
            return Err(LoadError::DuplicateLabel {
                line,
                label: country.to_string(),
            });
        }

        match self.totals.get_mut(country) {
            Some(total) => {
                if total.len() != series.len() {
                    return Err(LoadError::LengthMismatch {
                        line,
                        country: country.to_string(),
                        expected: total.len(),
                        found: series.len(),
                    });
                }
                for (acc, v) in total.iter_mut().zip(series) {
                    *acc += v;
                }
            }
            None => {
                self.totals.insert(country.to_string(), series.to_vec());
            }
        }
        Ok(())
    }

    /// Number of distinct countries seen so far.
    pub fn countries(&self) -> usize {
        self.totals.len()
    }

    /// Fold the aggregates into `series`, replacing any plain country row.
    ///
    /// For a country with only a plain row the aggregate equals that row.
    pub fn finish_into(self, series: &mut BTreeMap<Label, Series>) {
        series.extend(self.totals);
    }
}

/// Parse case CSV text into a collection of per-region and per-country series.
pub fn parse_series(text: &str) -> Result<SeriesCollection, LoadError> {
    let mut lines = text.lines().enumerate().map(|(idx, l)| (idx + 1, l));

    let (header_line, header) = lines
        .by_ref()
        .find(|(_, l)| !l.trim().is_empty())
        .ok_or(LoadError::MissingHeader)?;
    let header = normalize_line(header.trim_start_matches('\u{feff}'));
    let header_fields: Vec<&str> = header.split(',').collect();
    let expected = header_fields.len();
    if expected <= META_COLUMNS {
        return Err(LoadError::TooFewColumns {
            line: header_line,
            found: expected,
        });
    }

    let date_labels: Vec<String> = header_fields[META_COLUMNS..]
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    let start_date = date_labels.first().and_then(|s| parse_date_label(s));

    let mut series: BTreeMap<Label, Series> = BTreeMap::new();
    let mut accumulator = CountryAccumulator::new();
    let mut rows = 0usize;

    for (line, raw) in lines {
        if raw.trim().is_empty() {
            continue;
        }
        let normalized = normalize_line(raw);
        let fields: Vec<&str> = normalized.split(',').collect();
        if fields.len() != expected {
            return Err(LoadError::ColumnCount {
                line,
                expected,
                found: fields.len(),
            });
        }

        let subdivision = fields[COL_SUBDIVISION].trim();
        let country = fields[COL_COUNTRY].trim();
        let values = parse_values(line, &fields[META_COLUMNS..])?;

        let label = row_label(country, subdivision);
        if series.contains_key(&label) {
            return Err(LoadError::DuplicateLabel { line, label });
        }
        accumulator.add(line, country, !subdivision.is_empty(), &values)?;
        series.insert(label, values);
        rows += 1;
    }

    let countries = accumulator.countries();
    accumulator.finish_into(&mut series);

    info!(
        "Loaded {rows} rows: {} labels across {countries} countries, {} days per series",
        series.len(),
        date_labels.len()
    );
    if let (Some(first), Some(last)) = (date_labels.first(), date_labels.last()) {
        debug!("Date columns span {first} .. {last}");
    }

    Ok(SeriesCollection::new(series, date_labels, start_date))
}

fn parse_values(line: usize, tokens: &[&str]) -> Result<Series, LoadError> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let token = token.trim();
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LoadError::InvalidNumber {
                    line,
                    column: META_COLUMNS + i + 1,
                    token: token.to_string(),
                })
        })
        .collect()
}

/// Parse a header date label; US short dates are what the source dataset uses.
fn parse_date_label(s: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 3] = ["%m/%d/%y", "%Y-%m-%d", "%m/%d/%Y"];
    FMTS.iter().find_map(|fmt| NaiveDate::parse_from_str(s.trim(), fmt).ok())
}
