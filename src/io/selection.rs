//! Report selection JSON.
//!
//! ```json
//! {
//!   "names": ["Italy", "Canada:Ontario"],
//!   "output_dir": "charts",
//!   "smoothing": "trailing",
//!   "window": 7,
//!   "recent": 45,
//!   "threshold": 100
//! }
//! ```
//!
//! Every key is optional. A missing `names` is an empty selection (no charts,
//! the label listing is still written); the other keys override
//! `ReportSettings::default()`. Unknown keys are ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{ReportSelection, ReportSettings, Smoothing};
use crate::error::AppError;

/// Raw on-disk shape of the selection file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionFile {
    #[serde(default)]
    pub names: Vec<String>,
    pub output_dir: Option<PathBuf>,
    pub smoothing: Option<Smoothing>,
    pub window: Option<usize>,
    pub recent: Option<usize>,
    pub threshold: Option<f64>,
}

impl SelectionFile {
    pub fn selection(&self) -> ReportSelection {
        ReportSelection {
            names: self.names.clone(),
        }
    }

    /// Defaults overridden by whatever the file sets.
    pub fn settings(&self) -> ReportSettings {
        let defaults = ReportSettings::default();
        ReportSettings {
            output_dir: self.output_dir.clone().unwrap_or(defaults.output_dir),
            smoothing: self.smoothing.unwrap_or(defaults.smoothing),
            window: self.window.unwrap_or(defaults.window),
            recent: self.recent.unwrap_or(defaults.recent),
            threshold: self.threshold.unwrap_or(defaults.threshold),
        }
    }
}

/// Parse selection JSON text.
pub fn parse_selection(text: &str) -> Result<SelectionFile, AppError> {
    serde_json::from_str(text).map_err(|e| AppError::input(format!("Invalid selection JSON: {e}")))
}

/// Read a selection JSON file.
pub fn read_selection(path: &Path) -> Result<SelectionFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open selection config '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::input(format!("Invalid selection JSON '{}': {e}", path.display())))
}
