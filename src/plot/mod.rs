//! Chart output.
//!
//! The report driver never touches a drawing backend; it talks to a
//! [`ChartSink`]: open a chart, add one labelled curve per selected region,
//! finish. `PngChartSink` renders with Plotters, `RecordingSink` just keeps the
//! calls (used by tests and dry runs).

use crate::domain::{ChartSpec, Curve};
use crate::error::AppError;

pub mod png;

pub use png::PngChartSink;

/// Receiver of labelled curves, one chart at a time.
pub trait ChartSink {
    /// Start a new chart. Curves added afterwards belong to it.
    fn begin_chart(&mut self, spec: &ChartSpec) -> Result<(), AppError>;

    /// Add one labelled curve to the current chart. An empty curve adds nothing
    /// visible but is still accepted.
    fn add_curve(&mut self, label: &str, curve: &Curve) -> Result<(), AppError>;

    /// Finalize the current chart (legend, title, axes) and save it.
    fn finish_chart(&mut self) -> Result<(), AppError>;
}

/// A chart as seen by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedChart {
    pub spec: ChartSpec,
    pub curves: Vec<(String, Curve)>,
    pub finished: bool,
}

/// Sink that stores every chart and curve in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub charts: Vec<RecordedChart>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&mut self) -> Result<&mut RecordedChart, AppError> {
        self.charts
            .last_mut()
            .filter(|c| !c.finished)
            .ok_or_else(|| AppError::render("No open chart: begin_chart was not called."))
    }
}

impl ChartSink for RecordingSink {
    fn begin_chart(&mut self, spec: &ChartSpec) -> Result<(), AppError> {
        self.charts.push(RecordedChart {
            spec: spec.clone(),
            curves: Vec::new(),
            finished: false,
        });
        Ok(())
    }

    fn add_curve(&mut self, label: &str, curve: &Curve) -> Result<(), AppError> {
        self.current()?.curves.push((label.to_string(), curve.clone()));
        Ok(())
    }

    fn finish_chart(&mut self) -> Result<(), AppError> {
        self.current()?.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChartKind;

    #[test]
    fn recording_sink_requires_open_chart() {
        let mut sink = RecordingSink::new();
        assert!(sink.add_curve("X", &Curve::default()).is_err());

        let spec = ChartSpec::new(ChartKind::GrowthRate, "growth_rate.png", None);
        sink.begin_chart(&spec).unwrap();
        sink.add_curve("X", &Curve::new(vec![1.0], vec![0.5])).unwrap();
        sink.finish_chart().unwrap();
        assert!(sink.finish_chart().is_err());

        assert_eq!(sink.charts.len(), 1);
        assert_eq!(sink.charts[0].curves[0].0, "X");
    }
}
