//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the loaded dataset (`SeriesCollection`, `Label`, `Series`)
//! - report inputs (`ReportSelection`, `ReportSettings`, `Smoothing`)
//! - chart descriptions handed to sinks (`ChartKind`, `ChartSpec`, `Curve`)

pub mod types;

pub use types::*;
