//! `case-growth` library crate.
//!
//! The binary (`case-growth`) is a thin wrapper around this library so that:
//!
//! - the parsing and transform core is testable without network or rendering
//! - data sources and chart sinks are swappable behind small traits

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
