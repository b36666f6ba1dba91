//! Numeric utilities: moving averages, growth and thresholding.

pub mod transforms;

pub use transforms::*;
