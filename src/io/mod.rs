//! Input/output helpers.
//!
//! - quoted-field pre-pass (`normalize`)
//! - case CSV ingest + country aggregation (`ingest`)
//! - report selection JSON (`selection`)
//! - sorted label listing (`listing`)

pub mod ingest;
pub mod listing;
pub mod normalize;
pub mod selection;

pub use ingest::*;
pub use listing::*;
pub use normalize::*;
pub use selection::*;
