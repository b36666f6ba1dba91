//! Data acquisition: local case CSV or cached HTTP download.

pub mod source;

pub use source::{CachedDownload, DataSource, LocalFile, DEFAULT_DATA_FILE, DEFAULT_DATA_URL};
