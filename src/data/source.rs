//! Where the case CSV comes from.
//!
//! The pipeline only needs "the file's text"; `DataSource` hides whether that
//! is a local path or a once-downloaded copy cached next to the working dir.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use reqwest::blocking::Client;

use crate::error::AppError;

/// File name the dataset is cached under when no local file is given.
pub const DEFAULT_DATA_FILE: &str = "time_series_covid19_confirmed_global.csv";

/// Upstream location of the dataset.
pub const DEFAULT_DATA_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";

/// Environment variable (also read from `.env`) overriding the download URL.
pub const DATA_URL_ENV: &str = "CASE_GROWTH_DATA_URL";

/// Provider of raw case CSV text.
pub trait DataSource {
    /// Human-readable origin for logs and errors.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<String, AppError>;
}

/// A CSV file supplied by the user.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for LocalFile {
    fn describe(&self) -> String {
        format!("local file '{}'", self.path.display())
    }

    fn fetch(&self) -> Result<String, AppError> {
        fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            // The file is there but is not text: malformed input, not missing data.
            io::ErrorKind::InvalidData => {
                AppError::input(format!("Data file '{}' is not valid UTF-8: {e}", self.path.display()))
            }
            _ => AppError::no_data(format!("Failed to read data file '{}': {e}", self.path.display())),
        })
    }
}

/// Read `cache_path` if present, otherwise download `url` once and keep it there.
pub struct CachedDownload {
    client: Client,
    pub url: String,
    pub cache_path: PathBuf,
}

impl CachedDownload {
    pub fn new(url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            cache_path: cache_path.into(),
        }
    }

    /// Default cache file; URL from `--url`, then the environment, then the built-in default.
    pub fn from_env(url_override: Option<String>) -> Self {
        dotenvy::dotenv().ok();
        let url = url_override
            .or_else(|| std::env::var(DATA_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_DATA_URL.to_string());
        Self::new(url, DEFAULT_DATA_FILE)
    }

    fn download(&self) -> Result<String, AppError> {
        info!("Downloading case data from {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| AppError::no_data(format!("Download of '{}' failed: {e}", self.url)))?;

        if !resp.status().is_success() {
            return Err(AppError::no_data(format!(
                "Download of '{}' failed with status {}.",
                self.url,
                resp.status()
            )));
        }

        resp.text()
            .map_err(|e| AppError::no_data(format!("Failed to read download body from '{}': {e}", self.url)))
    }
}

impl DataSource for CachedDownload {
    fn describe(&self) -> String {
        format!("cached download '{}' ({})", self.cache_path.display(), self.url)
    }

    fn fetch(&self) -> Result<String, AppError> {
        if self.cache_path.exists() {
            info!("Using cached data file {}", self.cache_path.display());
            return LocalFile::new(&self.cache_path).fetch();
        }

        let body = self.download()?;
        store_cache(&self.cache_path, &body);
        Ok(body)
    }
}

/// Persist a downloaded body. A failed write only costs a re-download next run.
fn store_cache(path: &Path, body: &str) {
    match fs::write(path, body) {
        Ok(()) => info!("Cached {} bytes to {}", body.len(), path.display()),
        Err(e) => warn!("Could not cache data to '{}': {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_file_returns_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "a,b,c,d,1/1/20\n").unwrap();

        let text = LocalFile::new(&path).fetch().unwrap();
        assert_eq!(text, "a,b,c,d,1/1/20\n");
    }

    #[test]
    fn missing_local_file_is_no_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFile::new(dir.path().join("missing.csv")).fetch().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_NO_DATA);
    }

    #[test]
    fn non_utf8_local_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, [b'a', b',', 0xff, 0xfe, b'\n']).unwrap();

        let err = LocalFile::new(&path).fetch().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn cached_file_is_used_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join(DEFAULT_DATA_FILE);
        fs::write(&cache, "cached").unwrap();

        // An unroutable URL: any network attempt would fail the test.
        let source = CachedDownload::new("http://127.0.0.1:9/unused.csv", &cache);
        assert_eq!(source.fetch().unwrap(), "cached");
    }

    #[test]
    fn failed_download_is_no_data_error_and_leaves_no_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join(DEFAULT_DATA_FILE);

        let source = CachedDownload::new("http://127.0.0.1:9/unused.csv", &cache);
        let err = source.fetch().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_NO_DATA);
        assert!(!cache.exists());
    }
}
