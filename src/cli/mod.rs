//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! loading/transform code; `app` turns a parsed [`Cli`] into a pipeline run.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "case-growth",
    version,
    about = "Growth diagnostics charts from a cumulative case-count CSV"
)]
pub struct Cli {
    /// Selection config (JSON with a `names` array of labels to chart).
    #[arg(value_name = "CONFIG", default_value = "report.json")]
    pub config: PathBuf,

    /// Local case CSV. If omitted, a cached copy is used or the dataset is downloaded once.
    #[arg(value_name = "DATA")]
    pub data: Option<PathBuf>,

    /// Directory for charts and the label listing (overrides the config's `output_dir`).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Dataset URL used when downloading (overrides CASE_GROWTH_DATA_URL).
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_report_json_and_no_data_file() {
        let cli = Cli::parse_from(["case-growth"]);
        assert_eq!(cli.config, PathBuf::from("report.json"));
        assert!(cli.data.is_none());
        assert!(cli.out_dir.is_none());
    }

    #[test]
    fn positional_config_and_data() {
        let cli = Cli::parse_from(["case-growth", "mine.json", "cases.csv", "--out-dir", "charts"]);
        assert_eq!(cli.config, PathBuf::from("mine.json"));
        assert_eq!(cli.data, Some(PathBuf::from("cases.csv")));
        assert_eq!(cli.out_dir, Some(PathBuf::from("charts")));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
