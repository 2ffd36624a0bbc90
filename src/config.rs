//! Command-line and environment configuration.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Catalog file used when neither `--file` nor `BOOK_CATALOG_FILE` is set.
/// Relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "books_data.json";
/// Folder beneath the user's home directory that holds the log file.
const LOG_DIR_NAME: &str = ".book-catalog";
const LOG_FILE_NAME: &str = "book-catalog.log";

/// Personal book catalog in the terminal
#[derive(Parser, Debug)]
#[command(name = "book-catalog", version)]
#[command(about = "Keep track of your books and reading progress")]
pub struct Cli {
    /// JSON file holding the catalog
    #[arg(short, long, env = "BOOK_CATALOG_FILE", default_value = DEFAULT_DATA_FILE)]
    pub file: PathBuf,

    /// Where to write logs (default: ~/.book-catalog/book-catalog.log)
    #[arg(long, env = "BOOK_CATALOG_LOG")]
    pub log_file: Option<PathBuf>,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub verbosity: u8,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let log_file = match cli.log_file {
            Some(path) => path,
            None => default_log_file()?,
        };

        Ok(Self {
            data_file: cli.file,
            log_file,
            verbosity: cli.verbose,
        })
    }

    /// Default `tracing` filter directive for the configured verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "book_catalog=info",
            1 => "book_catalog=debug",
            _ => "book_catalog=trace",
        }
    }
}

fn default_log_file() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_win() {
        let cli = Cli::try_parse_from([
            "book-catalog",
            "--file",
            "/tmp/mine.json",
            "--log-file",
            "/tmp/mine.log",
            "-vv",
        ])
        .unwrap();
        let config = Config::from_cli(cli).unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/mine.json"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/mine.log"));
        assert_eq!(config.log_filter(), "book_catalog=trace");
    }

    #[test]
    fn verbosity_maps_to_filter() {
        let cli = Cli::try_parse_from(["book-catalog", "--log-file", "x.log", "-v"]).unwrap();
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.log_filter(), "book_catalog=debug");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
