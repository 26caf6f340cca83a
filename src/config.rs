//! Runtime configuration read from the process environment.
//!
//! `.env` files are loaded by the binary through `dotenvy` before
//! [`Config::from_env`] runs, so either source works.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use crate::analyzers::charts::DEFAULT_HISTOGRAM_BINS;

pub const CSV_PATH_VAR: &str = "GRADES_CSV_PATH";
pub const LOG_FILE_VAR: &str = "LOG_FILE_PATH";
pub const HISTOGRAM_BINS_VAR: &str = "GRADES_HISTOGRAM_BINS";

pub const DEFAULT_LOG_FILE: &str = "logs/grade_board.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Location of the grade CSV.
    pub csv_path: PathBuf,
    pub log_file_path: PathBuf,
    pub histogram_bins: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_csv(None)
    }

    /// Like [`Config::from_env`], but a CSV path given on the command line
    /// takes the place of `GRADES_CSV_PATH`.
    pub fn from_env_with_csv(csv_override: Option<&Path>) -> Result<Self> {
        Self::from_lookup_with_csv(|key| std::env::var(key).ok(), csv_override)
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Self::from_lookup_with_csv(lookup, None)
    }

    /// Builds a configuration from a key lookup; `csv_override`, when given,
    /// wins over `GRADES_CSV_PATH` and is used as-is.
    pub fn from_lookup_with_csv(
        lookup: impl Fn(&str) -> Option<String>,
        csv_override: Option<&Path>,
    ) -> Result<Self> {
        let csv_path = match csv_override {
            Some(path) => path.to_path_buf(),
            None => lookup(CSV_PATH_VAR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .with_context(|| format!("{CSV_PATH_VAR} must be set to the grade CSV location"))?,
        };

        let log_file_path = lookup(LOG_FILE_VAR).unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        let histogram_bins = match lookup(HISTOGRAM_BINS_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{HISTOGRAM_BINS_VAR} must be a positive integer"))?,
            None => DEFAULT_HISTOGRAM_BINS,
        };
        if histogram_bins == 0 {
            bail!("{HISTOGRAM_BINS_VAR} must be greater than zero");
        }

        Ok(Self {
            csv_path,
            log_file_path: PathBuf::from(log_file_path),
            histogram_bins,
        })
    }
}
