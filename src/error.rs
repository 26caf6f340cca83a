//! Failures that stop a dataset from loading.
//!
//! These are fatal for the service. Per-request conditions such as an
//! unknown email or an empty group are modelled as return values instead.

use std::fmt;

#[derive(Debug)]
pub enum LoadError {
    /// The configured source could not be opened or read.
    SourceUnavailable {
        location: String,
        source: std::io::Error,
    },

    /// The header row lacks one or more required columns.
    MissingColumns {
        location: String,
        missing: Vec<&'static str>,
    },

    /// The delimited input could not be parsed at all.
    Malformed {
        location: String,
        source: csv::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::SourceUnavailable { location, source } => {
                write!(f, "grade source '{location}' is unavailable: {source}")
            }
            LoadError::MissingColumns { location, missing } => {
                write!(
                    f,
                    "grade source '{location}' is missing required columns: {}",
                    missing.join(", ")
                )
            }
            LoadError::Malformed { location, source } => {
                write!(f, "grade source '{location}' is not valid CSV: {source}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::SourceUnavailable { source, .. } => Some(source),
            LoadError::Malformed { source, .. } => Some(source),
            LoadError::MissingColumns { .. } => None,
        }
    }
}
