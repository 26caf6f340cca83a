//! In-memory grade table built from a delimited source.
//!
//! Loading trims every email, coerces unparseable DS values to 0.0 and
//! classifies each row. A loaded [`Dataset`] is never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use tracing::debug;

use crate::analyzers::grade::{Band, classify};
use crate::error::LoadError;
use crate::source::{GradeSource, SourceIdentity};

pub const EMAIL_COLUMN: &str = "Email";
pub const NAME_COLUMN: &str = "Name";
pub const GROUP_COLUMN: &str = "GROUP";
pub const SCORE_COLUMN: &str = "DS";

const REQUIRED_COLUMNS: [&str; 4] = [EMAIL_COLUMN, NAME_COLUMN, GROUP_COLUMN, SCORE_COLUMN];

/// One student row. The band is always derived from the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub email: String,
    pub name: String,
    pub group: String,
    score: f64,
    band: Band,
}

impl StudentRecord {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        group: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            group: group.into(),
            score,
            band: classify(score),
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = score;
        self.band = classify(score);
    }
}

/// The required columns of one source row. Empty fields and fields missing
/// from short rows come through as `None`.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Email")]
    email: Option<String>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "GROUP")]
    group: Option<String>,
    #[serde(rename = "DS")]
    score: Option<String>,
}

/// Parses a DS field. Anything that is not a finite number yields `None`.
pub fn parse_score(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Immutable snapshot of one source revision.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    identity: SourceIdentity,
    records: Vec<StudentRecord>,
    coerced_scores: usize,
}

impl Dataset {
    pub fn new(identity: SourceIdentity, records: Vec<StudentRecord>) -> Self {
        Self {
            identity,
            records,
            coerced_scores: 0,
        }
    }

    /// Reads the source's current revision.
    pub fn load(source: &dyn GradeSource) -> Result<Self, LoadError> {
        let identity = source.identity()?;
        let reader = source.open()?;
        Self::from_reader(identity, reader)
    }

    /// Parses comma-delimited rows with a header line.
    pub fn from_reader(identity: SourceIdentity, reader: impl Read) -> Result<Self, LoadError> {
        let malformed = |source: csv::Error| LoadError::Malformed {
            location: identity.location.clone(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers().map_err(malformed)?;
        // A repeated column name resolves to its first occurrence.
        let positions: Vec<Option<usize>> = REQUIRED_COLUMNS
            .iter()
            .map(|col| headers.iter().position(|h| h == *col))
            .collect();
        let missing: Vec<&'static str> = REQUIRED_COLUMNS
            .into_iter()
            .zip(&positions)
            .filter(|(_, pos)| pos.is_none())
            .map(|(col, _)| col)
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns {
                location: identity.location.clone(),
                missing,
            });
        }
        let columns: Vec<usize> = positions.into_iter().flatten().collect();
        let row_headers = csv::StringRecord::from(REQUIRED_COLUMNS.to_vec());

        let mut records = Vec::new();
        let mut coerced_scores = 0usize;

        for result in rdr.records() {
            let record = result.map_err(malformed)?;
            let picked: csv::StringRecord = columns
                .iter()
                .map(|&i| record.get(i).unwrap_or_default())
                .collect();
            let row: RawRow = picked.deserialize(Some(&row_headers)).map_err(malformed)?;

            let score = match parse_score(row.score.as_deref()) {
                Some(score) => score,
                None => {
                    coerced_scores += 1;
                    0.0
                }
            };

            records.push(StudentRecord::new(
                row.email.as_deref().unwrap_or_default().trim(),
                row.name.unwrap_or_default(),
                row.group.unwrap_or_default(),
                score,
            ));
        }

        debug!(
            location = %identity.location,
            rows = records.len(),
            coerced_scores,
            "Parsed grade source"
        );

        Ok(Self {
            identity,
            records,
            coerced_scores,
        })
    }

    pub fn identity(&self) -> &SourceIdentity {
        &self.identity
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of DS fields that were absent or not numeric and became 0.0.
    pub fn coerced_scores(&self) -> usize {
        self.coerced_scores
    }

    /// Distinct group identifiers in lexicographic order.
    pub fn groups(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.group.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Records whose group equals `group` exactly, in source order.
    pub fn in_group(&self, group: &str) -> Vec<&StudentRecord> {
        self.records.iter().filter(|r| r.group == group).collect()
    }

    /// Emails that appear on more than one row, in order of their second
    /// occurrence. Lookups resolve these to the first row.
    pub fn duplicate_emails(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for record in &self.records {
            let email = record.email.as_str();
            if !seen.insert(email) && reported.insert(email) {
                duplicates.push(email);
            }
        }

        duplicates
    }
}
