use crate::dataset::{Dataset, StudentRecord};

/// Result of looking up a student by email.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome<R> {
    /// The input was empty, so nothing was searched and nothing should be shown.
    Skipped,
    Found(R),
    NotFound { email: String },
}

impl LookupOutcome<&StudentRecord> {
    pub fn cloned(self) -> LookupOutcome<StudentRecord> {
        match self {
            LookupOutcome::Skipped => LookupOutcome::Skipped,
            LookupOutcome::Found(record) => LookupOutcome::Found(record.clone()),
            LookupOutcome::NotFound { email } => LookupOutcome::NotFound { email },
        }
    }
}

/// Finds the first record whose email equals `email` exactly.
///
/// Matching is case-sensitive and applies no normalization to `email`;
/// record emails were already trimmed at load time.
pub fn lookup<'a>(dataset: &'a Dataset, email: &str) -> LookupOutcome<&'a StudentRecord> {
    if email.is_empty() {
        return LookupOutcome::Skipped;
    }

    match dataset.records().iter().find(|r| r.email == email) {
        Some(record) => LookupOutcome::Found(record),
        None => LookupOutcome::NotFound {
            email: email.to_string(),
        },
    }
}
