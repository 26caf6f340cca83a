//! Handles to the tabular grade source.
//!
//! [`GradeSource`] is the seam the loader reads through. [`FileSource`] backs it
//! with a CSV file on disk, [`MemorySource`] with an in-memory buffer.

mod file;
mod memory;

pub use file::FileSource;
pub use memory::MemorySource;

use chrono::{DateTime, Utc};
use std::io::Read;

use crate::error::LoadError;

/// Identifies one revision of a source. Two equal identities mean the
/// underlying data has not changed and a cached parse can be reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceIdentity {
    pub location: String,
    pub modified: Option<DateTime<Utc>>,
    pub len: u64,
}

/// A readable origin of grade rows.
pub trait GradeSource: Send + Sync {
    /// Returns the identity of the current revision without reading the data.
    fn identity(&self) -> Result<SourceIdentity, LoadError>;

    /// Opens a fresh reader positioned at the start of the data.
    fn open(&self) -> Result<Box<dyn Read + Send + '_>, LoadError>;
}
