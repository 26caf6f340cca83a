use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use super::{GradeSource, SourceIdentity};
use crate::error::LoadError;

/// Reads grades from a CSV file. Identity is derived from the file's
/// modification time and length.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn unavailable(&self, source: std::io::Error) -> LoadError {
        LoadError::SourceUnavailable {
            location: self.location(),
            source,
        }
    }
}

impl GradeSource for FileSource {
    fn identity(&self) -> Result<SourceIdentity, LoadError> {
        let meta = std::fs::metadata(&self.path).map_err(|e| self.unavailable(e))?;

        Ok(SourceIdentity {
            location: self.location(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
            len: meta.len(),
        })
    }

    fn open(&self) -> Result<Box<dyn Read + Send + '_>, LoadError> {
        let file = File::open(&self.path).map_err(|e| self.unavailable(e))?;
        Ok(Box::new(BufReader::new(file)))
    }
}
