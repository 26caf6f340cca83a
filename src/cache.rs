//! Explicit caches owned by the grade service.
//!
//! [`DatasetCache`] keeps the latest parsed snapshot keyed by source identity.
//! [`GroupStatsCache`] memoizes group statistics per (identity, group).
//! Both are safe to share between sessions: values are immutable once stored.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::analyzers::aggregate::GroupStatsOutcome;
use crate::dataset::Dataset;
use crate::error::LoadError;
use crate::source::{GradeSource, SourceIdentity};

#[derive(Debug, Default)]
pub struct DatasetCache {
    current: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset when `source` still has the same identity,
    /// otherwise reads and caches the new revision.
    ///
    /// The returned flag is `true` when a fresh parse happened.
    pub fn get_or_load(&self, source: &dyn GradeSource) -> Result<(Arc<Dataset>, bool), LoadError> {
        let identity = source.identity()?;

        if let Some(cached) = self.cached(&identity) {
            debug!(location = %identity.location, "Dataset cache hit");
            return Ok((cached, false));
        }

        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        // Another session may have loaded this revision while we waited.
        if let Some(existing) = slot.as_ref().filter(|d| *d.identity() == identity) {
            return Ok((Arc::clone(existing), false));
        }

        debug!(location = %identity.location, "Dataset cache miss");
        let reader = source.open()?;
        let dataset = Arc::new(Dataset::from_reader(identity, reader)?);
        *slot = Some(Arc::clone(&dataset));

        Ok((dataset, true))
    }

    pub fn invalidate(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn cached(&self, identity: &SourceIdentity) -> Option<Arc<Dataset>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|d| d.identity() == identity)
            .cloned()
    }
}

#[derive(Debug, Default)]
pub struct GroupStatsCache {
    entries: RwLock<HashMap<(SourceIdentity, String), GroupStatsOutcome>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GroupStatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized outcome for `(dataset, group)` or computes and
    /// stores it with `compute`. Groups absent from `dataset` are computed
    /// but never stored, so arbitrary user input cannot grow the map.
    pub fn get_or_compute(
        &self,
        dataset: &Dataset,
        group: &str,
        compute: impl FnOnce() -> GroupStatsOutcome,
    ) -> GroupStatsOutcome {
        if !dataset.records().iter().any(|r| r.group == group) {
            return compute();
        }

        let key = (dataset.identity().clone(), group.to_string());

        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let outcome = compute();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(outcome)
            .clone()
    }

    pub fn invalidate(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
