//! The grading data service: one source, its cached snapshot, and the
//! lookup and group operations the presentation layer calls per interaction.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::analyzers::aggregate::{GroupStatsOutcome, aggregate_group};
use crate::analyzers::charts::DEFAULT_HISTOGRAM_BINS;
use crate::analyzers::types::GroupReport;
use crate::cache::{DatasetCache, GroupStatsCache};
use crate::dataset::{Dataset, StudentRecord};
use crate::lookup::{LookupOutcome, lookup};
use crate::source::GradeSource;

pub struct GradeService<S> {
    source: S,
    datasets: DatasetCache,
    group_stats: GroupStatsCache,
    histogram_bins: usize,
}

impl<S: GradeSource> GradeService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            datasets: DatasetCache::new(),
            group_stats: GroupStatsCache::new(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins.max(1);
        self
    }

    pub fn group_stats_cache(&self) -> &GroupStatsCache {
        &self.group_stats
    }

    /// Returns the current dataset, re-reading the source only when it changed.
    ///
    /// # Errors
    ///
    /// Fails when the source cannot be read or lacks a required column. There
    /// is no partial dataset to fall back to.
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Result<Arc<Dataset>> {
        let (dataset, fresh) = self
            .datasets
            .get_or_load(&self.source)
            .context("failed to load grade data")?;

        if fresh {
            self.group_stats.invalidate();
            info!(
                location = %dataset.identity().location,
                rows = dataset.len(),
                groups = dataset.groups().len(),
                "Grade data loaded"
            );

            if dataset.coerced_scores() > 0 {
                warn!(
                    coerced = dataset.coerced_scores(),
                    "DS values that are missing or not numeric were treated as 0"
                );
            }

            let duplicates = dataset.duplicate_emails();
            if !duplicates.is_empty() {
                warn!(
                    count = duplicates.len(),
                    emails = ?duplicates,
                    "Duplicate emails in grade data; lookups return the first row"
                );
            }
        }

        Ok(dataset)
    }

    /// Looks up a student by exact email.
    #[tracing::instrument(skip(self))]
    pub fn find_student(&self, email: &str) -> Result<LookupOutcome<StudentRecord>> {
        let dataset = self.load()?;
        let outcome = lookup(&dataset, email).cloned();

        if let LookupOutcome::NotFound { .. } = outcome {
            info!("Email not found");
        }

        Ok(outcome)
    }

    /// Distinct groups, sorted.
    pub fn groups(&self) -> Result<Vec<String>> {
        Ok(self.load()?.groups())
    }

    #[tracing::instrument(skip(self))]
    pub fn group_stats(&self, group: &str) -> Result<GroupStatsOutcome> {
        let dataset = self.load()?;
        Ok(self.stats_for(&dataset, group))
    }

    /// Statistics plus chart data for one group.
    #[tracing::instrument(skip(self))]
    pub fn group_report(&self, group: &str) -> Result<GroupReport> {
        let dataset = self.load()?;
        let stats = self.stats_for(&dataset, group);
        Ok(GroupReport::build(&dataset, group, stats, self.histogram_bins))
    }

    /// Drops every cached value so the next call re-reads the source.
    pub fn invalidate(&self) {
        self.datasets.invalidate();
        self.group_stats.invalidate();
    }

    fn stats_for(&self, dataset: &Dataset, group: &str) -> GroupStatsOutcome {
        self.group_stats
            .get_or_compute(dataset, group, || aggregate_group(dataset, group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::source::{FileSource, MemorySource};

    const GRADES: &str = "Email,Name,GROUP,DS\n\
        a@x.com,Ann,G2,10\n\
        b@x.com,Bob,G1,12\n\
        c@x.com,Cid,G2,14\n\
        d@x.com,Dee,G2,12\n\
        e@x.com,Eve,G3,abc\n";

    fn service() -> GradeService<MemorySource> {
        GradeService::new(MemorySource::new("grades", GRADES))
    }

    #[test]
    fn test_find_student() {
        let svc = service();

        match svc.find_student("b@x.com").unwrap() {
            LookupOutcome::Found(record) => {
                assert_eq!(record.name, "Bob");
                assert_eq!(record.group, "G1");
            }
            other => panic!("expected Found, got {other:?}"),
        }
        assert_eq!(svc.find_student("").unwrap(), LookupOutcome::Skipped);
        assert!(matches!(
            svc.find_student("z@x.com").unwrap(),
            LookupOutcome::NotFound { .. }
        ));
    }

    #[test]
    fn test_groups_sorted() {
        assert_eq!(service().groups().unwrap(), vec!["G1", "G2", "G3"]);
    }

    #[test]
    fn test_group_stats_cached_between_calls() {
        let svc = service();

        let first = svc.group_stats("G2").unwrap();
        let second = svc.group_stats("G2").unwrap();
        assert_eq!(first, second);
        assert_eq!(svc.group_stats_cache().misses(), 1);
        assert_eq!(svc.group_stats_cache().hits(), 1);

        let stats = first.stats().unwrap();
        assert!((stats.mean - 12.0).abs() < 1e-9);
        assert!((stats.variance - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_row_group_has_no_data() {
        let outcome = service().group_stats("G1").unwrap();
        assert!(matches!(outcome, GroupStatsOutcome::NoData { rows: 1, .. }));
    }

    #[test]
    fn test_coerced_score_is_zero() {
        let svc = service();
        let dataset = svc.load().unwrap();
        assert_eq!(dataset.coerced_scores(), 1);

        match svc.find_student("e@x.com").unwrap() {
            LookupOutcome::Found(record) => assert_eq!(record.score(), 0.0),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_group_report_uses_configured_bins() {
        let report = service().with_histogram_bins(4).group_report("G2").unwrap();
        assert_eq!(report.students, 3);
        assert_eq!(report.histogram.len(), 4);
    }

    #[test]
    fn test_invalidate_clears_caches() {
        let svc = service();
        svc.group_stats("G2").unwrap();
        svc.invalidate();
        assert!(svc.group_stats_cache().is_empty());
        assert_eq!(svc.groups().unwrap().len(), 3);
    }

    #[test]
    fn test_unavailable_source_is_fatal() {
        let svc = GradeService::new(FileSource::new(
            std::env::temp_dir().join("grade_board_service_missing.csv"),
        ));

        let err = svc.load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::SourceUnavailable { .. })
        ));
    }
}
