use serde::Serialize;

use crate::analyzers::utility::{mean, sample_variance};
use crate::dataset::Dataset;

/// Summary statistics of DS scores within one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub count: usize,
    pub mean: f64,
    /// Sample variance (N-1 denominator).
    pub variance: f64,
    pub stddev: f64,
}

/// Result of aggregating a group.
///
/// `NoData` covers both an unknown group (`rows == 0`) and a group with a
/// single row, where the sample variance is undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GroupStatsOutcome {
    Computed(GroupStats),
    NoData { group: String, rows: usize },
}

impl GroupStatsOutcome {
    pub fn stats(&self) -> Option<&GroupStats> {
        match self {
            GroupStatsOutcome::Computed(stats) => Some(stats),
            GroupStatsOutcome::NoData { .. } => None,
        }
    }
}

/// Filters `dataset` to `group` and computes mean, sample variance and
/// standard deviation of the scores.
pub fn aggregate_group(dataset: &Dataset, group: &str) -> GroupStatsOutcome {
    let scores: Vec<f64> = dataset
        .in_group(group)
        .into_iter()
        .map(|r| r.score())
        .collect();

    aggregate_scores(group, &scores)
}

fn aggregate_scores(group: &str, scores: &[f64]) -> GroupStatsOutcome {
    let avg = mean(scores);

    match sample_variance(scores, avg) {
        Some(variance) => GroupStatsOutcome::Computed(GroupStats {
            count: scores.len(),
            mean: avg,
            variance,
            stddev: variance.sqrt(),
        }),
        None => GroupStatsOutcome::NoData {
            group: group.to_string(),
            rows: scores.len(),
        },
    }
}
