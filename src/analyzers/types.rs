//! Data types emitted for group reporting.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::aggregate::{GroupStatsOutcome, aggregate_group};
use crate::analyzers::charts::{
    BandCount, BoxSummary, HistogramBin, band_distribution, box_summary, histogram,
};
use crate::dataset::Dataset;

/// Everything the presentation layer needs to draw one group: the numeric
/// statistics and the data behind the pie, box and histogram charts.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub group: String,
    pub generated_at: DateTime<Utc>,
    pub students: usize,
    pub stats: GroupStatsOutcome,
    pub bands: Vec<BandCount>,
    pub box_plot: Option<BoxSummary>,
    pub histogram: Vec<HistogramBin>,
}

impl GroupReport {
    pub fn build(dataset: &Dataset, group: &str, stats: GroupStatsOutcome, bins: usize) -> Self {
        let members = dataset.in_group(group);
        let scores: Vec<f64> = members.iter().map(|r| r.score()).collect();

        Self {
            group: group.to_string(),
            generated_at: Utc::now(),
            students: members.len(),
            stats,
            bands: band_distribution(&members),
            box_plot: box_summary(&scores),
            histogram: histogram(&scores, bins),
        }
    }

    /// Builds a report, computing the statistics directly.
    pub fn from_dataset(dataset: &Dataset, group: &str, bins: usize) -> Self {
        Self::build(dataset, group, aggregate_group(dataset, group), bins)
    }
}
