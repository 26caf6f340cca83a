//! Chart-ready summaries for one group: band shares for the pie chart,
//! five-number summary for the box plot, equal-width bins for the histogram.

use serde::Serialize;

use crate::analyzers::grade::Band;
use crate::analyzers::utility::quantile;
use crate::dataset::StudentRecord;

/// Default histogram resolution.
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCount {
    pub band: Band,
    pub label: &'static str,
    pub count: usize,
    /// Fraction of the group in this band (0.0 when the group is empty).
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub points: Vec<f64>,
}

/// Counts records per band. Every band is present, lowest first.
pub fn band_distribution(records: &[&StudentRecord]) -> Vec<BandCount> {
    let total = records.len();

    Band::ALL
        .iter()
        .map(|&band| {
            let count = records.iter().filter(|r| r.band() == band).count();
            BandCount {
                band,
                label: band.label(),
                count,
                share: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
            }
        })
        .collect()
}

/// Splits `scores` into `bins` equal-width bins between the minimum and
/// maximum. Bins are half-open except the last, which includes the maximum.
pub fn histogram(scores: &[f64], bins: usize) -> Vec<HistogramBin> {
    let Some((min, max)) = min_max(scores) else {
        return Vec::new();
    };

    if min == max {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: scores.len(),
        }];
    }

    let bins = bins.max(1);
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];

    for &score in scores {
        let idx = (((score - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            end: if i == bins - 1 {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Five-number summary plus every point, or `None` for an empty group.
pub fn box_summary(scores: &[f64]) -> Option<BoxSummary> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(BoxSummary {
        min: *sorted.first()?,
        q1: quantile(&sorted, 0.25)?,
        median: quantile(&sorted, 0.5)?,
        q3: quantile(&sorted, 0.75)?,
        max: *sorted.last()?,
        points: scores.to_vec(),
    })
}

fn min_max(scores: &[f64]) -> Option<(f64, f64)> {
    scores.iter().fold(None, |acc, &s| match acc {
        None => Some((s, s)),
        Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
    })
}
