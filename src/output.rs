//! Output formatting for lookup results and group reports.
//!
//! Renders plain text for the terminal and JSON for external chart renderers.

use anyhow::Result;
use std::fmt::Write;
use tracing::debug;

use crate::analyzers::aggregate::GroupStatsOutcome;
use crate::analyzers::types::GroupReport;
use crate::dataset::StudentRecord;
use crate::lookup::LookupOutcome;

pub const NOT_FOUND_MESSAGE: &str = "Email not found";
pub const NO_DATA_MESSAGE: &str = "No data available";

/// Renders a lookup result. `Skipped` renders nothing at all.
pub fn render_lookup(outcome: &LookupOutcome<StudentRecord>) -> Option<String> {
    match outcome {
        LookupOutcome::Skipped => None,
        LookupOutcome::Found(record) => Some(render_student(record)),
        LookupOutcome::NotFound { .. } => Some(NOT_FOUND_MESSAGE.to_string()),
    }
}

pub fn render_student(record: &StudentRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Student results");
    let _ = writeln!(out, "  Name  : {}", record.name);
    let _ = writeln!(out, "  Group : {}", record.group);
    let _ = writeln!(out, "  DS    : {}", record.score());
    let _ = write!(out, "  Band  : {}", record.band());
    out
}

pub fn render_groups(groups: &[String]) -> String {
    if groups.is_empty() {
        return "No groups found".to_string();
    }
    groups.join("\n")
}

/// Notice shown to users when some DS values were replaced by 0.
pub fn coerced_scores_warning(coerced: usize) -> Option<String> {
    (coerced > 0).then(|| {
        format!("Warning: {coerced} DS value(s) were missing or not numeric and are shown as 0")
    })
}

pub fn render_report(report: &GroupReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Group {} ({} students)", report.group, report.students);

    match &report.stats {
        GroupStatsOutcome::Computed(stats) => {
            let _ = writeln!(out, "- Mean: {:.2}", stats.mean);
            let _ = writeln!(out, "- Variance: {:.2}", stats.variance);
            let _ = writeln!(out, "- Standard deviation: {:.2}", stats.stddev);
        }
        GroupStatsOutcome::NoData { rows, .. } => {
            let _ = writeln!(out, "{NO_DATA_MESSAGE} ({rows} row(s), at least 2 needed)");
        }
    }

    if report.students == 0 {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Band distribution");
    for band in &report.bands {
        let _ = writeln!(
            out,
            "  {:<22} {:>4} ({:.1}%)",
            band.label,
            band.count,
            band.share * 100.0
        );
    }

    if let Some(summary) = &report.box_plot {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Box plot: min {:.2} | q1 {:.2} | median {:.2} | q3 {:.2} | max {:.2}",
            summary.min, summary.q1, summary.median, summary.q3, summary.max
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Histogram");
    for bin in &report.histogram {
        let _ = writeln!(
            out,
            "  [{:>6.2}, {:>6.2}] {:>4} {}",
            bin.start,
            bin.end,
            bin.count,
            "#".repeat(bin.count)
        );
    }

    out
}

/// Serializes a report as pretty-printed JSON.
pub fn report_json(report: &GroupReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    debug!(group = %report.group, bytes = json.len(), "Serialized group report");
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::source::SourceIdentity;

    fn dataset() -> Dataset {
        Dataset::new(
            SourceIdentity {
                location: "memory:test".to_string(),
                modified: None,
                len: 0,
            },
            vec![
                StudentRecord::new("a", "Ann", "G1", 10.0),
                StudentRecord::new("b", "Bob", "G1", 12.0),
                StudentRecord::new("c", "Cid", "G1", 14.0),
                StudentRecord::new("d", "Dee", "G2", 18.0),
            ],
        )
    }

    #[test]
    fn test_render_lookup_variants() {
        let record = StudentRecord::new("a@b.com", "Ann", "G1", 12.5);

        let found = render_lookup(&LookupOutcome::Found(record)).unwrap();
        assert!(found.contains("Ann"));
        assert!(found.contains("G1"));
        assert!(found.contains("12.5"));
        assert!(found.contains("Fairly good"));

        let missing = render_lookup(&LookupOutcome::NotFound {
            email: "x".to_string(),
        });
        assert_eq!(missing.as_deref(), Some(NOT_FOUND_MESSAGE));

        assert!(render_lookup(&LookupOutcome::Skipped).is_none());
    }

    #[test]
    fn test_render_report_two_decimals() {
        let report = GroupReport::from_dataset(&dataset(), "G1", 10);
        let text = render_report(&report);

        assert!(text.contains("Group G1 (3 students)"));
        assert!(text.contains("- Mean: 12.00"));
        assert!(text.contains("- Variance: 4.00"));
        assert!(text.contains("- Standard deviation: 2.00"));
        assert!(text.contains("Band distribution"));
        assert!(text.contains("median 12.00"));
    }

    #[test]
    fn test_render_report_without_data() {
        let text = render_report(&GroupReport::from_dataset(&dataset(), "G2", 10));
        assert!(text.contains(NO_DATA_MESSAGE));
        assert!(!text.contains("Mean"));

        let empty = render_report(&GroupReport::from_dataset(&dataset(), "G9", 10));
        assert!(empty.contains("(0 students)"));
        assert!(!empty.contains("Histogram"));
    }

    #[test]
    fn test_coerced_scores_warning() {
        assert!(coerced_scores_warning(0).is_none());
        assert!(coerced_scores_warning(2).unwrap().contains('2'));
    }

    #[test]
    fn test_report_json_round_trips_fields() {
        let report = GroupReport::from_dataset(&dataset(), "G1", 10);
        let json: serde_json::Value = serde_json::from_str(&report_json(&report).unwrap()).unwrap();

        assert_eq!(json["group"], "G1");
        assert_eq!(json["stats"]["status"], "computed");
        assert_eq!(json["bands"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_render_groups() {
        assert_eq!(render_groups(&["G1".to_string(), "G2".to_string()]), "G1\nG2");
        assert_eq!(render_groups(&[]), "No groups found");
    }
}
