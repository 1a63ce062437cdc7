//! # taskdash-report
//!
//! Aggregation engine for the taskdash reporting pipeline.
//!
//! Everything here is a pure function over slices of [`TaskRecord`]: grouped
//! counts, pivots, the completed/pending split, trends, heatmaps and the
//! per-resource incomplete-task summaries. All operations are empty-in /
//! empty-out; records with a missing date are excluded from date-keyed
//! aggregations only.
//!
//! ## Example
//!
//! ```rust
//! use taskdash_core::{SheetKind, TaskRecord};
//! use taskdash_report::{group_counts, GroupKey};
//!
//! let records = vec![
//!     TaskRecord::new("a", SheetKind::Sprint, "May").status("Done"),
//!     TaskRecord::new("b", SheetKind::Loop, "May").status("To Do"),
//! ];
//!
//! let by_status = group_counts(&records, &[GroupKey::Status]).unwrap();
//! assert_eq!(by_status.total(), 2);
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use taskdash_core::TaskRecord;

mod grouping;
mod views;

pub use grouping::{group_counts, pivot_counts, GroupKey, GroupedCounts, Pivot};
pub use views::{
    completed_type_counts, completion_heatmap, completion_trend, daily_load,
    incomplete_summaries, top_contributors,
};

/// Group label for records with no assignee
pub const UNASSIGNED: &str = "(unassigned)";

// ============================================================================
// Errors
// ============================================================================

/// Aggregation configuration error, surfaced to the caller rather than
/// silently ignored
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Grouping requires at least one key")]
    NoGroupingKeys,
}

// ============================================================================
// Completion split and metrics
// ============================================================================

/// Exact partition of records on the terminal-status predicate
#[derive(Clone, Debug, Default)]
pub struct CompletionSplit {
    pub completed: Vec<TaskRecord>,
    pub pending: Vec<TaskRecord>,
}

/// Partition records by `status == "Done"`. Every record lands on exactly
/// one side.
pub fn split_by_completion(records: &[TaskRecord]) -> CompletionSplit {
    let mut split = CompletionSplit::default();
    for record in records {
        if record.is_done() {
            split.completed.push(record.clone());
        } else {
            split.pending.push(record.clone());
        }
    }
    split
}

/// The three metric tiles of the dashboard
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

pub fn summary_metrics(records: &[TaskRecord]) -> SummaryMetrics {
    let completed = records.iter().filter(|r| r.is_done()).count();
    SummaryMetrics {
        total: records.len(),
        completed,
        pending: records.len() - completed,
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Records attributed to one (canonicalized) assignee
pub fn filter_by_assignee(records: &[TaskRecord], assignee: &str) -> Vec<TaskRecord> {
    records
        .iter()
        .filter(|r| r.assignee.as_deref() == Some(assignee))
        .cloned()
        .collect()
}

/// Records belonging to any of the selected months
pub fn filter_by_months<S: AsRef<str>>(records: &[TaskRecord], months: &[S]) -> Vec<TaskRecord> {
    records
        .iter()
        .filter(|r| months.iter().any(|m| m.as_ref() == r.source_month))
        .cloned()
        .collect()
}

/// Records that carry a parseable date. Date-keyed views are defined over
/// this subset.
pub fn drop_dateless(records: &[TaskRecord]) -> Vec<TaskRecord> {
    records.iter().filter(|r| r.date.is_some()).cloned().collect()
}

/// Distinct assignees present in the records, sorted
pub fn distinct_assignees(records: &[TaskRecord]) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .filter_map(|r| r.assignee.clone())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    names.dedup();
    names
}

/// Value counts over an arbitrary label extractor, sorted by descending
/// count then label. Records yielding `None` are skipped.
pub(crate) fn value_counts<F>(records: &[TaskRecord], key: F) -> Vec<(String, usize)>
where
    F: Fn(&TaskRecord) -> Option<String>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        if let Some(label) = key(record) {
            *counts.entry(label).or_insert(0) += 1;
        }
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use taskdash_core::SheetKind;

    fn record(status: &str, assignee: Option<&str>, month: &str) -> TaskRecord {
        let mut r = TaskRecord::new("t", SheetKind::Sprint, month).status(status);
        r.assignee = assignee.map(String::from);
        r
    }

    #[test]
    fn split_is_a_true_partition() {
        let records = vec![
            record("Done", Some("A"), "May"),
            record("To Do", Some("B"), "May"),
            record("done", None, "May"), // lowercase is pending
            record("Done", None, "June"),
        ];

        let split = split_by_completion(&records);
        assert_eq!(split.completed.len() + split.pending.len(), records.len());
        assert_eq!(split.completed.len(), 2);
        assert!(split.completed.iter().all(|r| r.is_done()));
        assert!(split.pending.iter().all(|r| !r.is_done()));
    }

    #[test]
    fn metrics_add_up() {
        let records = vec![
            record("Done", None, "May"),
            record("Blocked", None, "May"),
            record("Done", None, "May"),
        ];
        let metrics = summary_metrics(&records);
        assert_eq!(metrics, SummaryMetrics { total: 3, completed: 2, pending: 1 });
    }

    #[test]
    fn empty_in_empty_out() {
        let split = split_by_completion(&[]);
        assert!(split.completed.is_empty() && split.pending.is_empty());
        assert_eq!(summary_metrics(&[]), SummaryMetrics::default());
        assert!(filter_by_assignee(&[], "A").is_empty());
        assert!(drop_dateless(&[]).is_empty());
    }

    #[test]
    fn filters_select_expected_rows() {
        let records = vec![
            record("Done", Some("Ajay Kumar"), "May"),
            record("To Do", Some("Sneha Guthe"), "May"),
            record("To Do", Some("Ajay Kumar"), "June"),
        ];

        assert_eq!(filter_by_assignee(&records, "Ajay Kumar").len(), 2);
        assert_eq!(filter_by_months(&records, &["June"]).len(), 1);
        assert_eq!(filter_by_months::<&str>(&records, &[]).len(), 0);
    }

    #[test]
    fn distinct_assignees_sorted_without_missing() {
        let records = vec![
            record("Done", Some("B"), "May"),
            record("Done", Some("A"), "May"),
            record("Done", None, "May"),
            record("Done", Some("A"), "May"),
        ];
        assert_eq!(distinct_assignees(&records), vec!["A".to_string(), "B".to_string()]);
    }
}
