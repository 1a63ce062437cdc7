//! Table builders for each aggregate shape

use std::collections::{BTreeMap, BTreeSet};

use taskdash_core::TaskRecord;
use taskdash_report::{GroupedCounts, Pivot, SummaryMetrics};

use crate::TextTable;

/// Grouped counts as key columns plus a trailing Count column
pub fn grouped_counts_table(grouped: &GroupedCounts) -> TextTable {
    let mut headers: Vec<String> = grouped
        .keys
        .iter()
        .map(|k| k.heading().to_string())
        .collect();
    headers.push("Count".into());

    let mut table = TextTable::new(headers);
    for (combination, count) in &grouped.counts {
        let mut cells = combination.clone();
        cells.push(count.to_string());
        table.push_row(cells);
    }
    table
}

/// A pivot as one row per row-label with one column per column-label
pub fn pivot_table(pivot: &Pivot) -> TextTable {
    let row_heading = pivot
        .row_key
        .map(|k| k.heading().to_string())
        .unwrap_or_default();
    let mut headers = vec![row_heading];
    headers.extend(pivot.col_labels.iter().cloned());

    let mut table = TextTable::new(headers);
    for (r, label) in pivot.row_labels.iter().enumerate() {
        let mut cells = vec![label.clone()];
        cells.extend(pivot.cells[r].iter().map(|c| c.to_string()));
        table.push_row(cells);
    }
    table
}

/// The three metric tiles as a single-row table
pub fn metrics_table(metrics: &SummaryMetrics) -> TextTable {
    TextTable::new(vec![
        "Total Tasks".into(),
        "Completed Tasks".into(),
        "Pending Tasks".into(),
    ])
    .row(vec![
        metrics.total.to_string(),
        metrics.completed.to_string(),
        metrics.pending.to_string(),
    ])
}

/// A descending (label, count) ranking, e.g. top contributors
pub fn ranking_table(label_heading: &str, ranking: &[(String, usize)]) -> TextTable {
    let mut table = TextTable::new(vec![label_heading.to_string(), "Count".into()]);
    for (label, count) in ranking {
        table.push_row(vec![label.clone(), count.to_string()]);
    }
    table
}

/// Record detail listing: Summary / Issue Type / Status / Date
pub fn records_table(records: &[TaskRecord]) -> TextTable {
    let mut table = TextTable::new(vec![
        "Summary".into(),
        "Issue Type".into(),
        "Status".into(),
        "Date".into(),
    ]);
    for record in records {
        table.push_row(vec![
            record.summary.clone(),
            record.issue_type.clone(),
            record.status.clone(),
            record.date.map(|d| d.to_string()).unwrap_or_default(),
        ]);
    }
    table
}

/// Unique incomplete-task summaries per (month, assignee)
pub fn summaries_table(
    groups: &BTreeMap<(String, String), BTreeSet<String>>,
) -> TextTable {
    let mut table = TextTable::new(vec![
        "Month".into(),
        "Resource Name".into(),
        "Unique Incomplete Tasks".into(),
    ]);
    for ((month, assignee), summaries) in groups {
        let joined: Vec<String> = summaries.iter().cloned().collect();
        table.push_row(vec![month.clone(), assignee.clone(), joined.join("; ")]);
    }
    table
}
