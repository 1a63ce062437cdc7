//! Grouped counts and pivots
//!
//! The typed [`GroupKey`] enum replaces stringly-named grouping columns: an
//! unknown key is unrepresentable, so misconfiguration is caught at the API
//! boundary instead of deep inside a reshape.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use taskdash_core::TaskRecord;

use crate::{ReportError, UNASSIGNED};

/// A grouping dimension over task records
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GroupKey {
    /// Originating workbook (month label)
    Month,
    /// Raw status value
    Status,
    /// Canonicalized assignee; missing groups under `(unassigned)`
    Assignee,
    /// Issue type
    IssueType,
    /// Originating sheet (Sprint / Loop)
    Sheet,
}

impl GroupKey {
    /// The group label this key extracts from a record
    pub fn value_of(&self, record: &TaskRecord) -> String {
        match self {
            GroupKey::Month => record.source_month.clone(),
            GroupKey::Status => record.status.clone(),
            GroupKey::Assignee => record
                .assignee
                .clone()
                .unwrap_or_else(|| UNASSIGNED.to_string()),
            GroupKey::IssueType => record.issue_type.clone(),
            GroupKey::Sheet => record.source_sheet.as_str().to_string(),
        }
    }

    /// Column heading for rendered output
    pub fn heading(&self) -> &'static str {
        match self {
            GroupKey::Month => "Month",
            GroupKey::Status => "Status",
            GroupKey::Assignee => "Assignee",
            GroupKey::IssueType => "Issue Type",
            GroupKey::Sheet => "Tasks Type",
        }
    }
}

/// Counts per distinct key combination, in sorted key order
#[derive(Clone, Debug, Default, Serialize)]
pub struct GroupedCounts {
    /// The grouping dimensions, in the order keys were requested
    pub keys: Vec<GroupKey>,
    /// Count per key combination
    pub counts: BTreeMap<Vec<String>, usize>,
}

impl GroupedCounts {
    /// Sum of all group counts. With no pre-filtering this equals the
    /// record count that went in.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count for one key combination, zero when absent
    pub fn get(&self, combination: &[&str]) -> usize {
        let owned: Vec<String> = combination.iter().map(|s| (*s).to_string()).collect();
        self.counts.get(&owned).copied().unwrap_or(0)
    }
}

/// Count records per distinct combination of the given keys.
///
/// Missing values form their own group (assignee-less records under
/// `(unassigned)`, blank statuses under the empty string) unless the caller
/// filters them out beforehand. An empty key list is a configuration error.
pub fn group_counts(records: &[TaskRecord], keys: &[GroupKey]) -> Result<GroupedCounts, ReportError> {
    if keys.is_empty() {
        return Err(ReportError::NoGroupingKeys);
    }

    let mut counts: BTreeMap<Vec<String>, usize> = BTreeMap::new();
    for record in records {
        let combination: Vec<String> = keys.iter().map(|k| k.value_of(record)).collect();
        *counts.entry(combination).or_insert(0) += 1;
    }

    Ok(GroupedCounts {
        keys: keys.to_vec(),
        counts,
    })
}

/// A two-dimensional unstack: rows × columns with zero fill
#[derive(Clone, Debug, Default, Serialize)]
pub struct Pivot {
    pub row_key: Option<GroupKey>,
    pub col_key: Option<GroupKey>,
    /// Sorted distinct row labels
    pub row_labels: Vec<String>,
    /// Sorted distinct column labels
    pub col_labels: Vec<String>,
    /// `cells[r][c]` is the count for (row_labels[r], col_labels[c])
    pub cells: Vec<Vec<usize>>,
}

impl Pivot {
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty()
    }

    /// Count at (row label, column label), zero when either is absent
    pub fn get(&self, row: &str, col: &str) -> usize {
        let r = self.row_labels.iter().position(|l| l == row);
        let c = self.col_labels.iter().position(|l| l == col);
        match (r, c) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }
}

/// Group by two keys and unstack the second into columns, filling absent
/// combinations with zero.
pub fn pivot_counts(records: &[TaskRecord], row_key: GroupKey, col_key: GroupKey) -> Pivot {
    let mut row_labels: BTreeSet<String> = BTreeSet::new();
    let mut col_labels: BTreeSet<String> = BTreeSet::new();
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();

    for record in records {
        let row = row_key.value_of(record);
        let col = col_key.value_of(record);
        row_labels.insert(row.clone());
        col_labels.insert(col.clone());
        *counts.entry((row, col)).or_insert(0) += 1;
    }

    let row_labels: Vec<String> = row_labels.into_iter().collect();
    let col_labels: Vec<String> = col_labels.into_iter().collect();
    let cells = row_labels
        .iter()
        .map(|row| {
            col_labels
                .iter()
                .map(|col| {
                    counts
                        .get(&(row.clone(), col.clone()))
                        .copied()
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect();

    Pivot {
        row_key: Some(row_key),
        col_key: Some(col_key),
        row_labels,
        col_labels,
        cells,
    }
}
