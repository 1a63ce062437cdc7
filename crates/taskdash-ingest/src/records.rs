//! Row-to-record mapping
//!
//! Maps a normalized [`RowTable`] into [`TaskRecord`]s, applying per-sheet
//! column aliases, assignee canonicalization and tolerant date coercion.
//!
//! The Sprint sheet names some columns differently (`Resource Name` for
//! `Assignee`, `Created` for `Date`, `Tasks List` for `Summary`) and is the
//! one source that jams multiple names into a single assignee field, so its
//! assignees are reduced to the first token before alias lookup.

use taskdash_core::names::{canonicalize, CanonicalizeOptions};
use taskdash_core::{dates, Cell, Notice, RowTable, SheetKind, TaskRecord};

/// Accepted labels per logical column, preferred label first
const SUMMARY_LABELS: &[&str] = &["Summary", "Tasks List"];
const ISSUE_TYPE_LABELS: &[&str] = &["Issue Type"];
const STATUS_LABELS: &[&str] = &["Status"];
const ASSIGNEE_LABELS: &[&str] = &["Assignee", "Resource Name"];
const DATE_LABELS: &[&str] = &["Date", "Created"];

/// Result of mapping one sheet's rows
#[derive(Clone, Debug, Default)]
pub struct MappedRecords {
    pub records: Vec<TaskRecord>,
    pub notices: Vec<Notice>,
}

/// Map every row of a table into records tagged with the given provenance.
///
/// Absent columns degrade to empty/missing fields plus one `MissingColumn`
/// notice each; unparseable dates become missing with one aggregate notice
/// per sheet. Empty tables map to empty output with no notices.
pub fn records_from_table(
    table: &RowTable,
    kind: SheetKind,
    month: &str,
    file_label: &str,
) -> MappedRecords {
    let mut mapped = MappedRecords::default();
    if table.is_empty() {
        return mapped;
    }

    let summary_col = table.column_index_any(SUMMARY_LABELS);
    let issue_type_col = table.column_index_any(ISSUE_TYPE_LABELS);
    let status_col = table.column_index_any(STATUS_LABELS);
    let assignee_col = table.column_index_any(ASSIGNEE_LABELS);
    let date_col = table.column_index_any(DATE_LABELS);

    for (col, labels) in [
        (summary_col, SUMMARY_LABELS),
        (issue_type_col, ISSUE_TYPE_LABELS),
        (status_col, STATUS_LABELS),
        (assignee_col, ASSIGNEE_LABELS),
        (date_col, DATE_LABELS),
    ] {
        if col.is_none() {
            mapped.notices.push(Notice::MissingColumn {
                column: labels[0].to_string(),
                sheet: kind.sheet_name().to_string(),
                file: file_label.to_string(),
            });
        }
    }

    let name_options = CanonicalizeOptions {
        first_token: kind == SheetKind::Sprint,
    };

    let (coerced_dates, bad_dates) = match date_col {
        Some(col) => {
            let cells: Vec<Cell> = table
                .rows
                .iter()
                .map(|row| row.get(col).cloned().unwrap_or_default())
                .collect();
            dates::coerce_date_column(&cells)
        }
        None => (vec![None; table.rows.len()], 0),
    };

    for (row, date) in table.rows.iter().zip(coerced_dates) {
        let mut record = TaskRecord::new(text_at(row, summary_col), kind, month);
        record.issue_type = text_at(row, issue_type_col);
        record.status = text_at(row, status_col);

        // Only text cells carry a name; numeric/bool/date junk in the
        // assignee column maps to missing, not to its display form
        let raw_assignee = assignee_col.and_then(|col| row.get(col)).and_then(Cell::as_text);
        record.assignee = canonicalize(raw_assignee, name_options);
        record.date = date;

        mapped.records.push(record);
    }

    if bad_dates > 0 {
        mapped.notices.push(Notice::UnparseableDates {
            column: date_col
                .map(|col| table.columns[col].clone())
                .unwrap_or_else(|| DATE_LABELS[0].to_string()),
            count: bad_dates,
        });
    }

    mapped
}

fn text_at(row: &[Cell], col: Option<usize>) -> String {
    col.and_then(|c| row.get(c)).map(Cell::to_display).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn table(columns: &[&str], rows: Vec<Vec<Cell>>) -> RowTable {
        let mut table = RowTable::new(columns.iter().map(|c| (*c).to_string()).collect());
        table.rows = rows;
        table
    }

    fn text(value: &str) -> Cell {
        Cell::Text(value.into())
    }

    #[test]
    fn loop_rows_map_verbatim_columns() {
        let table = table(
            &["Summary", "Issue Type", "Status", "Assignee", "Date"],
            vec![vec![
                text("Rotate keys"),
                text("Chore"),
                text("Done"),
                text("Ajay"),
                Cell::Date(NaiveDate::from_ymd_opt(2024, 5, 7).unwrap()),
            ]],
        );

        let mapped = records_from_table(&table, SheetKind::Loop, "May", "May.xlsx");
        assert!(mapped.notices.is_empty());
        assert_eq!(mapped.records.len(), 1);

        let record = &mapped.records[0];
        assert_eq!(record.summary, "Rotate keys");
        assert_eq!(record.status, "Done");
        // Canonicalized through the alias table
        assert_eq!(record.assignee.as_deref(), Some("Ajay Kumar"));
        assert_eq!(record.source_sheet, SheetKind::Loop);
    }

    #[test]
    fn sprint_rows_accept_aliased_columns_and_split_names() {
        let table = table(
            &["Tasks List", "Issue Type", "Status", "Resource Name", "Created"],
            vec![vec![
                text("Build pipeline"),
                text("Story"),
                text("In Progress"),
                text("Manoj Singh Rawat"),
                text("2024-05-09"),
            ]],
        );

        let mapped = records_from_table(&table, SheetKind::Sprint, "May", "May.xlsx");
        assert!(mapped.notices.is_empty());

        let record = &mapped.records[0];
        assert_eq!(record.summary, "Build pipeline");
        assert_eq!(record.date, Some(NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()));
        // First token "Manoj" is itself an alias key
        assert_eq!(record.assignee.as_deref(), Some("Manoj Singh"));
    }

    #[test]
    fn missing_column_degrades_with_notice() {
        let table = table(
            &["Summary", "Issue Type", "Assignee", "Date"],
            vec![vec![text("No status here"), text("Bug"), text("Sneha"), Cell::Empty]],
        );

        let mapped = records_from_table(&table, SheetKind::Loop, "May", "May.xlsx");
        assert_eq!(
            mapped.notices,
            vec![Notice::MissingColumn {
                column: "Status".into(),
                sheet: "Loop Tasks".into(),
                file: "May.xlsx".into(),
            }]
        );
        // Record still produced, status empty therefore pending
        assert_eq!(mapped.records.len(), 1);
        assert!(!mapped.records[0].is_done());
    }

    #[test]
    fn unparseable_dates_yield_one_aggregate_notice() {
        let table = table(
            &["Summary", "Issue Type", "Status", "Assignee", "Date"],
            vec![
                vec![text("a"), text("Bug"), text("Done"), text("Sai"), text("not-a-date")],
                vec![text("b"), text("Bug"), text("To Do"), text("Sai"), text("??")],
                vec![text("c"), text("Bug"), text("Done"), text("Sai"), text("2024-05-01")],
            ],
        );

        let mapped = records_from_table(&table, SheetKind::Loop, "May", "May.xlsx");
        assert_eq!(
            mapped.notices,
            vec![Notice::UnparseableDates {
                column: "Date".into(),
                count: 2,
            }]
        );
        assert_eq!(mapped.records.iter().filter(|r| r.date.is_none()).count(), 2);
    }

    #[test]
    fn empty_table_maps_to_empty_output() {
        let mapped = records_from_table(&RowTable::default(), SheetKind::Sprint, "May", "May.xlsx");
        assert!(mapped.records.is_empty());
        assert!(mapped.notices.is_empty());
    }

    #[test]
    fn non_text_assignee_is_none() {
        let table = table(
            &["Summary", "Issue Type", "Status", "Assignee", "Date"],
            vec![
                vec![text("numbered"), text("Task"), text("To Do"), Cell::Number(5.0), Cell::Empty],
                vec![text("flagged"), text("Task"), text("To Do"), Cell::Bool(true), Cell::Empty],
                vec![
                    text("dated"),
                    text("Task"),
                    text("To Do"),
                    Cell::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
                    Cell::Empty,
                ],
            ],
        );
        let mapped = records_from_table(&table, SheetKind::Loop, "May", "May.xlsx");
        assert!(mapped.records.iter().all(|r| r.assignee.is_none()));
    }

    #[test]
    fn blank_assignee_is_none() {
        let table = table(
            &["Summary", "Issue Type", "Status", "Assignee", "Date"],
            vec![vec![text("orphan"), text("Task"), text("To Do"), Cell::Empty, Cell::Empty]],
        );
        let mapped = records_from_table(&table, SheetKind::Loop, "May", "May.xlsx");
        assert_eq!(mapped.records[0].assignee, None);
        // An empty date cell is missing data, not a coercion failure
        assert!(mapped.notices.is_empty());
    }
}
