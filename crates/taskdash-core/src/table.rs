//! Tabular primitives
//!
//! The row loader produces a [`RowTable`]: header-derived column names plus
//! untyped cell rows. Everything downstream of the loader works on this
//! structure until rows are mapped into [`crate::TaskRecord`]s.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Cell
// ============================================================================

/// One untyped spreadsheet cell
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    /// Text content, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Render the cell for display; numbers drop a trailing `.0`
    pub fn to_display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.clone(),
            Cell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            Cell::Number(n) => format!("{n}"),
            Cell::Bool(b) => b.to_string(),
            Cell::Date(date) => date.to_string(),
        }
    }
}

// ============================================================================
// RowTable
// ============================================================================

/// A table of rows with header-derived column names
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowTable {
    /// Column labels from the header row
    pub columns: Vec<String>,
    /// Data rows; each row has `columns.len()` cells
    pub rows: Vec<Vec<Cell>>,
}

impl RowTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Trim leading/trailing whitespace from every column label.
    ///
    /// Idempotent: normalizing twice equals normalizing once. No-op on an
    /// empty table.
    pub fn normalize_columns(&mut self) {
        for column in &mut self.columns {
            let trimmed = column.trim();
            if trimmed.len() != column.len() {
                *column = trimmed.to_string();
            }
        }
    }

    /// Index of a column by (already normalized) label
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Index of the first matching label from a list of accepted aliases
    pub fn column_index_any(&self, labels: &[&str]) -> Option<usize> {
        labels.iter().find_map(|label| self.column_index(label))
    }

    /// Cell at (row, column label); `Empty` when out of range
    pub fn cell(&self, row: usize, label: &str) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.column_index(label)
            .and_then(|col| self.rows.get(row).and_then(|r| r.get(col)))
            .unwrap_or(&EMPTY)
    }
}

// ============================================================================
// SheetLoad
// ============================================================================

/// Tagged result of loading a named worksheet.
///
/// A missing sheet means "optional data not provided" and is distinct from a
/// sheet that exists but holds no rows; an empty-container sentinel would
/// conflate the two.
#[derive(Clone, Debug, PartialEq)]
pub enum SheetLoad {
    /// The sheet exists; its table may still be empty
    Present(RowTable),
    /// The workbook has no sheet by that name
    Absent,
}

impl SheetLoad {
    /// The table, with `Absent` collapsing to an empty one
    pub fn into_table(self) -> RowTable {
        match self {
            SheetLoad::Present(table) => table,
            SheetLoad::Absent => RowTable::default(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, SheetLoad::Absent)
    }
}
