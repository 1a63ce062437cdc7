//! Recoverable-condition model
//!
//! Missing sheets, unparseable dates, absent columns and empty selections
//! degrade to empty or partial results plus a visible message. They are
//! values collected alongside results, not errors: only unexpected I/O
//! failures abort a request.

use serde::{Deserialize, Serialize};

/// How loud a notice should be at the presentation boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

/// A recoverable condition detected during load or aggregation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    /// A requested sheet is absent from a workbook; the caller proceeds
    /// without it
    MissingSheet { sheet: String, file: String },
    /// Some values in a date column failed coercion and became missing
    UnparseableDates { column: String, count: usize },
    /// A required column is absent; dependent views are skipped
    MissingColumn { column: String, sheet: String, file: String },
    /// The user selected zero months/files; no computation attempted
    NoDataSelected,
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::NoDataSelected => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::MissingSheet { sheet, file } => {
                write!(f, "Sheet '{sheet}' not found in {file}. Proceeding without it.")
            }
            Notice::UnparseableDates { column, count } => write!(
                f,
                "{count} value(s) in column '{column}' could not be parsed as dates and will be treated as missing"
            ),
            Notice::MissingColumn { column, sheet, file } => {
                write!(f, "Column '{column}' not found in sheet '{sheet}' of {file}")
            }
            Notice::NoDataSelected => write!(f, "No months selected; nothing to compute"),
        }
    }
}
