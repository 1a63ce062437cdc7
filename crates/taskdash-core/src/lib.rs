//! # taskdash-core
//!
//! Core domain model for the taskdash reporting pipeline.
//!
//! This crate provides:
//! - Domain types: `TaskRecord`, `SheetKind`, `MonthlyDataset`, `ComparisonDataset`
//! - Tabular primitives: `RowTable`, `Cell`, `SheetLoad`
//! - Normalizers: resource-name canonicalization (`names`), tolerant date
//!   coercion (`dates`)
//! - The recoverable-condition model: `Notice`, `Severity`
//!
//! ## Example
//!
//! ```rust
//! use taskdash_core::{SheetKind, TaskRecord};
//!
//! let record = TaskRecord::new("Fix login redirect", SheetKind::Sprint, "May")
//!     .issue_type("Bug")
//!     .status("Done")
//!     .assignee("Ajay Kumar");
//!
//! assert!(record.is_done());
//! assert_eq!(record.source_month, "May");
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod dates;
pub mod names;
pub mod notice;
pub mod table;

pub use notice::{Notice, Severity};
pub use table::{Cell, RowTable, SheetLoad};

// ============================================================================
// Type Aliases
// ============================================================================

/// Label identifying an originating workbook (its base file name, e.g. "May")
pub type MonthLabel = String;

/// The sole status value recognized as terminal. Comparison is exact and
/// case-sensitive; every other value, including missing, counts as pending.
pub const DONE_STATUS: &str = "Done";

// ============================================================================
// SheetKind
// ============================================================================

/// Which worksheet a record originated from
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SheetKind {
    /// The "Sprint Tasks" worksheet
    Sprint,
    /// The "Loop Tasks" worksheet
    Loop,
}

impl SheetKind {
    /// The worksheet name as it appears in the workbook
    pub fn sheet_name(&self) -> &'static str {
        match self {
            SheetKind::Sprint => "Sprint Tasks",
            SheetKind::Loop => "Loop Tasks",
        }
    }

    /// Short label used in grouped output ("Sprint" / "Loop")
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetKind::Sprint => "Sprint",
            SheetKind::Loop => "Loop",
        }
    }

    /// Both sheet kinds, in load order
    pub fn all() -> [SheetKind; 2] {
        [SheetKind::Sprint, SheetKind::Loop]
    }
}

impl std::fmt::Display for SheetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TaskRecord
// ============================================================================

/// The canonical unit of the pipeline: one task row, normalized.
///
/// Records are constructed fresh on every load, live for one aggregation
/// pass, and are discarded once the views are produced. There is no
/// persistence and no identity beyond field values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task title/description
    pub summary: String,
    /// Issue type as recorded in the sheet (free-form)
    pub issue_type: String,
    /// Status as recorded in the sheet; see [`DONE_STATUS`]
    pub status: String,
    /// Assignee, canonicalized where the ingest layer applied the alias table
    pub assignee: Option<String>,
    /// Creation date; `None` when the source value was unparseable
    pub date: Option<NaiveDate>,
    /// Worksheet of origin
    pub source_sheet: SheetKind,
    /// Workbook of origin (base file name)
    pub source_month: MonthLabel,
}

impl TaskRecord {
    /// Create a new record with the given summary and provenance tags
    pub fn new(
        summary: impl Into<String>,
        source_sheet: SheetKind,
        source_month: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            issue_type: String::new(),
            status: String::new(),
            assignee: None,
            date: None,
            source_sheet,
            source_month: source_month.into(),
        }
    }

    /// Set the issue type
    pub fn issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    /// Set the status
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the assignee
    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Set the creation date
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Exact, case-sensitive match against [`DONE_STATUS`]
    pub fn is_done(&self) -> bool {
        self.status == DONE_STATUS
    }

    /// Month-period bucket ("YYYY-MM") derived from the date, if present
    pub fn month_period(&self) -> Option<String> {
        self.date.map(dates::month_period)
    }
}

// ============================================================================
// MonthlyDataset
// ============================================================================

/// One month's records: the Sprint and Loop tables for a single workbook,
/// concatenated, each record tagged with the month label.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MonthlyDataset {
    /// The month label shared by every record
    pub month: MonthLabel,
    /// Records in sheet order (Sprint first, then Loop)
    pub records: Vec<TaskRecord>,
}

impl MonthlyDataset {
    /// Create an empty dataset for the given month
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count of records with terminal status
    pub fn completed(&self) -> usize {
        self.records.iter().filter(|r| r.is_done()).count()
    }

    /// Count of records without terminal status
    pub fn pending(&self) -> usize {
        self.records.iter().filter(|r| !r.is_done()).count()
    }
}

// ============================================================================
// ComparisonDataset
// ============================================================================

/// A union of monthly datasets across a selected set of months.
///
/// No de-duplication is performed: a record appearing in two workbooks is
/// counted twice. Cross-month views are defined over this union.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ComparisonDataset {
    /// Month labels in selection order
    pub months: Vec<MonthLabel>,
    /// All records from all selected months
    pub records: Vec<TaskRecord>,
}

impl ComparisonDataset {
    /// Build a union from a sequence of monthly datasets
    pub fn from_months(datasets: impl IntoIterator<Item = MonthlyDataset>) -> Self {
        let mut months = Vec::new();
        let mut records = Vec::new();
        for dataset in datasets {
            months.push(dataset.month);
            records.extend(dataset.records);
        }
        Self { months, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
