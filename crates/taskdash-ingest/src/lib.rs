//! # taskdash-ingest
//!
//! Workbook ingestion for the taskdash reporting pipeline.
//!
//! This crate provides:
//! - The row loader: a named worksheet read into a [`RowTable`], with a
//!   missing sheet reported as [`SheetLoad::Absent`] rather than an error
//! - Row-to-record mapping, including the Sprint sheet's column aliases and
//!   assignee canonicalization
//! - Month discovery from a working directory of `<Month>.xlsx` files
//! - Whole-month and multi-month loading entry points
//!
//! Loads are on-demand, synchronous and unretried: each user selection
//! triggers one full pass over local, bounded-size files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use taskdash_ingest::load_month;
//!
//! let loaded = load_month(std::path::Path::new("."), "May").unwrap();
//! println!("{} tasks, {} notices", loaded.dataset.len(), loaded.notices.len());
//! ```

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use thiserror::Error;
use tracing::debug;

use taskdash_core::{
    Cell, ComparisonDataset, MonthlyDataset, Notice, RowTable, SheetKind, SheetLoad,
};

mod records;

pub use records::{records_from_table, MappedRecords};

// ============================================================================
// Errors
// ============================================================================

/// Fatal ingestion failure. Missing sheets and bad cell values are not
/// errors; they degrade to notices.
#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Workbook error in {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },
}

// ============================================================================
// Row Loader
// ============================================================================

/// Read a named worksheet into a [`RowTable`].
///
/// The first row becomes the column labels (whitespace-trimmed); remaining
/// rows become data. A sheet absent from the workbook yields
/// [`SheetLoad::Absent`]; any other failure is fatal.
pub fn load_sheet(path: &Path, sheet_name: &str) -> Result<SheetLoad, WorkbookError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| match source {
        XlsxError::Io(io) => WorkbookError::Io {
            path: path.to_path_buf(),
            source: io,
        },
        other => WorkbookError::Workbook {
            path: path.to_path_buf(),
            source: other,
        },
    })?;

    let range = match workbook.worksheet_range(sheet_name) {
        Ok(range) => range,
        Err(XlsxError::WorksheetNotFound(_)) => return Ok(SheetLoad::Absent),
        Err(source) => {
            return Err(WorkbookError::Workbook {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => header.iter().map(|cell| convert_cell(cell).to_display()).collect(),
        None => Vec::new(),
    };

    let mut table = RowTable::new(columns);
    for row in rows {
        table.rows.push(row.iter().map(convert_cell).collect());
    }
    // Pad short rows so positional lookups stay in range
    let width = table.columns.len();
    for row in &mut table.rows {
        row.resize(width, Cell::Empty);
    }
    table.normalize_columns();

    debug!(sheet = sheet_name, rows = table.len(), "loaded worksheet");
    Ok(SheetLoad::Present(table))
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Cell::Date(datetime.date()),
            None => Cell::Empty,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

// ============================================================================
// Month discovery
// ============================================================================

/// Months available in a working directory: the sorted base names of its
/// `*.xlsx` files.
pub fn discover_months(dir: &Path) -> Result<Vec<String>, WorkbookError> {
    let entries = std::fs::read_dir(dir).map_err(|source| WorkbookError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut months = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| WorkbookError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("xlsx") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                // Editor lock files start with ~$
                if !stem.starts_with("~$") {
                    months.push(stem.to_string());
                }
            }
        }
    }
    months.sort();
    Ok(months)
}

/// Path of the workbook backing a month label
pub fn month_path(dir: &Path, month: &str) -> PathBuf {
    dir.join(format!("{month}.xlsx"))
}

// ============================================================================
// Month loading
// ============================================================================

/// A loaded month plus the notices its load produced
#[derive(Clone, Debug)]
pub struct LoadedMonth {
    pub dataset: MonthlyDataset,
    pub notices: Vec<Notice>,
}

/// A loaded cross-month union plus accumulated notices
#[derive(Clone, Debug)]
pub struct LoadedComparison {
    pub dataset: ComparisonDataset,
    pub notices: Vec<Notice>,
}

/// Load one month's workbook: both sheets, rows mapped to records, Sprint
/// first, then Loop.
pub fn load_month(dir: &Path, month: &str) -> Result<LoadedMonth, WorkbookError> {
    let path = month_path(dir, month);
    let file_label = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(month)
        .to_string();

    let mut dataset = MonthlyDataset::new(month);
    let mut notices = Vec::new();

    for kind in SheetKind::all() {
        match load_sheet(&path, kind.sheet_name())? {
            SheetLoad::Present(table) => {
                let mapped = records_from_table(&table, kind, month, &file_label);
                dataset.records.extend(mapped.records);
                notices.extend(mapped.notices);
            }
            SheetLoad::Absent => notices.push(Notice::MissingSheet {
                sheet: kind.sheet_name().to_string(),
                file: file_label.clone(),
            }),
        }
    }

    Ok(LoadedMonth { dataset, notices })
}

/// Load and union several months. Selection order is preserved; records are
/// not de-duplicated across workbooks.
pub fn load_months<S: AsRef<str>>(
    dir: &Path,
    months: &[S],
) -> Result<LoadedComparison, WorkbookError> {
    if months.is_empty() {
        return Ok(LoadedComparison {
            dataset: ComparisonDataset::default(),
            notices: vec![Notice::NoDataSelected],
        });
    }

    let mut datasets = Vec::new();
    let mut notices = Vec::new();
    for month in months {
        let loaded = load_month(dir, month.as_ref())?;
        datasets.push(loaded.dataset);
        notices.extend(loaded.notices);
    }

    Ok(LoadedComparison {
        dataset: ComparisonDataset::from_months(datasets),
        notices,
    })
}
