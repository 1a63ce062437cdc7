//! Tolerant date coercion
//!
//! The Date / Created columns mix native Excel dates with free-typed strings.
//! Coercion never fails: a value that matches no known format becomes
//! missing, and the caller reports one aggregate notice per column pass.
//! Records with a missing date are excluded from date-keyed views only.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::table::Cell;

/// String formats tried in order when a date arrives as text
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%b-%Y"];

/// Datetime formats tried when the text carries a time component
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date from free-form text. `None` when nothing matches.
pub fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Coerce a cell to a date. Native date cells pass through; text cells are
/// parsed; everything else is missing.
pub fn coerce_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(date) => Some(*date),
        Cell::Text(text) => parse_date_str(text),
        _ => None,
    }
}

/// Coerce a whole column, returning the dates and how many values failed.
///
/// Empty cells do not count as failures; only present-but-unparseable values
/// do. The failure count feeds one aggregate notice at the caller.
pub fn coerce_date_column(cells: &[Cell]) -> (Vec<Option<NaiveDate>>, usize) {
    let mut failed = 0;
    let dates = cells
        .iter()
        .map(|cell| {
            let date = coerce_date(cell);
            if date.is_none() && !matches!(cell, Cell::Empty) {
                failed += 1;
            }
            date
        })
        .collect();
    (dates, failed)
}

/// Month-period bucket for trend views: "YYYY-MM"
pub fn month_period(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
