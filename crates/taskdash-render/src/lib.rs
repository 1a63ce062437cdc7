//! # taskdash-render
//!
//! Text-table and JSON output for taskdash aggregates.
//!
//! The charting layer proper is an external collaborator; this crate turns
//! the aggregation results into the normalized tables it consumes: aligned
//! text tables for terminals, JSON datasets for anything else.
//!
//! ## Example
//!
//! ```rust
//! use taskdash_render::TextTable;
//!
//! let table = TextTable::new(vec!["Status".into(), "Count".into()])
//!     .row(vec!["Done".into(), "14".into()])
//!     .row(vec!["To Do".into(), "16".into()]);
//!
//! let rendered = table.to_string();
//! assert!(rendered.starts_with("Status | Count"));
//! ```

use serde::Serialize;
use thiserror::Error;

mod tables;

pub use tables::{
    grouped_counts_table, metrics_table, pivot_table, ranking_table, records_table,
    summaries_table,
};

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize any aggregate to pretty JSON for the charting layer
pub fn to_json<T: Serialize>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(value)?)
}

// ============================================================================
// TextTable
// ============================================================================

/// An aligned plain-text table
#[derive(Clone, Debug, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row (builder pattern). Short rows are padded on render.
    pub fn row(mut self, cells: Vec<String>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(String::len).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i >= widths.len() {
                    widths.push(cell.len());
                } else if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }
        widths
    }
}

impl std::fmt::Display for TextTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let widths = self.column_widths();

        let render_row = |cells: &[String]| -> String {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!("{cell:<width$}")
                })
                .collect();
            padded.join(" | ").trim_end().to_string()
        };

        writeln!(f, "{}", render_row(&self.headers))?;
        let rule_width = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        writeln!(f, "{}", "-".repeat(rule_width))?;
        for row in &self.rows {
            writeln!(f, "{}", render_row(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn columns_align_to_widest_cell() {
        let table = TextTable::new(vec!["Name".into(), "Count".into()])
            .row(vec!["Gopalswamy Ramalingam".into(), "3".into()])
            .row(vec!["Palan".into(), "12".into()]);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "Gopalswamy Ramalingam | 3");

        // Separator sits at the same offset in header and every data row
        let sep = lines[0].find('|').unwrap();
        assert_eq!(lines[2].find('|'), Some(sep));
        assert_eq!(lines[3].find('|'), Some(sep));
        assert!(lines[3].starts_with("Palan "));
        assert!(lines[3].ends_with("| 12"));
    }

    #[test]
    fn short_rows_are_padded() {
        let table = TextTable::new(vec!["A".into(), "B".into()]).row(vec!["x".into()]);
        let rendered = table.to_string();
        assert!(rendered.lines().last().unwrap().starts_with("x |"));
    }

    #[test]
    fn json_round_trips_through_serde() {
        #[derive(Serialize)]
        struct Tile {
            total: usize,
        }
        let json = to_json(&Tile { total: 30 }).unwrap();
        assert!(json.contains("\"total\": 30"));
    }
}
