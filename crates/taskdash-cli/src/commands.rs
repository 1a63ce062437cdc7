//! Subcommand implementations
//!
//! Each command is one full reload-and-recompute pass: load the selected
//! workbooks, aggregate, print. Recoverable conditions surface as log lines;
//! only unexpected I/O failures abort with a non-zero exit.

use std::path::Path;

use anyhow::Result;
use serde_json::json;
use tracing::{info, warn};

use taskdash_core::{Notice, Severity, TaskRecord};
use taskdash_ingest::{discover_months, load_month, load_months};
use taskdash_render::{
    grouped_counts_table, metrics_table, pivot_table, ranking_table, records_table,
    summaries_table,
};
use taskdash_report::{
    completed_type_counts, completion_heatmap, completion_trend, daily_load, drop_dateless,
    filter_by_assignee, group_counts, incomplete_summaries, pivot_counts, split_by_completion,
    summary_metrics, top_contributors, GroupKey,
};

use crate::OutputFormat;

fn emit_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.severity() {
            Severity::Warning => warn!("{notice}"),
            Severity::Info => info!("{notice}"),
        }
    }
}

fn print_section(title: &str, body: &str) {
    println!("### {title}");
    println!("{body}");
}

// ============================================================================
// months
// ============================================================================

pub fn months(dir: &Path) -> Result<()> {
    let months = discover_months(dir)?;
    if months.is_empty() {
        info!("No workbooks found in {}", dir.display());
        println!("No valid Excel files found in {}", dir.display());
        return Ok(());
    }
    for month in months {
        println!("{month}");
    }
    Ok(())
}

// ============================================================================
// summary
// ============================================================================

pub fn summary(dir: &Path, month: &str, assignee: Option<&str>) -> Result<()> {
    let loaded = load_month(dir, month)?;
    emit_notices(&loaded.notices);

    let records = &loaded.dataset.records;
    if records.is_empty() {
        println!("No data available for {month}.");
        return Ok(());
    }

    print_section("Summary Metrics", &metrics_table(&summary_metrics(records)).to_string());
    print_section(
        "Completed Task Types",
        &ranking_table("Task Type", &completed_type_counts(records)).to_string(),
    );
    print_section(
        "Top Contributors",
        &ranking_table("Assignee", &top_contributors(records)).to_string(),
    );

    if let Some(name) = assignee {
        print_assignee_breakdown(records, name)?;
    }

    Ok(())
}

fn print_assignee_breakdown(records: &[TaskRecord], name: &str) -> Result<()> {
    let tasks = filter_by_assignee(records, name);
    if tasks.is_empty() {
        println!("No tasks found for {name}.");
        return Ok(());
    }

    print_section(
        &format!("Summary for {name}"),
        &metrics_table(&summary_metrics(&tasks)).to_string(),
    );

    let breakdown = group_counts(&tasks, &[GroupKey::Status])?;
    print_section(
        &format!("Task Status Breakdown for {name}"),
        &grouped_counts_table(&breakdown).to_string(),
    );

    let split = split_by_completion(&tasks);
    if split.pending.is_empty() {
        println!("No pending tasks for {name}.");
    } else {
        print_section("Pending Tasks", &records_table(&split.pending).to_string());
    }
    if split.completed.is_empty() {
        println!("No completed tasks for {name}.");
    } else {
        print_section("Completed Tasks", &records_table(&split.completed).to_string());
    }

    Ok(())
}

// ============================================================================
// resources
// ============================================================================

pub fn resources(
    dir: &Path,
    person: Option<&str>,
    months: &[String],
    format: OutputFormat,
) -> Result<()> {
    let selected = if months.is_empty() {
        discover_months(dir)?
    } else {
        months.to_vec()
    };

    let loaded = load_months(dir, &selected)?;
    emit_notices(&loaded.notices);
    if loaded.dataset.is_empty() {
        println!("No data available.");
        return Ok(());
    }

    // Date-keyed mode: rows without a parseable date leave the analysis here
    let mut records = drop_dateless(&loaded.dataset.records);
    if let Some(name) = person {
        records = filter_by_assignee(&records, name);
    }
    if records.is_empty() {
        println!("No dated tasks match the selection.");
        return Ok(());
    }

    let status_by_month = pivot_counts(&records, GroupKey::Month, GroupKey::Status);
    let type_by_month = pivot_counts(&records, GroupKey::Month, GroupKey::Sheet);
    let load = daily_load(&records);
    let split = split_by_completion(&records);
    let heatmap = completion_heatmap(&split.completed);
    let incomplete = incomplete_summaries(&records);

    match format {
        OutputFormat::Json => {
            let payload = json!({
                "months": loaded.dataset.months,
                "status_by_month": status_by_month,
                "type_by_month": type_by_month,
                "daily_load": load
                    .iter()
                    .map(|((date, month), count)| json!({
                        "date": date.to_string(),
                        "month": month,
                        "count": count,
                    }))
                    .collect::<Vec<_>>(),
                "completion_heatmap": heatmap
                    .iter()
                    .map(|((month, day), count)| json!({
                        "month": month,
                        "day": day,
                        "completions": count,
                    }))
                    .collect::<Vec<_>>(),
                "incomplete_tasks": incomplete
                    .iter()
                    .map(|((month, resource), tasks)| json!({
                        "month": month,
                        "resource": resource,
                        "tasks": tasks,
                    }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => {
            print_section(
                "Task Status Distribution by Month",
                &pivot_table(&status_by_month).to_string(),
            );
            print_section(
                "Task Type Distribution by Month",
                &pivot_table(&type_by_month).to_string(),
            );

            let mut load_table = taskdash_render::TextTable::new(vec![
                "Date".into(),
                "Month".into(),
                "Task Count".into(),
            ]);
            for ((date, month), count) in &load {
                load_table.push_row(vec![date.to_string(), month.clone(), count.to_string()]);
            }
            print_section("Task Load Over Time", &load_table.to_string());

            let mut heatmap_table = taskdash_render::TextTable::new(vec![
                "Month".into(),
                "Day".into(),
                "Completions".into(),
            ]);
            for ((month, day), count) in &heatmap {
                heatmap_table.push_row(vec![month.clone(), day.to_string(), count.to_string()]);
            }
            print_section("Task Completion Heatmap", &heatmap_table.to_string());

            print_section(
                "Uncompleted Tasks by Month",
                &summaries_table(&incomplete).to_string(),
            );
        }
    }

    Ok(())
}

// ============================================================================
// compare
// ============================================================================

pub fn compare(dir: &Path, months: &[String], format: OutputFormat) -> Result<()> {
    if months.is_empty() {
        emit_notices(&[Notice::NoDataSelected]);
        println!("No months selected for comparison.");
        return Ok(());
    }

    let loaded = load_months(dir, months)?;
    emit_notices(&loaded.notices);
    if loaded.dataset.is_empty() {
        println!("No data available for the selected months.");
        return Ok(());
    }

    let records = &loaded.dataset.records;
    let status_dist = pivot_counts(records, GroupKey::Month, GroupKey::Status);
    let type_dist = pivot_counts(records, GroupKey::Month, GroupKey::Sheet);
    let assignee_dist = pivot_counts(records, GroupKey::Month, GroupKey::Assignee);
    // Trend is date-keyed; dateless rows fall out here and only here
    let trend = completion_trend(records);

    match format {
        OutputFormat::Json => {
            let payload = json!({
                "months": loaded.dataset.months,
                "status_distribution": status_dist,
                "type_distribution": type_dist,
                "assignee_distribution": assignee_dist,
                "completion_trend": trend
                    .iter()
                    .map(|((period, status), count)| json!({
                        "month_period": period,
                        "status": status,
                        "count": count,
                    }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => {
            print_section(
                "Task Status Distribution Across Months",
                &pivot_table(&status_dist).to_string(),
            );
            print_section(
                "Task Type Distribution Across Months",
                &pivot_table(&type_dist).to_string(),
            );

            let mut trend_table = taskdash_render::TextTable::new(vec![
                "Month Period".into(),
                "Status".into(),
                "Task Count".into(),
            ]);
            for ((period, status), count) in &trend {
                trend_table.push_row(vec![period.clone(), status.clone(), count.to_string()]);
            }
            print_section("Task Completion Trend Across Months", &trend_table.to_string());

            print_section(
                "Assignee Performance Across Months",
                &pivot_table(&assignee_dist).to_string(),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_with_no_months_is_informational() {
        // No directory access happens on the empty-selection path
        assert!(compare(Path::new("/nonexistent"), &[], OutputFormat::Text).is_ok());
    }
}
