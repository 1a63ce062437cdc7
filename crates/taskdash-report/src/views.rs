//! Derived views: trends, heatmaps, contributor rankings, incomplete-task
//! summaries
//!
//! These mirror the dashboard's chart inputs. Date-keyed views silently skip
//! records whose date is missing; status/type/assignee views keep them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use taskdash_core::{dates, MonthLabel, TaskRecord};

use crate::{value_counts, UNASSIGNED};

/// Completed-task counts per issue type, descending
pub fn completed_type_counts(records: &[TaskRecord]) -> Vec<(String, usize)> {
    value_counts(records, |r| r.is_done().then(|| r.issue_type.clone()))
}

/// Completed-task counts per assignee, descending. Assignee-less records
/// are skipped, matching the dashboard's contributor chart.
pub fn top_contributors(records: &[TaskRecord]) -> Vec<(String, usize)> {
    value_counts(records, |r| {
        if r.is_done() {
            r.assignee.clone()
        } else {
            None
        }
    })
}

/// Completions per (month, calendar day). Completed, dated records only;
/// absent days simply do not appear.
pub fn completion_heatmap(records: &[TaskRecord]) -> BTreeMap<(MonthLabel, u32), usize> {
    let mut heatmap = BTreeMap::new();
    for record in records {
        if !record.is_done() {
            continue;
        }
        if let Some(date) = record.date {
            *heatmap
                .entry((record.source_month.clone(), date.day()))
                .or_insert(0) += 1;
        }
    }
    heatmap
}

/// Task counts per (month-period "YYYY-MM", status). Dateless records are
/// excluded; they have no period.
pub fn completion_trend(records: &[TaskRecord]) -> BTreeMap<(String, String), usize> {
    let mut trend = BTreeMap::new();
    for record in records {
        if let Some(date) = record.date {
            *trend
                .entry((dates::month_period(date), record.status.clone()))
                .or_insert(0) += 1;
        }
    }
    trend
}

/// Task counts per (date, month label), for the load-over-time line
pub fn daily_load(records: &[TaskRecord]) -> BTreeMap<(NaiveDate, MonthLabel), usize> {
    let mut load = BTreeMap::new();
    for record in records {
        if let Some(date) = record.date {
            *load.entry((date, record.source_month.clone())).or_insert(0) += 1;
        }
    }
    load
}

/// Unique pending-task summaries per (month, assignee).
///
/// Set-valued by construction: summaries are collected into a `BTreeSet`
/// per group, so a summary containing a delimiter character cannot corrupt
/// the aggregation the way a join-then-split scheme would. Summaries are
/// trimmed; assignee-less records group under `(unassigned)`.
pub fn incomplete_summaries(
    records: &[TaskRecord],
) -> BTreeMap<(MonthLabel, String), BTreeSet<String>> {
    let mut groups: BTreeMap<(MonthLabel, String), BTreeSet<String>> = BTreeMap::new();
    for record in records {
        if record.is_done() {
            continue;
        }
        let assignee = record
            .assignee
            .clone()
            .unwrap_or_else(|| UNASSIGNED.to_string());
        groups
            .entry((record.source_month.clone(), assignee))
            .or_default()
            .insert(record.summary.trim().to_string());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use taskdash_core::SheetKind;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn record(
        summary: &str,
        status: &str,
        assignee: Option<&str>,
        month: &str,
        day: Option<NaiveDate>,
    ) -> TaskRecord {
        let mut r = TaskRecord::new(summary, SheetKind::Sprint, month)
            .status(status)
            .issue_type("Task");
        r.assignee = assignee.map(String::from);
        r.date = day;
        r
    }

    #[test]
    fn heatmap_counts_completed_dated_records_only() {
        let records = vec![
            record("a", "Done", None, "May", Some(date(2024, 5, 6))),
            record("b", "Done", None, "May", Some(date(2024, 5, 6))),
            record("c", "Done", None, "May", None), // dateless, excluded
            record("d", "To Do", None, "May", Some(date(2024, 5, 7))), // pending, excluded
            record("e", "Done", None, "June", Some(date(2024, 6, 6))),
        ];

        let heatmap = completion_heatmap(&records);
        assert_eq!(heatmap.get(&("May".into(), 6)), Some(&2));
        assert_eq!(heatmap.get(&("May".into(), 7)), None);
        assert_eq!(heatmap.get(&("June".into(), 6)), Some(&1));
        assert_eq!(heatmap.len(), 2);
    }

    #[test]
    fn trend_buckets_by_month_period() {
        let records = vec![
            record("a", "Done", None, "May", Some(date(2024, 5, 2))),
            record("b", "Done", None, "May", Some(date(2024, 5, 28))),
            record("c", "To Do", None, "May", Some(date(2024, 5, 9))),
            record("d", "Done", None, "June", None), // no period
        ];

        let trend = completion_trend(&records);
        assert_eq!(trend.get(&("2024-05".into(), "Done".into())), Some(&2));
        assert_eq!(trend.get(&("2024-05".into(), "To Do".into())), Some(&1));
        assert_eq!(trend.values().sum::<usize>(), 3);
    }

    #[test]
    fn dateless_record_counts_in_status_but_not_period_grouping() {
        use crate::{group_counts, GroupKey};

        let records = vec![
            record("a", "Done", None, "May", None),
            record("b", "Done", None, "May", Some(date(2024, 5, 2))),
        ];

        let by_status = group_counts(&records, &[GroupKey::Status]).unwrap();
        assert_eq!(by_status.get(&["Done"]), 2);

        let trend = completion_trend(&records);
        assert_eq!(trend.values().sum::<usize>(), 1);
    }

    #[test]
    fn contributors_ranked_by_completed_count() {
        let records = vec![
            record("a", "Done", Some("Sneha Guthe"), "May", None),
            record("b", "Done", Some("Sneha Guthe"), "May", None),
            record("c", "Done", Some("Ajay Kumar"), "May", None),
            record("d", "To Do", Some("Ajay Kumar"), "May", None),
            record("e", "Done", None, "May", None),
        ];

        assert_eq!(
            top_contributors(&records),
            vec![("Sneha Guthe".to_string(), 2), ("Ajay Kumar".to_string(), 1)]
        );
    }

    #[test]
    fn completed_types_ranked() {
        let mut records = vec![
            record("a", "Done", None, "May", None),
            record("b", "Done", None, "May", None),
            record("c", "To Do", None, "May", None),
        ];
        records[0].issue_type = "Bug".into();
        records[1].issue_type = "Story".into();
        records[2].issue_type = "Bug".into();

        let counts = completed_type_counts(&records);
        assert_eq!(counts, vec![("Bug".to_string(), 1), ("Story".to_string(), 1)]);
    }

    #[test]
    fn incomplete_summaries_deduplicate_per_group() {
        let records = vec![
            record("  Fix flaky test ", "To Do", Some("A"), "May", None),
            record("Fix flaky test", "In Progress", Some("A"), "May", None),
            record("Write docs", "To Do", Some("A"), "May", None),
            record("Fix flaky test", "To Do", Some("A"), "June", None),
            record("Done thing", "Done", Some("A"), "May", None), // completed, excluded
            record("Orphan", "To Do", None, "May", None),
        ];

        let groups = incomplete_summaries(&records);
        let may_a = &groups[&("May".to_string(), "A".to_string())];
        assert_eq!(may_a.len(), 2);
        assert!(may_a.contains("Fix flaky test"));
        assert!(may_a.contains("Write docs"));

        assert!(groups.contains_key(&("June".to_string(), "A".to_string())));
        assert!(groups.contains_key(&("May".to_string(), UNASSIGNED.to_string())));
    }

    #[test]
    fn summaries_with_commas_survive_intact() {
        // The join-then-split scheme this replaces would shred this summary
        let records = vec![record(
            "Update foo, bar, and baz configs",
            "To Do",
            Some("A"),
            "May",
            None,
        )];

        let groups = incomplete_summaries(&records);
        let set = &groups[&("May".to_string(), "A".to_string())];
        assert_eq!(set.len(), 1);
        assert!(set.contains("Update foo, bar, and baz configs"));
    }

    #[test]
    fn daily_load_counts_by_date_and_month() {
        let records = vec![
            record("a", "Done", None, "May", Some(date(2024, 5, 2))),
            record("b", "To Do", None, "May", Some(date(2024, 5, 2))),
            record("c", "Done", None, "June", Some(date(2024, 5, 2))),
        ];

        let load = daily_load(&records);
        assert_eq!(load.get(&(date(2024, 5, 2), "May".into())), Some(&2));
        assert_eq!(load.get(&(date(2024, 5, 2), "June".into())), Some(&1));
    }

    #[test]
    fn views_are_empty_on_empty_input() {
        assert!(completion_heatmap(&[]).is_empty());
        assert!(completion_trend(&[]).is_empty());
        assert!(daily_load(&[]).is_empty());
        assert!(incomplete_summaries(&[]).is_empty());
        assert!(top_contributors(&[]).is_empty());
        assert!(completed_type_counts(&[]).is_empty());
    }
}
