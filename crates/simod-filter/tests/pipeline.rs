//! Integration tests for the waterfall filter pipeline.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use simod_filter::{FilterSession, apply, default_criteria, extract};
use simod_map::{ValidatedMapping, map_columns};
use simod_model::{
    Activity, ActivityScope, AttributeConstraint, AttributeFilter, CaseId, CellValue, DateRange,
    EventLog, EventRecord, FilterCriteria, FilterImpact, FilterStatus,
};

const COLUMNS: [&str; 7] = [
    "Case_ID",
    "Activity",
    "start_time",
    "end_time",
    "priority",
    "cost",
    "note",
];

fn columns() -> Vec<String> {
    COLUMNS.iter().map(|c| (*c).to_string()).collect()
}

fn mapping() -> ValidatedMapping {
    ValidatedMapping::new(map_columns(&columns())).expect("example columns validate")
}

fn row(case: &str, activity: &str, start: &str, priority: &str) -> EventRecord {
    let mut fields = BTreeMap::new();
    fields.insert("Case_ID".to_string(), CellValue::text(case));
    fields.insert("Activity".to_string(), CellValue::text(activity));
    fields.insert("start_time".to_string(), CellValue::text(start));
    fields.insert("end_time".to_string(), CellValue::text(start));
    fields.insert("priority".to_string(), CellValue::text(priority));
    EventRecord::new(
        CaseId::new(case).unwrap(),
        Activity::new(activity).unwrap(),
        fields,
    )
}

fn example_log() -> EventLog {
    EventLog::new(
        columns(),
        vec![
            row("1", "A", "2024-01-01T08:00:00", "high"),
            row("1", "B", "2024-01-01T09:00:00", "high"),
            row("2", "A", "2024-01-02T08:00:00", "low"),
            row("2", "C", "2024-01-02T09:00:00", "low"),
        ],
    )
}

fn defaults_for(log: &EventLog, mapping: &ValidatedMapping) -> FilterCriteria {
    let metadata = extract(log, mapping);
    default_criteria(log, mapping, &metadata)
}

fn case_ids(log: &EventLog) -> Vec<&str> {
    log.iter().map(|record| record.case_id.as_str()).collect()
}

#[test]
fn default_criteria_keep_every_row() {
    let log = example_log();
    let mapping = mapping();
    let result = apply(&log, &mapping, &defaults_for(&log, &mapping));

    assert_eq!(result.rows, log);
    assert_eq!(result.impact, FilterImpact::default());
    assert_eq!(result.status(), FilterStatus::Matched(4));
}

#[test]
fn excluding_an_activity_removes_its_whole_case() {
    let log = example_log();
    let mapping = mapping();
    let mut criteria = defaults_for(&log, &mapping);
    criteria.exclude_activity(&Activity::new("C").unwrap());

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(case_ids(&result.rows), ["1", "1"]);
    assert_eq!(result.impact.activity_removed, 2);
    assert_eq!(result.impact.total(), 2);
}

#[test]
fn attribute_filter_removes_non_matching_case() {
    let log = example_log();
    let mapping = mapping();
    let mut criteria = defaults_for(&log, &mapping);
    criteria.set_attribute_filter(AttributeFilter::categorical("priority", ["high"]));

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(case_ids(&result.rows), ["1", "1"]);
    assert_eq!(result.impact.attribute_removed, 2);
    assert_eq!(result.impact.activity_removed, 0);
}

#[test]
fn attribute_filter_is_charged_before_activity_filter() {
    let log = example_log();
    let mapping = mapping();
    let mut criteria = defaults_for(&log, &mapping);
    criteria.set_attribute_filter(AttributeFilter::categorical("priority", ["high"]));
    criteria.exclude_activity(&Activity::new("C").unwrap());

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.impact.attribute_removed, 2);
    assert_eq!(result.impact.activity_removed, 0);
}

#[test]
fn narrow_date_range_removes_everything_at_the_date_stage() {
    let log = example_log();
    let mapping = mapping();
    let criteria = FilterCriteria {
        date_range: Some(DateRange::new(
            Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2023, 6, 2, 0, 0, 0).unwrap(),
        )),
        ..defaults_for(&log, &mapping)
    };

    let result = apply(&log, &mapping, &criteria);

    assert!(result.rows.is_empty());
    assert_eq!(result.status(), FilterStatus::NoMatches);
    insta::assert_json_snapshot!(result.impact, @r#"
    {
      "dateRemoved": 4,
      "attributeRemoved": 0,
      "activityRemoved": 0,
      "caseRemoved": 0
    }
    "#);
}

#[test]
fn date_bounds_are_inclusive() {
    let log = example_log();
    let mapping = mapping();
    let criteria = FilterCriteria {
        date_range: Some(DateRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap(),
        )),
        ..defaults_for(&log, &mapping)
    };

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(result.rows.len(), 3);
    assert_eq!(result.impact.date_removed, 1);
}

#[test]
fn open_ended_date_range_only_checks_the_set_bound() {
    let log = example_log();
    let mapping = mapping();
    let criteria = FilterCriteria {
        date_range: Some(DateRange {
            start: Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()),
            end: None,
        }),
        ..defaults_for(&log, &mapping)
    };

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(case_ids(&result.rows), ["2", "2"]);
}

#[test]
fn unparsable_primary_timestamp_survives_the_date_stage() {
    let mut log = example_log();
    log.records[0]
        .fields
        .insert("start_time".to_string(), CellValue::text("not a date"));
    log.records[1].fields.insert("start_time".to_string(), CellValue::Missing);
    let mapping = mapping();
    let criteria = FilterCriteria {
        date_range: Some(DateRange::new(
            Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2023, 6, 2, 0, 0, 0).unwrap(),
        )),
        ..defaults_for(&log, &mapping)
    };

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(case_ids(&result.rows), ["1", "1"]);
    assert_eq!(result.impact.date_removed, 2);
}

#[test]
fn attribute_varying_within_a_case_is_evaluated_per_row() {
    let mut log = example_log();
    log.records[1]
        .fields
        .insert("priority".to_string(), CellValue::text("low"));
    let mapping = mapping();
    let mut criteria = defaults_for(&log, &mapping);
    criteria.set_attribute_filter(AttributeFilter::categorical("priority", ["high"]));

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows.records[0].activity.as_str(), "A");
    assert_eq!(result.rows.records[0].case_id.as_str(), "1");
}

#[test]
fn missing_attribute_values_never_exclude() {
    let mut log = example_log();
    log.records[2].fields.remove("priority");
    log.records[3]
        .fields
        .insert("priority".to_string(), CellValue::Missing);
    let mapping = mapping();
    let mut criteria = defaults_for(&log, &mapping);
    criteria.set_attribute_filter(AttributeFilter::categorical("priority", ["high"]));

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(result.rows, log);
}

#[test]
fn row_scope_removes_only_the_excluded_rows() {
    let log = example_log();
    let mapping = mapping();
    let mut criteria = defaults_for(&log, &mapping);
    criteria.exclude_activity(&Activity::new("C").unwrap());
    criteria.activity_scope = ActivityScope::Rows;

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(case_ids(&result.rows), ["1", "1", "2"]);
    assert_eq!(result.impact.activity_removed, 1);
}

#[test]
fn empty_activity_selection_excludes_every_case() {
    let log = example_log();
    let mapping = mapping();
    let mut criteria = defaults_for(&log, &mapping);
    criteria.included_activities.clear();

    let result = apply(&log, &mapping, &criteria);

    assert!(result.rows.is_empty());
    assert_eq!(result.impact.activity_removed, 4);
}

#[test]
fn case_filter_keeps_only_listed_cases() {
    let log = example_log();
    let mapping = mapping();
    let mut criteria = defaults_for(&log, &mapping);
    criteria.included_case_ids = [CaseId::new("2").unwrap()].into_iter().collect();

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(case_ids(&result.rows), ["2", "2"]);
    assert_eq!(result.impact.case_removed, 2);
}

#[test]
fn empty_log_reports_empty_status() {
    let log = EventLog::new(columns(), Vec::new());
    let mapping = mapping();
    let result = apply(&log, &mapping, &defaults_for(&log, &mapping));

    assert_eq!(result.status(), FilterStatus::EmptyLog);
    assert_eq!(result.impact.total(), 0);
}

#[test]
fn session_replace_recomputes_metadata() {
    let mut session = FilterSession::new(example_log(), mapping());
    assert_eq!(session.metadata().case_count(), 2);

    let smaller = EventLog::new(columns(), vec![row("9", "Z", "2024-03-01", "mid")]);
    session.replace(smaller, mapping());

    assert_eq!(session.metadata().case_count(), 1);
    let criteria = session.default_criteria();
    assert_eq!(session.apply(&criteria).rows.len(), 1);
}

#[test]
fn case_ids_differing_in_whitespace_are_separate_cases() {
    let log = EventLog::new(
        columns(),
        vec![
            row("1", "A", "2024-01-01T08:00:00", "high"),
            row("1 ", "C", "2024-01-01T09:00:00", "high"),
        ],
    );
    let mapping = mapping();
    let mut criteria = defaults_for(&log, &mapping);
    criteria.exclude_activity(&Activity::new("C").unwrap());

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(extract(&log, &mapping).case_count(), 2);
    assert_eq!(case_ids(&result.rows), ["1"]);
    assert_eq!(result.impact.activity_removed, 1);
}

#[test]
fn numeric_defaults_keep_every_kind_of_number() {
    let mut log = example_log();
    let costs = [
        CellValue::Integer(5),
        CellValue::Float(2.5),
        CellValue::text(" 12.0 "),
        CellValue::Missing,
    ];
    for (record, cost) in log.records.iter_mut().zip(costs) {
        record.fields.insert("cost".to_string(), cost);
    }
    let mapping = mapping();
    let criteria = defaults_for(&log, &mapping);
    let cost = criteria
        .attribute_filters
        .iter()
        .find(|filter| filter.column == "cost")
        .unwrap();
    assert_eq!(
        cost.constraint,
        AttributeConstraint::Numeric {
            min: 2.5,
            max: 12.0
        }
    );

    let result = apply(&log, &mapping, &criteria);

    assert_eq!(result.rows, log);
    assert_eq!(result.impact, FilterImpact::default());
}

const ACTIVITIES: [&str; 4] = ["A", "B", "C", "D"];
const PRIORITIES: [&str; 3] = ["high", "low", "mid"];
const STARTS: [&str; 5] = [
    "2024-01-01T08:00:00",
    "2024-01-03T12:30:00",
    "2024-02-10",
    "2024-01-05 07:00",
    "garbage",
];

/// Numeric cells of every kind, plus missing ones.
fn arb_cost() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Missing),
        Just(CellValue::Integer(5)),
        Just(CellValue::Integer(-3)),
        Just(CellValue::Float(2.5)),
        Just(CellValue::Float(-0.75)),
        Just(CellValue::text("7")),
        Just(CellValue::text(" 12.0 ")),
    ]
}

/// Numbers mixed with free text, so the default falls back to categorical.
fn arb_note() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Missing),
        Just(CellValue::Integer(1)),
        Just(CellValue::Float(0.5)),
        Just(CellValue::text("3")),
        Just(CellValue::text("n/a")),
        Just(CellValue::text("late")),
        Just(CellValue::Bool(true)),
    ]
}

fn arb_log() -> impl Strategy<Value = EventLog> {
    let arb_row = (0..5u8, 0..4usize, 0..5usize, 0..3usize, arb_cost(), arb_note());
    prop::collection::vec(arb_row, 0..30).prop_map(|rows| {
        let records = rows
            .into_iter()
            .map(|(case, activity, start, priority, cost, note)| {
                let mut record = row(
                    &case.to_string(),
                    ACTIVITIES[activity],
                    STARTS[start],
                    PRIORITIES[priority],
                );
                record.fields.insert("cost".to_string(), cost);
                record.fields.insert("note".to_string(), note);
                record
            })
            .collect();
        EventLog::new(columns(), records)
    })
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of((0..40i64, 0..40i64)),
        prop::sample::subsequence(PRIORITIES.to_vec(), 0..=3),
        prop::sample::subsequence(ACTIVITIES.to_vec(), 0..=4),
        prop::sample::subsequence(vec![0u8, 1, 2, 3, 4], 0..=3),
        any::<bool>(),
    )
        .prop_map(|(days, priorities, activities, cases, rows_scope)| {
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let mut criteria = FilterCriteria {
                date_range: days.map(|(a, b)| {
                    DateRange::new(
                        base + chrono::Duration::days(a.min(b)),
                        base + chrono::Duration::days(a.max(b)),
                    )
                }),
                included_activities: activities
                    .into_iter()
                    .map(|name| Activity::new(name).unwrap())
                    .collect(),
                included_case_ids: cases
                    .into_iter()
                    .map(|c| CaseId::new(c.to_string()).unwrap())
                    .collect(),
                activity_scope: if rows_scope {
                    ActivityScope::Rows
                } else {
                    ActivityScope::Cases
                },
                ..FilterCriteria::default()
            };
            if !priorities.is_empty() {
                criteria.set_attribute_filter(AttributeFilter::categorical(
                    "priority",
                    priorities,
                ));
            }
            criteria
        })
}

proptest! {
    #[test]
    fn defaults_are_a_no_op(log in arb_log()) {
        let mapping = mapping();
        let result = apply(&log, &mapping, &defaults_for(&log, &mapping));
        prop_assert_eq!(&result.rows, &log);
        prop_assert_eq!(result.impact.total(), 0);
    }

    #[test]
    fn apply_is_idempotent(log in arb_log(), criteria in arb_criteria()) {
        let mapping = mapping();
        let first = apply(&log, &mapping, &criteria);
        let second = apply(&log, &mapping, &criteria);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn impact_sums_to_rows_removed(log in arb_log(), criteria in arb_criteria()) {
        let mapping = mapping();
        let result = apply(&log, &mapping, &criteria);
        prop_assert_eq!(result.impact.total(), log.len() - result.rows.len());
        prop_assert_eq!(result.removed(), result.impact.total());
    }

    #[test]
    fn surviving_rows_keep_source_order(log in arb_log(), criteria in arb_criteria()) {
        let mapping = mapping();
        let result = apply(&log, &mapping, &criteria);
        let mut source = log.iter();
        for kept in &result.rows {
            prop_assert!(source.any(|record| record == kept));
        }
    }

    #[test]
    fn activity_exclusion_is_case_complete(log in arb_log(), criteria in arb_criteria()) {
        let criteria = FilterCriteria { activity_scope: ActivityScope::Cases, ..criteria };
        let mapping = mapping();
        let all_activities = ACTIVITIES.iter().map(|name| Activity::new(*name).unwrap());
        let upstream = apply(&log, &mapping, &FilterCriteria {
            included_activities: all_activities.collect(),
            included_case_ids: BTreeSet::new(),
            ..criteria.clone()
        });
        let hit_cases: BTreeSet<&CaseId> = upstream
            .rows
            .iter()
            .filter(|record| !criteria.included_activities.contains(&record.activity))
            .map(|record| &record.case_id)
            .collect();

        let result = apply(&log, &mapping, &criteria);
        for record in &result.rows {
            prop_assert!(!hit_cases.contains(&record.case_id));
        }
    }

    #[test]
    fn empty_case_set_removes_nothing_at_the_case_stage(
        log in arb_log(),
        criteria in arb_criteria(),
    ) {
        let criteria = FilterCriteria { included_case_ids: BTreeSet::new(), ..criteria };
        let mapping = mapping();
        let result = apply(&log, &mapping, &criteria);
        prop_assert_eq!(result.impact.case_removed, 0);
    }
}
