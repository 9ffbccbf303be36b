use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use simod_filter::{apply, default_attribute_filters, default_criteria, extract};
use simod_map::{ValidatedMapping, map_columns};
use simod_model::{
    Activity, AttributeConstraint, AttributeFilter, CaseId, CellValue, DateRange, EventLog,
    EventRecord,
};

fn columns() -> Vec<String> {
    ["case_id", "activity", "start_time", "end_time", "cost", "region"]
        .iter()
        .map(|c| (*c).to_string())
        .collect()
}

fn record(
    case: &str,
    activity: &str,
    start: &str,
    end: &str,
    cost: CellValue,
    region: &str,
) -> EventRecord {
    let mut fields = BTreeMap::new();
    fields.insert("case_id".to_string(), CellValue::text(case));
    fields.insert("activity".to_string(), CellValue::text(activity));
    fields.insert("start_time".to_string(), CellValue::text(start));
    fields.insert("end_time".to_string(), CellValue::text(end));
    fields.insert("cost".to_string(), cost);
    fields.insert("region".to_string(), CellValue::text(region));
    EventRecord::new(
        CaseId::new(case).unwrap(),
        Activity::new(activity).unwrap(),
        fields,
    )
}

fn fixture() -> (EventLog, ValidatedMapping) {
    let log = EventLog::new(
        columns(),
        vec![
            record(
                "c2",
                "Register",
                "2024-01-02T08:00:00",
                "2024-01-02T08:30:00",
                CellValue::Integer(5),
                "north",
            ),
            record(
                "c1",
                "Register",
                "2024-01-01T09:00:00",
                "2024-01-01T09:10:00",
                CellValue::text("12.5"),
                "south",
            ),
            record(
                "c1",
                "Approve",
                "bad",
                "2024-01-03T17:45:00Z",
                CellValue::Missing,
                "south",
            ),
            record(
                "c2",
                "Register",
                "2023-12-31T23:00:00+01:00",
                "",
                CellValue::Float(1.5),
                "",
            ),
        ],
    );
    let mapping = ValidatedMapping::new(map_columns(&columns())).unwrap();
    (log, mapping)
}

#[test]
fn distinct_values_keep_first_seen_order() {
    let (log, mapping) = fixture();
    let metadata = extract(&log, &mapping);

    let activities: Vec<&str> = metadata.all_activities.iter().map(Activity::as_str).collect();
    let cases: Vec<&str> = metadata.all_case_ids.iter().map(CaseId::as_str).collect();
    assert_eq!(activities, ["Register", "Approve"]);
    assert_eq!(cases, ["c2", "c1"]);
}

#[test]
fn time_bounds_span_every_time_column() {
    let (log, mapping) = fixture();
    let metadata = extract(&log, &mapping);

    assert_eq!(
        metadata.min_timestamp,
        Some(Utc.with_ymd_and_hms(2023, 12, 31, 22, 0, 0).unwrap())
    );
    assert_eq!(
        metadata.max_timestamp,
        Some(Utc.with_ymd_and_hms(2024, 1, 3, 17, 45, 0).unwrap())
    );
}

#[test]
fn coverage_counts_distinct_cases() {
    let (log, mapping) = fixture();
    let metadata = extract(&log, &mapping);

    let register = Activity::new("Register").unwrap();
    let approve = Activity::new("Approve").unwrap();
    assert_eq!(metadata.coverage(&register), 2);
    assert_eq!(metadata.coverage(&approve), 1);
    assert_eq!(metadata.coverage(&Activity::new("Ship").unwrap()), 0);
    assert!(metadata.is_essential(&approve));
    assert_eq!(metadata.essential_activities().len(), 2);
}

#[test]
fn empty_log_has_no_bounds() {
    let (_, mapping) = fixture();
    let metadata = extract(&EventLog::new(columns(), Vec::new()), &mapping);

    assert!(metadata.all_activities.is_empty());
    assert_eq!(metadata.min_timestamp, None);
    assert_eq!(metadata.max_timestamp, None);
    assert!(metadata.activity_case_coverage.is_empty());
}

#[test]
fn attribute_defaults_follow_observed_values() {
    let (log, mapping) = fixture();
    let filters = default_attribute_filters(&log, &mapping);

    assert_eq!(
        filters,
        vec![
            AttributeFilter::numeric("cost", 1.5, 12.5),
            AttributeFilter::categorical("region", ["north", "south"]),
        ]
    );
}

#[test]
fn mixed_column_falls_back_to_categorical() {
    let (mut log, mapping) = fixture();
    log.records[2]
        .fields
        .insert("cost".to_string(), CellValue::text("waived"));
    let filters = default_attribute_filters(&log, &mapping);

    let AttributeConstraint::Categorical { allowed } = &filters[0].constraint else {
        panic!("expected categorical constraint, got {:?}", filters[0].constraint);
    };
    assert!(allowed.contains("5"));
    assert!(allowed.contains("12.5"));
    assert!(allowed.contains("waived"));
    assert!(allowed.contains("1.5"));
}

#[test]
fn default_criteria_cover_the_whole_log() {
    let (log, mapping) = fixture();
    let metadata = extract(&log, &mapping);
    let criteria = default_criteria(&log, &mapping, &metadata);

    assert_eq!(
        criteria.date_range,
        Some(DateRange {
            start: metadata.min_timestamp,
            end: metadata.max_timestamp,
        })
    );
    assert_eq!(criteria.included_activities.len(), 2);
    assert_eq!(criteria.included_case_ids.len(), 2);
    assert_eq!(criteria.attribute_filters.len(), 2);

    let result = apply(&log, &mapping, &criteria);
    assert_eq!(result.rows, log);
    assert_eq!(result.impact.total(), 0);
}
