//! The four filter stages. Each keeps the relative order of the rows it is
//! given and only ever removes rows.

use std::collections::BTreeSet;

use simod_model::{
    Activity, ActivityScope, AttributeConstraint, AttributeFilter, CaseId, DateRange, EventLog,
    EventRecord,
};

use crate::timestamp::parse_cell_timestamp;

/// Row-level: rows whose primary timestamp is missing or unparsable survive.
pub(crate) fn by_date<'a>(
    mut rows: Vec<&'a EventRecord>,
    range: Option<&DateRange>,
    primary_column: &str,
) -> Vec<&'a EventRecord> {
    let Some(range) = range else {
        return rows;
    };
    rows.retain(|record| {
        record
            .value(primary_column)
            .and_then(parse_cell_timestamp)
            .is_none_or(|instant| range.contains(instant))
    });
    rows
}

/// Row-level: a row must satisfy every constraint it has a value for.
pub(crate) fn by_attributes<'a>(
    mut rows: Vec<&'a EventRecord>,
    filters: &[AttributeFilter],
) -> Vec<&'a EventRecord> {
    if filters.is_empty() {
        return rows;
    }
    rows.retain(|record| filters.iter().all(|filter| admits(record, filter)));
    rows
}

pub(crate) fn admits(record: &EventRecord, filter: &AttributeFilter) -> bool {
    let Some(value) = record.value(&filter.column) else {
        return true;
    };
    match &filter.constraint {
        AttributeConstraint::Categorical { allowed } => allowed.contains(value.to_text().as_ref()),
        AttributeConstraint::Numeric { min, max } => value
            .as_f64()
            .is_none_or(|number| number >= *min && number <= *max),
    }
}

/// Activities of the full log that are not included.
pub(crate) fn excluded_activities<'a>(
    log: &'a EventLog,
    included: &BTreeSet<Activity>,
) -> BTreeSet<&'a Activity> {
    log.iter()
        .map(|record| &record.activity)
        .filter(|activity| !included.contains(*activity))
        .collect()
}

/// Case-level by default: any surviving row with an excluded activity removes
/// every row of its case.
pub(crate) fn by_activity<'a>(
    mut rows: Vec<&'a EventRecord>,
    excluded: &BTreeSet<&Activity>,
    scope: ActivityScope,
) -> Vec<&'a EventRecord> {
    if excluded.is_empty() {
        return rows;
    }
    match scope {
        ActivityScope::Cases => {
            let cases: BTreeSet<&'a CaseId> = rows
                .iter()
                .filter(|record| excluded.contains(&record.activity))
                .map(|record| &record.case_id)
                .collect();
            rows.retain(|record| !cases.contains(&record.case_id));
        }
        ActivityScope::Rows => rows.retain(|record| !excluded.contains(&record.activity)),
    }
    rows
}

/// Row-level: an empty set means no restriction.
pub(crate) fn by_case<'a>(
    mut rows: Vec<&'a EventRecord>,
    included: &BTreeSet<CaseId>,
) -> Vec<&'a EventRecord> {
    if !included.is_empty() {
        rows.retain(|record| included.contains(&record.case_id));
    }
    rows
}
