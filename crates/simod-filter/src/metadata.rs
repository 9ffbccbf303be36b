//! Metadata extraction from a loaded event log.

use std::collections::{BTreeMap, BTreeSet};

use simod_map::ValidatedMapping;
use simod_model::{Activity, CaseId, EventLog, LogMetadata};
use tracing::debug;

use crate::timestamp::parse_cell_timestamp;

/// Derives distinct activities and cases, global timestamp bounds over every
/// time column, and per-activity case coverage in a single pass.
pub fn extract(log: &EventLog, mapping: &ValidatedMapping) -> LogMetadata {
    let mut metadata = LogMetadata::default();
    let mut seen_activities: BTreeSet<&Activity> = BTreeSet::new();
    let mut seen_cases: BTreeSet<&CaseId> = BTreeSet::new();
    let mut cases_by_activity: BTreeMap<&Activity, BTreeSet<&CaseId>> = BTreeMap::new();

    for record in log {
        if seen_activities.insert(&record.activity) {
            metadata.all_activities.push(record.activity.clone());
        }
        if seen_cases.insert(&record.case_id) {
            metadata.all_case_ids.push(record.case_id.clone());
        }
        cases_by_activity
            .entry(&record.activity)
            .or_default()
            .insert(&record.case_id);

        for column in mapping.time_columns() {
            let Some(instant) = record.value(column).and_then(parse_cell_timestamp) else {
                continue;
            };
            if metadata.min_timestamp.is_none_or(|min| instant < min) {
                metadata.min_timestamp = Some(instant);
            }
            if metadata.max_timestamp.is_none_or(|max| instant > max) {
                metadata.max_timestamp = Some(instant);
            }
        }
    }

    metadata.activity_case_coverage = cases_by_activity
        .into_iter()
        .map(|(activity, cases)| (activity.clone(), cases.len()))
        .collect();

    debug!(
        activity_count = metadata.all_activities.len(),
        case_count = metadata.all_case_ids.len(),
        has_time_bounds = metadata.min_timestamp.is_some(),
        "log metadata extracted"
    );
    metadata
}
