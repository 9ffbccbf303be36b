//! Default filter criteria: every criterion set to the log's full extent.

use simod_map::ValidatedMapping;
use simod_model::{AttributeFilter, CellValue, DateRange, EventLog, FilterCriteria, LogMetadata};

/// Derives one constraint per attribute column from its observed values.
///
/// A column whose non-missing values all parse as numbers gets a numeric
/// range over their extent; any other column gets a categorical allow-set of
/// every distinct value.
pub fn default_attribute_filters(
    log: &EventLog,
    mapping: &ValidatedMapping,
) -> Vec<AttributeFilter> {
    mapping
        .attribute_columns()
        .iter()
        .map(|column| {
            let values: Vec<&CellValue> = log.iter().filter_map(|r| r.value(column)).collect();
            let numbers: Vec<f64> = values.iter().filter_map(|value| value.as_f64()).collect();
            if !numbers.is_empty() && numbers.len() == values.len() {
                let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
                let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                AttributeFilter::numeric(column.clone(), min, max)
            } else {
                AttributeFilter::categorical(
                    column.clone(),
                    values.iter().map(|value| value.to_text().into_owned()),
                )
            }
        })
        .collect()
}

/// Criteria under which filtering is a no-op: the full time range, every
/// attribute at its observed extent, all activities and all case ids.
pub fn default_criteria(
    log: &EventLog,
    mapping: &ValidatedMapping,
    metadata: &LogMetadata,
) -> FilterCriteria {
    let date_range = (metadata.min_timestamp.is_some() || metadata.max_timestamp.is_some())
        .then_some(DateRange {
            start: metadata.min_timestamp,
            end: metadata.max_timestamp,
        });
    FilterCriteria {
        date_range,
        attribute_filters: default_attribute_filters(log, mapping),
        included_activities: metadata.all_activities.iter().cloned().collect(),
        included_case_ids: metadata.all_case_ids.iter().cloned().collect(),
        ..FilterCriteria::default()
    }
}
