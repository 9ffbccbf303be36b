//! The waterfall filter pipeline.
//!
//! Stages run in a fixed order (date, attribute, activity, case) and each one
//! sees only the survivors of the previous one, so a row is charged to the
//! first stage that drops it and the per-stage counts sum to the total
//! removed.

use simod_map::ValidatedMapping;
use simod_model::{EventLog, EventRecord, FilterCriteria, FilterImpact, FilterResult, FilterStage};
use tracing::{debug, debug_span};

use crate::stages;

/// Applies `criteria` to `log` and reports how many rows each stage removed.
///
/// The input log is never modified; surviving rows are cloned into a new log
/// in their original order.
pub fn apply(
    log: &EventLog,
    mapping: &ValidatedMapping,
    criteria: &FilterCriteria,
) -> FilterResult {
    let span = debug_span!("filter", rows = log.len());
    let _guard = span.enter();

    let excluded = stages::excluded_activities(log, &criteria.included_activities);
    let mut impact = FilterImpact::default();
    let mut rows: Vec<&EventRecord> = log.iter().collect();

    for stage in FilterStage::ORDER {
        let before = rows.len();
        rows = match stage {
            FilterStage::Date => stages::by_date(
                rows,
                criteria.date_range.as_ref(),
                mapping.primary_time_column(),
            ),
            FilterStage::Attribute => stages::by_attributes(rows, &criteria.attribute_filters),
            FilterStage::Activity => stages::by_activity(rows, &excluded, criteria.activity_scope),
            FilterStage::Case => stages::by_case(rows, &criteria.included_case_ids),
        };
        let after = rows.len();
        impact.record(stage, before - after);
        debug!(
            stage = stage.label(),
            before,
            after,
            removed = before - after,
            "filter stage applied"
        );
    }

    let records = rows.into_iter().cloned().collect();
    FilterResult {
        rows: EventLog::new(log.columns.clone(), records),
        impact,
        source_rows: log.len(),
    }
}
