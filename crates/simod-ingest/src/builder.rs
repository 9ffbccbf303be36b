//! Construction of an [`EventLog`] from a raw table and a validated mapping.

use simod_map::ValidatedMapping;
use simod_model::{Activity, CaseId, EventLog, EventRecord};
use tracing::info;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

/// Builds the working log. Row order is preserved; a row without a case id or
/// activity rejects the whole log. Row numbers in errors are 1-based data rows.
pub fn build_event_log(table: RawTable, mapping: &ValidatedMapping) -> Result<EventLog> {
    let case_column = mapping.case_id_column();
    let activity_column = mapping.activity_column();
    let mut records = Vec::with_capacity(table.rows.len());

    for (index, fields) in table.rows.into_iter().enumerate() {
        let row = index + 1;
        let text_of = |column: &str| {
            fields
                .get(column)
                .map(|value| value.to_text().into_owned())
                .unwrap_or_default()
        };
        let case_id = CaseId::new(text_of(case_column)).map_err(|_| IngestError::EmptyCaseId {
            row,
            column: case_column.to_string(),
        })?;
        let activity =
            Activity::new(text_of(activity_column)).map_err(|_| IngestError::EmptyActivity {
                row,
                column: activity_column.to_string(),
            })?;
        records.push(EventRecord::new(case_id, activity, fields));
    }

    info!(
        row_count = records.len(),
        column_count = table.columns.len(),
        "event log built"
    );
    Ok(EventLog::new(table.columns, records))
}
