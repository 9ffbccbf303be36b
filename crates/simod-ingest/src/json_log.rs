//! JSON event logs as served by the backend (`{status, data: [...]}`) and the
//! filtered-log handoff payload.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use simod_model::{CellValue, EventLog};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::table::RawTable;

const SUCCESS_STATUS: &str = "success";

/// Response envelope of the full event log endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

/// Body posted when the user accepts a filter result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredLogRequest {
    pub data: Vec<Map<String, Value>>,
}

/// Acknowledgement returned for a [`FilteredLogRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredLogAck {
    pub row_count: usize,
}

impl FilteredLogAck {
    /// True when the backend accepted exactly the rows that were sent.
    pub fn confirms(&self, request: &FilteredLogRequest) -> bool {
        self.row_count == request.data.len()
    }
}

impl FilteredLogRequest {
    /// Builds the payload from filtered rows, keeping row order and the
    /// source column order within each row.
    pub fn from_log(log: &EventLog) -> Self {
        let data = log
            .iter()
            .map(|record| {
                log.columns
                    .iter()
                    .map(|column| {
                        let value = record
                            .fields
                            .get(column)
                            .map_or(Value::Null, cell_to_json);
                        (column.clone(), value)
                    })
                    .collect()
            })
            .collect();
        Self { data }
    }
}

fn cell_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Missing => Value::Null,
        CellValue::Bool(value) => Value::Bool(*value),
        CellValue::Integer(value) => Value::from(*value),
        CellValue::Float(value) => Value::from(*value),
        CellValue::Text(value) => Value::String(value.clone()),
    }
}

fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(value) => CellValue::Bool(*value),
        Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(integer), _) => CellValue::Integer(integer),
            (None, Some(float)) if !number.is_u64() => CellValue::Float(float),
            _ => CellValue::Text(number.to_string()),
        },
        Value::String(text) => CellValue::text(text.as_str()),
        Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
    }
}

/// Parses a JSON event log: an envelope with `data` rows or a bare array.
pub fn parse_json_table(text: &str) -> Result<RawTable> {
    let document: Value = serde_json::from_str(text)?;
    let envelope = match document {
        Value::Array(_) => LogEnvelope {
            data: serde_json::from_value(document)?,
            ..LogEnvelope::default()
        },
        Value::Object(_) => serde_json::from_value::<LogEnvelope>(document)?,
        other => {
            return Err(IngestError::JsonShape {
                reason: format!("expected an object or array, found {}", json_kind(&other)),
            });
        }
    };
    table_from_envelope(envelope)
}

pub fn read_json_table(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_json_table(&text)?;
    debug!(
        path = %path.display(),
        column_count = table.columns.len(),
        row_count = table.rows.len(),
        "read json log"
    );
    Ok(table)
}

fn table_from_envelope(envelope: LogEnvelope) -> Result<RawTable> {
    if let Some(status) = envelope.status
        && status != SUCCESS_STATUS
    {
        return Err(IngestError::EnvelopeStatus { status });
    }

    let mut columns: Vec<String> = Vec::new();
    for row in &envelope.data {
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    if envelope.data.is_empty() {
        columns = envelope.columns.unwrap_or_default();
    }

    let ragged = envelope
        .data
        .iter()
        .filter(|row| row.len() != columns.len())
        .count();
    if ragged > 0 {
        warn!(
            ragged_rows = ragged,
            column_count = columns.len(),
            "json rows do not all carry the same columns"
        );
    }

    let rows = envelope
        .data
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    let cell = row.get(column).map_or(CellValue::Missing, json_to_cell);
                    (column.clone(), cell)
                })
                .collect::<BTreeMap<_, _>>()
        })
        .collect();
    Ok(RawTable { columns, rows })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Writes the filtered-log handoff payload as pretty JSON.
pub fn write_json_log(path: &Path, log: &EventLog) -> Result<()> {
    let request = FilteredLogRequest::from_log(log);
    let text = serde_json::to_string_pretty(&request)?;
    std::fs::write(path, text).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_confirms_the_posted_row_count() {
        let request = FilteredLogRequest {
            data: vec![Map::new(), Map::new()],
        };
        let ack: FilteredLogAck = serde_json::from_str(r#"{"row_count": 2}"#).unwrap();
        assert!(ack.confirms(&request));
        assert!(!FilteredLogAck { row_count: 1 }.confirms(&request));
        assert_eq!(serde_json::to_string(&ack).unwrap(), r#"{"row_count":2}"#);
    }

    #[test]
    fn envelope_rows_keep_key_order_and_json_kinds() {
        let table = parse_json_table(
            r#"{"status": "success", "data": [
                {"case_id": 1, "activity": "A", "start_time": "2024-01-01T08:00:00", "cost": 2.5},
                {"case_id": 2, "activity": "B", "start_time": null, "cost": 3, "flag": true}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            table.columns,
            vec!["case_id", "activity", "start_time", "cost", "flag"]
        );
        assert_eq!(table.rows[0].get("case_id"), Some(&CellValue::Integer(1)));
        assert_eq!(table.rows[0].get("cost"), Some(&CellValue::Float(2.5)));
        assert_eq!(table.rows[0].get("flag"), Some(&CellValue::Missing));
        assert_eq!(table.rows[1].get("start_time"), Some(&CellValue::Missing));
    }

    #[test]
    fn bare_arrays_are_accepted() {
        let table = parse_json_table(r#"[{"case_id": "c1", "activity": "A"}]"#).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn failed_status_is_rejected() {
        let err = parse_json_table(r#"{"status": "error", "data": []}"#).unwrap_err();
        assert!(matches!(err, IngestError::EnvelopeStatus { status } if status == "error"));
    }

    #[test]
    fn empty_data_falls_back_to_declared_columns() {
        let table =
            parse_json_table(r#"{"status": "success", "data": [], "columns": ["case_id", "x"]}"#)
                .unwrap();
        assert_eq!(table.columns, vec!["case_id", "x"]);
        assert!(table.is_empty());
    }

    #[test]
    fn scalars_are_rejected() {
        let err = parse_json_table("42").unwrap_err();
        assert!(err.to_string().contains("found a number"));
    }
}
