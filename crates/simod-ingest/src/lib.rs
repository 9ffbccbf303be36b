//! Event log ingestion: reads CSV and JSON logs, applies the column mapping
//! and writes accepted filter results back out.

pub mod builder;
pub mod csv_log;
pub mod error;
pub mod json_log;
pub mod table;

use std::path::Path;

use simod_map::{ColumnMapper, ValidatedMapping};
use simod_model::EventLog;
use tracing::info;

pub use builder::build_event_log;
pub use csv_log::{read_csv_from, read_csv_table, write_csv_log, write_csv_to};
pub use error::{IngestError, Result};
pub use json_log::{
    FilteredLogAck, FilteredLogRequest, LogEnvelope, parse_json_table, read_json_table,
    write_json_log,
};
pub use table::RawTable;

/// On-disk log formats, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Csv,
    Json,
}

impl LogFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Reads a log file into a raw table.
pub fn read_table(path: &Path) -> Result<RawTable> {
    match LogFormat::from_path(path)? {
        LogFormat::Csv => read_csv_table(path),
        LogFormat::Json => read_json_table(path),
    }
}

/// Writes a log in the format named by the path's extension.
pub fn write_log(path: &Path, log: &EventLog) -> Result<()> {
    match LogFormat::from_path(path)? {
        LogFormat::Csv => write_csv_log(path, log),
        LogFormat::Json => write_json_log(path, log),
    }
}

/// A loaded log together with the mapping it was built with.
#[derive(Debug, Clone)]
pub struct LoadedLog {
    pub log: EventLog,
    pub mapping: ValidatedMapping,
}

/// Maps and validates a raw table's columns, then builds the event log.
pub fn load_table(table: RawTable, mapper: &ColumnMapper) -> Result<LoadedLog> {
    let mapping = ValidatedMapping::new(mapper.map(&table.columns))?;
    let log = build_event_log(table, &mapping)?;
    Ok(LoadedLog { log, mapping })
}

/// Reads, maps, validates and builds an event log from a file.
pub fn load_event_log(path: &Path, mapper: &ColumnMapper) -> Result<LoadedLog> {
    let table = read_table(path)?;
    let loaded = load_table(table, mapper)?;
    info!(
        path = %path.display(),
        row_count = loaded.log.len(),
        case_column = loaded.mapping.case_id_column(),
        activity_column = loaded.mapping.activity_column(),
        "event log loaded"
    );
    Ok(loaded)
}
