//! Delimited event log reading and writing.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use simod_model::{CellValue, EventLog};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::table::RawTable;

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Reads a CSV event log. The first record is the header row; blank cells
/// become missing values and fully blank rows are skipped. Headers are
/// trimmed, cell text is kept verbatim. When a header repeats, the first
/// column with that name wins.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_from(file, path)
}

/// Reads CSV from any reader; `origin` is only used in error messages.
pub fn read_csv_from<R: Read>(reader: R, origin: &Path) -> Result<RawTable> {
    let csv_error = |source| IngestError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    let mut positions: Vec<usize> = Vec::with_capacity(headers.len());
    for (idx, header) in headers.into_iter().enumerate() {
        if columns.contains(&header) {
            warn!(
                path = %origin.display(),
                column = %header,
                position = idx + 1,
                "duplicate csv header ignored"
            );
            continue;
        }
        columns.push(header);
        positions.push(idx);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let row: BTreeMap<String, CellValue> = columns
            .iter()
            .zip(&positions)
            .map(|(column, &idx)| {
                (column.clone(), CellValue::text(record.get(idx).unwrap_or("")))
            })
            .collect();
        rows.push(row);
    }
    debug!(
        path = %origin.display(),
        column_count = columns.len(),
        row_count = rows.len(),
        "read csv log"
    );
    Ok(RawTable { columns, rows })
}

/// Writes the log as CSV in its source column order.
pub fn write_csv_log(path: &Path, log: &EventLog) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv_to(file, path, log)
}

pub fn write_csv_to<W: Write>(writer: W, origin: &Path, log: &EventLog) -> Result<()> {
    let csv_error = |source| IngestError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(&log.columns).map_err(csv_error)?;
    for record in log {
        let row = log.columns.iter().map(|column| {
            record
                .fields
                .get(column)
                .map(|value| value.to_text().into_owned())
                .unwrap_or_default()
        });
        writer.write_record(row).map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|source| IngestError::FileWrite {
            path: origin.to_path_buf(),
            source,
        })
}
