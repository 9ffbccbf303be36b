//! Error types for event log ingestion.

use std::path::PathBuf;

use simod_map::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading or writing an event log.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension does not name a supported log format.
    #[error("unsupported log format for {path}: expected .csv or .json")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Failed to read or write CSV.
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to parse or encode JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON envelope reported a non-success status.
    #[error("event log response has status '{status}', expected 'success'")]
    EnvelopeStatus { status: String },

    /// The JSON document is neither an envelope nor an array of rows.
    #[error("unexpected event log JSON shape: {reason}")]
    JsonShape { reason: String },

    // === Log Construction Errors ===
    /// The column mapping cannot drive filtering.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A row has no case identifier.
    #[error("row {row} has an empty case identifier in column '{column}'")]
    EmptyCaseId { row: usize, column: String },

    /// A row has no activity label.
    #[error("row {row} has an empty activity in column '{column}'")]
    EmptyActivity { row: usize, column: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
