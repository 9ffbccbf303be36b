//! Error types for mapping validation.

use thiserror::Error;

/// A single reason a column mapping cannot drive the filter pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MappingIssue {
    #[error("Case ID column not found. Expected variants: case_id, Case ID, CaseID, etc.")]
    MissingCaseId,
    #[error("Activity column not found. Expected variants: activity, Activity, task, event, etc.")]
    MissingActivity,
    #[error(
        "No timestamp columns found. Expected columns ending with: _time, time, timestamp, etc."
    )]
    NoTimestampColumns,
}

/// Rejection of a column mapping, carrying every validation message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column mapping rejected: {}", join_issues(.issues))]
pub struct SchemaError {
    pub issues: Vec<MappingIssue>,
}

fn join_issues(issues: &[MappingIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
