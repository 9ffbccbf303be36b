//! Load, filter and write steps shared by the CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use simod_filter::FilterSession;
use simod_ingest::{load_event_log, write_log};
use simod_model::{FilterCriteria, FilterResult};
use tracing::{info, trace};

use crate::config::{ColumnsConfig, CriteriaConfig};
use crate::logging::redact_value;

/// Loads a CSV or JSON event log and prepares it for filtering.
pub fn load(path: &Path, columns: &ColumnsConfig) -> Result<FilterSession> {
    let loaded = load_event_log(path, &columns.mapper())
        .with_context(|| format!("load event log {}", path.display()))?;
    Ok(FilterSession::new(loaded.log, loaded.mapping))
}

/// The session's default criteria with `overrides` applied.
pub fn resolve_criteria(
    session: &FilterSession,
    overrides: &CriteriaConfig,
) -> Result<FilterCriteria> {
    let mut criteria = session.default_criteria();
    overrides
        .apply_to(&mut criteria, session.metadata())
        .context("resolve filter criteria")?;
    Ok(criteria)
}

pub fn run_filter(session: &FilterSession, criteria: &FilterCriteria) -> FilterResult {
    let result = session.apply(criteria);
    info!(
        source_rows = result.source_rows,
        kept_rows = result.rows.len(),
        removed_rows = result.removed(),
        "filter applied"
    );
    for case_id in &criteria.included_case_ids {
        trace!(case_id = redact_value(case_id.as_str()), "case selected");
    }
    result
}

/// Writes the surviving rows, picking CSV or JSON by extension.
pub fn write_filtered(path: &Path, result: &FilterResult) -> Result<()> {
    write_log(path, &result.rows)
        .with_context(|| format!("write filtered log {}", path.display()))?;
    info!(path = %path.display(), row_count = result.rows.len(), "filtered log written");
    Ok(())
}
