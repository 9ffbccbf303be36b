//! Holds one loaded log together with its derived metadata.

use simod_map::ValidatedMapping;
use simod_model::{EventLog, FilterCriteria, FilterResult, LogMetadata};

use crate::{defaults, metadata, pipeline};

/// A loaded log, its validated mapping and the metadata extracted from it.
///
/// Criteria are always passed in by the caller; the session keeps no filter
/// state of its own, so replacing the log cannot leave stale criteria behind.
#[derive(Debug, Clone)]
pub struct FilterSession {
    log: EventLog,
    mapping: ValidatedMapping,
    metadata: LogMetadata,
}

impl FilterSession {
    pub fn new(log: EventLog, mapping: ValidatedMapping) -> Self {
        let metadata = metadata::extract(&log, &mapping);
        Self {
            log,
            mapping,
            metadata,
        }
    }

    /// Swaps in a newly loaded log and recomputes metadata.
    pub fn replace(&mut self, log: EventLog, mapping: ValidatedMapping) {
        *self = Self::new(log, mapping);
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn mapping(&self) -> &ValidatedMapping {
        &self.mapping
    }

    pub fn metadata(&self) -> &LogMetadata {
        &self.metadata
    }

    pub fn default_criteria(&self) -> FilterCriteria {
        defaults::default_criteria(&self.log, &self.mapping, &self.metadata)
    }

    pub fn apply(&self, criteria: &FilterCriteria) -> FilterResult {
        pipeline::apply(&self.log, &self.mapping, criteria)
    }
}
