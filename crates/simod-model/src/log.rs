//! Event records and the ordered log they belong to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Activity, CaseId, CellValue};

/// One row of an event log.
///
/// `fields` holds every source column verbatim, including the columns that
/// produced `case_id` and `activity`, so the row can be handed back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub case_id: CaseId,
    pub activity: Activity,
    pub fields: BTreeMap<String, CellValue>,
}

impl EventRecord {
    pub fn new(case_id: CaseId, activity: Activity, fields: BTreeMap<String, CellValue>) -> Self {
        Self {
            case_id,
            activity,
            fields,
        }
    }

    /// Returns the value of a column, `None` when absent or missing.
    pub fn value(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column).filter(|value| !value.is_missing())
    }
}

/// An ordered sequence of event records plus the source column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    pub columns: Vec<String>,
    pub records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new(columns: Vec<String>, records: Vec<EventRecord>) -> Self {
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
