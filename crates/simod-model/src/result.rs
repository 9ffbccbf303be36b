//! Output of one filter pipeline run.

use serde::{Deserialize, Serialize};

use crate::EventLog;

/// Pipeline stages in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterStage {
    Date,
    Attribute,
    Activity,
    Case,
}

impl FilterStage {
    pub const ORDER: [FilterStage; 4] = [
        FilterStage::Date,
        FilterStage::Attribute,
        FilterStage::Activity,
        FilterStage::Case,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Attribute => "attribute",
            Self::Activity => "activity",
            Self::Case => "case",
        }
    }
}

/// Rows removed by each stage given what earlier stages already removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterImpact {
    pub date_removed: usize,
    pub attribute_removed: usize,
    pub activity_removed: usize,
    pub case_removed: usize,
}

impl FilterImpact {
    pub fn removed_by(&self, stage: FilterStage) -> usize {
        match stage {
            FilterStage::Date => self.date_removed,
            FilterStage::Attribute => self.attribute_removed,
            FilterStage::Activity => self.activity_removed,
            FilterStage::Case => self.case_removed,
        }
    }

    pub fn record(&mut self, stage: FilterStage, removed: usize) {
        let slot = match stage {
            FilterStage::Date => &mut self.date_removed,
            FilterStage::Attribute => &mut self.attribute_removed,
            FilterStage::Activity => &mut self.activity_removed,
            FilterStage::Case => &mut self.case_removed,
        };
        *slot = removed;
    }

    pub fn total(&self) -> usize {
        self.date_removed + self.attribute_removed + self.activity_removed + self.case_removed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStatus {
    /// The source log had no rows.
    EmptyLog,
    /// The log had rows but none survived.
    NoMatches,
    /// This many rows survived.
    Matched(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    pub rows: EventLog,
    pub impact: FilterImpact,
    pub source_rows: usize,
}

impl FilterResult {
    pub fn status(&self) -> FilterStatus {
        if self.source_rows == 0 {
            FilterStatus::EmptyLog
        } else if self.rows.is_empty() {
            FilterStatus::NoMatches
        } else {
            FilterStatus::Matched(self.rows.len())
        }
    }

    pub fn removed(&self) -> usize {
        self.source_rows - self.rows.len()
    }
}
