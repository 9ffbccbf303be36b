//! Caller-owned filter state passed into each pipeline run.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Activity, CaseId};

/// Inclusive time window. An unset bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| instant >= start) && self.end.is_none_or(|end| instant <= end)
    }
}

/// Constraint on a single attribute column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttributeConstraint {
    /// Allow-set of stringified values.
    Categorical { allowed: BTreeSet<String> },
    /// Inclusive range over the numeric interpretation of the value.
    Numeric { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub column: String,
    #[serde(flatten)]
    pub constraint: AttributeConstraint,
}

impl AttributeFilter {
    pub fn categorical<I, S>(column: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            constraint: AttributeConstraint::Categorical {
                allowed: allowed.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn numeric(column: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            column: column.into(),
            constraint: AttributeConstraint::Numeric { min, max },
        }
    }
}

/// How excluded activities remove rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityScope {
    /// Every row of a case containing an excluded activity is removed.
    #[default]
    Cases,
    /// Only rows whose own activity is excluded are removed.
    Rows,
}

/// The four filter criteria.
///
/// Activities of the log that are missing from `included_activities` are
/// excluded, so an empty set excludes everything. An empty
/// `included_case_ids` means no case restriction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub date_range: Option<DateRange>,
    pub attribute_filters: Vec<AttributeFilter>,
    pub included_activities: BTreeSet<Activity>,
    pub included_case_ids: BTreeSet<CaseId>,
    #[serde(default)]
    pub activity_scope: ActivityScope,
}

impl FilterCriteria {
    /// Replaces the constraint for the filter's column, appending it when the
    /// column had none.
    pub fn set_attribute_filter(&mut self, filter: AttributeFilter) {
        match self
            .attribute_filters
            .iter_mut()
            .find(|existing| existing.column == filter.column)
        {
            Some(existing) => *existing = filter,
            None => self.attribute_filters.push(filter),
        }
    }

    pub fn exclude_activity(&mut self, activity: &Activity) -> bool {
        self.included_activities.remove(activity)
    }

    pub fn include_activity(&mut self, activity: Activity) -> bool {
        self.included_activities.insert(activity)
    }
}
