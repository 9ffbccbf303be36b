//! Validation of column mappings before filtering.

use simod_model::ColumnMapping;

use crate::error::{MappingIssue, SchemaError};

/// Lists every reason the mapping cannot drive filtering, in a fixed order.
pub fn validate(mapping: &ColumnMapping) -> Vec<MappingIssue> {
    let mut issues = Vec::new();
    if mapping.case_id.is_none() {
        issues.push(MappingIssue::MissingCaseId);
    }
    if mapping.activity.is_none() {
        issues.push(MappingIssue::MissingActivity);
    }
    if mapping.time_columns.is_empty() {
        issues.push(MappingIssue::NoTimestampColumns);
    }
    issues
}

/// Picks the timestamp column the date filter reads: the first time column
/// whose name contains "start" (any case), otherwise the first time column.
pub fn primary_time_column(time_columns: &[String]) -> Option<&str> {
    time_columns
        .iter()
        .find(|column| column.to_lowercase().contains("start"))
        .or_else(|| time_columns.first())
        .map(String::as_str)
}

/// A column mapping that passed [`validate`].
///
/// Only this type is accepted by log construction and filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMapping {
    mapping: ColumnMapping,
    case_id: String,
    activity: String,
    primary_time: String,
}

impl ValidatedMapping {
    pub fn new(mapping: ColumnMapping) -> Result<Self, SchemaError> {
        let issues = validate(&mapping);
        let (Some(case_id), Some(activity), Some(primary_time)) = (
            mapping.case_id.clone(),
            mapping.activity.clone(),
            primary_time_column(&mapping.time_columns).map(str::to_string),
        ) else {
            return Err(SchemaError { issues });
        };
        Ok(Self {
            mapping,
            case_id,
            activity,
            primary_time,
        })
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn case_id_column(&self) -> &str {
        &self.case_id
    }

    pub fn activity_column(&self) -> &str {
        &self.activity
    }

    pub fn time_columns(&self) -> &[String] {
        &self.mapping.time_columns
    }

    pub fn attribute_columns(&self) -> &[String] {
        &self.mapping.attribute_columns
    }

    pub fn primary_time_column(&self) -> &str {
        &self.primary_time
    }
}

impl TryFrom<ColumnMapping> for ValidatedMapping {
    type Error = SchemaError;

    fn try_from(mapping: ColumnMapping) -> Result<Self, Self::Error> {
        Self::new(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn primary_prefers_start_columns() {
        assert_eq!(
            primary_time_column(&names(&["enabled_time", "end_time", "START_TIME"])),
            Some("START_TIME")
        );
        assert_eq!(
            primary_time_column(&names(&["end_time", "enabled_time"])),
            Some("end_time")
        );
        assert_eq!(primary_time_column(&[]), None);
    }

    #[test]
    fn empty_mapping_reports_all_issues() {
        assert_eq!(
            validate(&ColumnMapping::default()),
            vec![
                MappingIssue::MissingCaseId,
                MappingIssue::MissingActivity,
                MappingIssue::NoTimestampColumns,
            ]
        );
    }

    #[test]
    fn validated_mapping_exposes_role_columns() {
        let mapping = ColumnMapping {
            case_id: Some("case".to_string()),
            activity: Some("task".to_string()),
            time_columns: names(&["end_time", "start_time"]),
            ..ColumnMapping::default()
        };
        let validated = ValidatedMapping::new(mapping).expect("valid mapping");
        assert_eq!(validated.case_id_column(), "case");
        assert_eq!(validated.activity_column(), "task");
        assert_eq!(validated.primary_time_column(), "start_time");
    }
}
