use serde::{Deserialize, Serialize};

/// Resolution of physical column headers to semantic roles.
///
/// `time_columns` and `attribute_columns` are disjoint, and attribute columns
/// never include a role column. A role column may also appear in
/// `time_columns`; see [`ColumnMapping::dual_classified`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub case_id: Option<String>,
    pub activity: Option<String>,
    pub resource: Option<String>,
    pub role: Option<String>,
    pub time_columns: Vec<String>,
    pub attribute_columns: Vec<String>,
    /// Every physical column in source order.
    pub original_columns: Vec<String>,
}

impl ColumnMapping {
    /// Columns claimed by a semantic role, in role order.
    pub fn role_columns(&self) -> Vec<&str> {
        [&self.case_id, &self.activity, &self.resource, &self.role]
            .into_iter()
            .filter_map(|column| column.as_deref())
            .collect()
    }

    /// Columns classified both as a role column and as a timestamp column.
    pub fn dual_classified(&self) -> Vec<&str> {
        self.role_columns()
            .into_iter()
            .filter(|column| self.time_columns.iter().any(|time| time == column))
            .collect()
    }

    pub fn is_time_column(&self, column: &str) -> bool {
        self.time_columns.iter().any(|time| time == column)
    }
}
