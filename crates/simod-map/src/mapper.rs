//! Resolution of free-form headers to semantic roles.

use std::collections::BTreeSet;

use simod_model::ColumnMapping;
use tracing::{debug, warn};

use crate::utils::{has_suffix_ignore_case, normalize_column_name};
use crate::variants::{SemanticRole, TIME_COLUMN_SUFFIXES};

/// Maps physical column names to roles using ordered variant lists.
#[derive(Debug, Clone)]
pub struct ColumnMapper {
    case_id: Vec<String>,
    activity: Vec<String>,
    resource: Vec<String>,
    role: Vec<String>,
    time_suffixes: Vec<String>,
}

impl Default for ColumnMapper {
    fn default() -> Self {
        Self {
            case_id: owned(SemanticRole::CaseId.default_variants()),
            activity: owned(SemanticRole::Activity.default_variants()),
            resource: owned(SemanticRole::Resource.default_variants()),
            role: owned(SemanticRole::Role.default_variants()),
            time_suffixes: owned(TIME_COLUMN_SUFFIXES),
        }
    }
}

impl ColumnMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the variant list for one role. Order is priority order.
    #[must_use]
    pub fn with_variants(mut self, role: SemanticRole, variants: Vec<String>) -> Self {
        *self.variants_mut(role) = variants;
        self
    }

    #[must_use]
    pub fn with_time_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.time_suffixes = suffixes;
        self
    }

    pub fn variants(&self, role: SemanticRole) -> &[String] {
        match role {
            SemanticRole::CaseId => &self.case_id,
            SemanticRole::Activity => &self.activity,
            SemanticRole::Resource => &self.resource,
            SemanticRole::Role => &self.role,
        }
    }

    fn variants_mut(&mut self, role: SemanticRole) -> &mut Vec<String> {
        match role {
            SemanticRole::CaseId => &mut self.case_id,
            SemanticRole::Activity => &mut self.activity,
            SemanticRole::Resource => &mut self.resource,
            SemanticRole::Role => &mut self.role,
        }
    }

    /// Builds the column mapping for a header list.
    ///
    /// Roles claim columns in [`SemanticRole::ALL`] order and a claimed column
    /// is unavailable to later roles. Timestamp columns are classified by
    /// suffix independently of role claims.
    pub fn map(&self, columns: &[String]) -> ColumnMapping {
        let mut claimed: BTreeSet<&str> = BTreeSet::new();
        let mut mapping = ColumnMapping {
            original_columns: columns.to_vec(),
            ..ColumnMapping::default()
        };

        for role in SemanticRole::ALL {
            let found = self.find_role_column(role, columns, &claimed);
            if let Some(column) = found {
                debug!(role = role.label(), column = %column, "resolved role column");
                claimed.insert(column);
            }
            let slot = match role {
                SemanticRole::CaseId => &mut mapping.case_id,
                SemanticRole::Activity => &mut mapping.activity,
                SemanticRole::Resource => &mut mapping.resource,
                SemanticRole::Role => &mut mapping.role,
            };
            *slot = found.map(str::to_string);
        }

        mapping.time_columns = columns
            .iter()
            .filter(|column| self.is_time_column(column))
            .cloned()
            .collect();
        mapping.attribute_columns = columns
            .iter()
            .filter(|column| !claimed.contains(column.as_str()) && !self.is_time_column(column))
            .cloned()
            .collect();

        for column in mapping.dual_classified() {
            warn!(column = %column, "column classified as both role and timestamp column");
        }
        mapping
    }

    fn find_role_column<'a>(
        &self,
        role: SemanticRole,
        columns: &'a [String],
        claimed: &BTreeSet<&str>,
    ) -> Option<&'a str> {
        self.variants(role).iter().find_map(|variant| {
            let wanted = normalize_column_name(variant);
            columns
                .iter()
                .map(String::as_str)
                .filter(|column| !claimed.contains(column))
                .find(|column| normalize_column_name(column) == wanted)
        })
    }

    fn is_time_column(&self, column: &str) -> bool {
        self.time_suffixes
            .iter()
            .any(|suffix| has_suffix_ignore_case(column, suffix))
    }
}

fn owned(variants: &[&str]) -> Vec<String> {
    variants.iter().map(|variant| (*variant).to_string()).collect()
}

/// Maps headers with the built-in variant lists.
pub fn map_columns(columns: &[String]) -> ColumnMapping {
    ColumnMapper::default().map(columns)
}
