//! Known header spellings for each semantic role.
//!
//! Lists are in priority order: when a log's headers satisfy several
//! variants, the earliest variant wins. Each entry stands for all of its
//! spellings (`Case ID`, `CASE-ID`, `caseid`, ...) since headers are compared
//! after [`normalize_column_name`](crate::utils::normalize_column_name).

use serde::{Deserialize, Serialize};

pub const CASE_ID_VARIANTS: &[&str] = &["case_id"];

pub const ACTIVITY_VARIANTS: &[&str] = &["activity", "activity_name", "task", "event"];

pub const RESOURCE_VARIANTS: &[&str] = &["resource", "user", "performer", "actor"];

pub const ROLE_VARIANTS: &[&str] = &["role", "position", "group"];

pub const TIME_COLUMN_SUFFIXES: &[&str] = &["_time", "time", "timestamp", "_ts"];

/// A semantic role a physical column can be claimed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticRole {
    CaseId,
    Activity,
    Resource,
    Role,
}

impl SemanticRole {
    /// Roles in the order they claim columns.
    pub const ALL: [SemanticRole; 4] = [
        SemanticRole::CaseId,
        SemanticRole::Activity,
        SemanticRole::Resource,
        SemanticRole::Role,
    ];

    pub fn default_variants(self) -> &'static [&'static str] {
        match self {
            Self::CaseId => CASE_ID_VARIANTS,
            Self::Activity => ACTIVITY_VARIANTS,
            Self::Resource => RESOURCE_VARIANTS,
            Self::Role => ROLE_VARIANTS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CaseId => "case id",
            Self::Activity => "activity",
            Self::Resource => "resource",
            Self::Role => "role",
        }
    }
}
