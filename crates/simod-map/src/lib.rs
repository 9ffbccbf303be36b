//! Column mapping for event logs: resolves arbitrary headers to the case id,
//! activity, resource and role columns, classifies timestamp columns by suffix
//! and leaves every other column as an attribute.

pub mod error;
pub mod mapper;
pub mod utils;
pub mod validate;
pub mod variants;

pub use error::{MappingIssue, SchemaError};
pub use mapper::{ColumnMapper, map_columns};
pub use utils::normalize_column_name;
pub use validate::{ValidatedMapping, primary_time_column, validate};
pub use variants::{
    ACTIVITY_VARIANTS, CASE_ID_VARIANTS, RESOURCE_VARIANTS, ROLE_VARIANTS, SemanticRole,
    TIME_COLUMN_SUFFIXES,
};
