//! Shared data model for event log filtering.

pub mod criteria;
pub mod error;
pub mod ids;
pub mod log;
pub mod mapping;
pub mod metadata;
pub mod result;
pub mod value;

pub use criteria::{ActivityScope, AttributeConstraint, AttributeFilter, DateRange, FilterCriteria};
pub use error::{ModelError, Result};
pub use ids::{Activity, CaseId};
pub use log::{EventLog, EventRecord};
pub use mapping::ColumnMapping;
pub use metadata::{ESSENTIAL_COVERAGE_RATIO, LogMetadata};
pub use result::{FilterImpact, FilterResult, FilterStage, FilterStatus};
pub use value::CellValue;
