//! Metadata extraction and the cascading filter pipeline for event logs.

pub mod defaults;
pub mod metadata;
pub mod pagination;
pub mod pipeline;
pub mod session;
mod stages;
pub mod timestamp;

pub use defaults::{default_attribute_filters, default_criteria};
pub use metadata::extract;
pub use pagination::{DEFAULT_PAGE_SIZE, Page, paginate};
pub use pipeline::apply;
pub use session::FilterSession;
pub use timestamp::{parse_cell_timestamp, parse_timestamp};
