use std::collections::BTreeMap;

use simod_model::CellValue;

/// Rows of a tabular source before column roles are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names in source order.
    pub columns: Vec<String>,
    pub rows: Vec<BTreeMap<String, CellValue>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
