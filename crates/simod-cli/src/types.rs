use std::path::PathBuf;

use simod_filter::Page;
use simod_model::FilterResult;

#[derive(Debug)]
pub struct FilterOutcome {
    pub source: PathBuf,
    pub result: FilterResult,
    pub page: Option<Page>,
    pub output: Option<PathBuf>,
}
