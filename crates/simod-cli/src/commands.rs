use anyhow::{Result, bail};
use simod_cli::config::FilterConfig;
use simod_cli::pipeline::{self, load, resolve_criteria, write_filtered};
use simod_filter::Page;
use tracing::{info_span, warn};

use crate::cli::{FilterArgs, SourceArgs};
use crate::summary::{print_mapping, print_metadata};
use crate::types::FilterOutcome;

fn read_config(source: &SourceArgs) -> Result<FilterConfig> {
    match &source.config {
        Some(path) => FilterConfig::load(path),
        None => Ok(FilterConfig::default()),
    }
}

pub fn run_columns(args: &SourceArgs) -> Result<()> {
    let config = read_config(args)?;
    let session = load(&args.log, &config.columns)?;
    print_mapping(session.mapping());
    Ok(())
}

pub fn run_inspect(args: &SourceArgs) -> Result<()> {
    let config = read_config(args)?;
    let session = load(&args.log, &config.columns)?;
    print_metadata(&session);
    Ok(())
}

pub fn run_filter(args: &FilterArgs) -> Result<FilterOutcome> {
    let span = info_span!("filter_command", log = %args.source.log.display());
    let _guard = span.enter();

    if args.page_size == 0 {
        bail!("--page-size must be at least 1");
    }
    let config = read_config(&args.source)?;
    let session = load(&args.source.log, &config.columns)?;
    let overrides = config.criteria.merge(args.criteria_overrides());
    let criteria = resolve_criteria(&session, &overrides)?;
    let result = pipeline::run_filter(&session, &criteria);

    if let Some(path) = &args.output {
        write_filtered(path, &result)?;
    }
    if result.rows.is_empty() && args.output.is_some() {
        warn!("filtered log written without rows");
    }

    Ok(FilterOutcome {
        source: args.source.log.clone(),
        result,
        page: args.page.map(|number| Page::new(number, args.page_size)),
        output: args.output.clone(),
    })
}
