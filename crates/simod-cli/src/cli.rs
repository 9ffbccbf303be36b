//! CLI argument definitions for the event log filter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use simod_cli::config::{CriteriaConfig, parse_attribute_arg, parse_range_arg};
use simod_filter::DEFAULT_PAGE_SIZE;
use simod_model::{ActivityScope, AttributeFilter};

#[derive(Parser)]
#[command(
    name = "simod",
    version,
    about = "Map, inspect and filter process event logs",
    long_about = "Map, inspect and filter process event logs.\n\n\
                  Reads CSV or JSON logs, resolves the case id, activity and timestamp\n\
                  columns, and applies date, attribute, activity and case filters in a\n\
                  fixed order while reporting how many rows each filter removed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow case ids and activity labels to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how the log's columns resolve to case id, activity, time and attribute columns.
    Columns(SourceArgs),

    /// Summarize activities, cases, time span and attribute values.
    Inspect(SourceArgs),

    /// Filter the log and report the rows removed by each filter.
    Filter(FilterArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Event log file (.csv or .json).
    #[arg(value_name = "LOG")]
    pub log: PathBuf,

    /// TOML file with column overrides and filter criteria.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Keep rows whose primary timestamp is at or after this instant.
    #[arg(long = "start", value_name = "ISO-8601")]
    pub start: Option<String>,

    /// Keep rows whose primary timestamp is at or before this instant.
    #[arg(long = "end", value_name = "ISO-8601")]
    pub end: Option<String>,

    /// Only keep these activities (repeatable). Defaults to all activities.
    #[arg(long = "include-activity", value_name = "NAME")]
    pub include_activities: Vec<String>,

    /// Exclude an activity (repeatable).
    #[arg(long = "exclude-activity", value_name = "NAME")]
    pub exclude_activities: Vec<String>,

    /// Only keep these cases (repeatable).
    #[arg(long = "case", value_name = "CASE_ID")]
    pub cases: Vec<String>,

    /// Categorical attribute filter (repeatable).
    #[arg(long = "attr", value_name = "COLUMN=V1,V2", value_parser = parse_attribute_arg)]
    pub attributes: Vec<AttributeFilter>,

    /// Numeric attribute filter; either bound may be omitted (repeatable).
    #[arg(long = "range", value_name = "COLUMN=MIN..MAX", value_parser = parse_range_arg)]
    pub ranges: Vec<AttributeFilter>,

    /// Whether an excluded activity removes its whole case or only its own rows.
    #[arg(long = "activity-scope", value_enum)]
    pub activity_scope: Option<ActivityScopeArg>,

    /// Write the filtered log to this file (.csv or .json).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print this page of the filtered rows.
    #[arg(long = "page", value_name = "N")]
    pub page: Option<usize>,

    /// Rows per printed page.
    #[arg(long = "page-size", value_name = "N", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Exit with an error when no rows survive filtering.
    #[arg(long = "fail-on-empty")]
    pub fail_on_empty: bool,
}

impl FilterArgs {
    /// Criteria adjustments given on the command line.
    pub fn criteria_overrides(&self) -> CriteriaConfig {
        CriteriaConfig {
            start: self.start.clone(),
            end: self.end.clone(),
            include_activities: self.include_activities.clone(),
            exclude_activities: self.exclude_activities.clone(),
            cases: self.cases.clone(),
            attributes: self
                .attributes
                .iter()
                .chain(&self.ranges)
                .cloned()
                .collect(),
            activity_scope: self.activity_scope.map(ActivityScope::from),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ActivityScopeArg {
    Cases,
    Rows,
}

impl From<ActivityScopeArg> for ActivityScope {
    fn from(value: ActivityScopeArg) -> Self {
        match value {
            ActivityScopeArg::Cases => ActivityScope::Cases,
            ActivityScopeArg::Rows => ActivityScope::Rows,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
