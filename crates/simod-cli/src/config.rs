//! Filter configuration from a TOML file and command-line overrides.
//!
//! ```toml
//! [columns]
//! case_id = ["case_id", "trace"]
//! time_suffixes = ["_time", "_at"]
//!
//! [criteria]
//! start = "2024-01-01T00:00:00Z"
//! exclude_activities = ["Cancel"]
//! activity_scope = "cases"
//!
//! [[criteria.attributes]]
//! column = "priority"
//! type = "categorical"
//! allowed = ["high"]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use simod_filter::parse_timestamp;
use simod_map::{ColumnMapper, SemanticRole};
use simod_model::{
    Activity, ActivityScope, AttributeConstraint, AttributeFilter, CaseId, FilterCriteria,
    LogMetadata,
};
use tracing::warn;

use crate::logging::redact_value;

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub columns: ColumnsConfig,
    pub criteria: CriteriaConfig,
}

impl FilterConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse filter config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// Variant list overrides for the column mapper. Unset entries keep the
/// built-in lists.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnsConfig {
    pub case_id: Option<Vec<String>>,
    pub activity: Option<Vec<String>>,
    pub resource: Option<Vec<String>>,
    pub role: Option<Vec<String>>,
    pub time_suffixes: Option<Vec<String>>,
}

impl ColumnsConfig {
    pub fn mapper(&self) -> ColumnMapper {
        let mut mapper = ColumnMapper::new();
        for role in SemanticRole::ALL {
            let overrides = match role {
                SemanticRole::CaseId => &self.case_id,
                SemanticRole::Activity => &self.activity,
                SemanticRole::Resource => &self.resource,
                SemanticRole::Role => &self.role,
            };
            if let Some(variants) = overrides {
                mapper = mapper.with_variants(role, variants.clone());
            }
        }
        if let Some(suffixes) = &self.time_suffixes {
            mapper = mapper.with_time_suffixes(suffixes.clone());
        }
        mapper
    }
}

/// Adjustments applied on top of a log's default criteria.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CriteriaConfig {
    pub start: Option<String>,
    pub end: Option<String>,
    /// Replaces the activity selection when non-empty.
    pub include_activities: Vec<String>,
    pub exclude_activities: Vec<String>,
    /// Restricts the log to these cases when non-empty.
    pub cases: Vec<String>,
    pub attributes: Vec<AttributeFilter>,
    pub activity_scope: Option<ActivityScope>,
}

impl CriteriaConfig {
    /// Layers `overrides` over `self`: set values and non-empty lists win,
    /// attribute constraints are replaced per column.
    #[must_use]
    pub fn merge(mut self, overrides: CriteriaConfig) -> Self {
        if overrides.start.is_some() {
            self.start = overrides.start;
        }
        if overrides.end.is_some() {
            self.end = overrides.end;
        }
        if !overrides.include_activities.is_empty() {
            self.include_activities = overrides.include_activities;
        }
        if !overrides.exclude_activities.is_empty() {
            self.exclude_activities = overrides.exclude_activities;
        }
        if !overrides.cases.is_empty() {
            self.cases = overrides.cases;
        }
        for filter in overrides.attributes {
            match self
                .attributes
                .iter_mut()
                .find(|existing| existing.column == filter.column)
            {
                Some(existing) => *existing = filter,
                None => self.attributes.push(filter),
            }
        }
        if overrides.activity_scope.is_some() {
            self.activity_scope = overrides.activity_scope;
        }
        self
    }

    /// Applies these adjustments to `criteria`, typically the log's defaults.
    ///
    /// Unset date bounds keep the bound already in `criteria`. Activity names
    /// and case ids that do not occur in the log are accepted with a warning.
    pub fn apply_to(&self, criteria: &mut FilterCriteria, metadata: &LogMetadata) -> Result<()> {
        if self.start.is_some() || self.end.is_some() {
            let mut range = criteria.date_range.unwrap_or_default();
            if let Some(start) = &self.start {
                range.start = Some(parse_bound("start", start)?);
            }
            if let Some(end) = &self.end {
                range.end = Some(parse_bound("end", end)?);
            }
            if let (Some(start), Some(end)) = (range.start, range.end)
                && start > end
            {
                bail!("date range start {start} is after end {end}");
            }
            criteria.date_range = Some(range);
        }

        if !self.include_activities.is_empty() {
            criteria.included_activities = self
                .include_activities
                .iter()
                .map(|name| known_activity(name, metadata))
                .collect::<Result<_>>()?;
        }
        for name in &self.exclude_activities {
            let activity = known_activity(name, metadata)?;
            criteria.exclude_activity(&activity);
        }

        if !self.cases.is_empty() {
            criteria.included_case_ids = self
                .cases
                .iter()
                .map(|raw| {
                    let case_id = CaseId::new(raw.as_str())
                        .with_context(|| format!("invalid case id {raw:?}"))?;
                    if !metadata.all_case_ids.contains(&case_id) {
                        warn!(case_id = redact_value(raw), "case id not present in log");
                    }
                    Ok(case_id)
                })
                .collect::<Result<_>>()?;
        }

        for filter in &self.attributes {
            if let AttributeConstraint::Numeric { min, max } = filter.constraint
                && (min.is_nan() || max.is_nan() || min > max)
            {
                bail!("invalid numeric range {min}..{max} for {:?}", filter.column);
            }
            criteria.set_attribute_filter(filter.clone());
        }
        if let Some(scope) = self.activity_scope {
            criteria.activity_scope = scope;
        }
        Ok(())
    }
}

fn parse_bound(label: &str, raw: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(raw).with_context(|| format!("{label} {raw:?} is not an ISO-8601 timestamp"))
}

fn known_activity(name: &str, metadata: &LogMetadata) -> Result<Activity> {
    let activity =
        Activity::new(name).with_context(|| format!("invalid activity name {name:?}"))?;
    if !metadata.all_activities.contains(&activity) {
        warn!(activity = redact_value(name), "activity not present in log");
    }
    Ok(activity)
}

/// Parses `COLUMN=VALUE[,VALUE...]` into a categorical constraint.
pub fn parse_attribute_arg(raw: &str) -> Result<AttributeFilter, String> {
    let (column, values) = split_assignment(raw)?;
    let allowed: Vec<&str> = values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();
    if allowed.is_empty() {
        return Err(format!("no values given for attribute {column:?}"));
    }
    Ok(AttributeFilter::categorical(column, allowed))
}

/// Parses `COLUMN=MIN..MAX` into a numeric constraint. Either bound may be
/// omitted to leave that side open.
pub fn parse_range_arg(raw: &str) -> Result<AttributeFilter, String> {
    let (column, range) = split_assignment(raw)?;
    let (min, max) = range
        .split_once("..")
        .ok_or_else(|| format!("expected MIN..MAX for {column:?}, got {range:?}"))?;
    let min = parse_number(min, f64::NEG_INFINITY)?;
    let max = parse_number(max, f64::INFINITY)?;
    if min > max {
        return Err(format!("range minimum {min} exceeds maximum {max}"));
    }
    Ok(AttributeFilter::numeric(column, min, max))
}

fn split_assignment(raw: &str) -> Result<(&str, &str), String> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got {raw:?}"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in {raw:?}"));
    }
    Ok((column, value.trim()))
}

fn parse_number(raw: &str, open: f64) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(open);
    }
    match raw.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(format!("{raw:?} is not a finite number")),
    }
}
