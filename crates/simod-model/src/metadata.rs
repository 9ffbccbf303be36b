//! Descriptive metadata derived from a loaded event log.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Activity, CaseId};

/// Share of cases an activity must appear in to count as essential.
pub const ESSENTIAL_COVERAGE_RATIO: f64 = 0.5;

/// Distinct identifiers, global time bounds and activity coverage of a log.
///
/// `all_activities` and `all_case_ids` keep first-seen order so pickers list
/// them the way the log presents them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogMetadata {
    pub all_activities: Vec<Activity>,
    pub all_case_ids: Vec<CaseId>,
    pub min_timestamp: Option<DateTime<Utc>>,
    pub max_timestamp: Option<DateTime<Utc>>,
    /// Number of distinct cases containing each activity. Activities that
    /// never occur have no entry.
    pub activity_case_coverage: BTreeMap<Activity, usize>,
}

impl LogMetadata {
    pub fn case_count(&self) -> usize {
        self.all_case_ids.len()
    }

    pub fn coverage(&self, activity: &Activity) -> usize {
        self.activity_case_coverage
            .get(activity)
            .copied()
            .unwrap_or(0)
    }

    /// Fraction of cases containing the activity, 0.0 for a log without cases.
    pub fn coverage_ratio(&self, activity: &Activity) -> f64 {
        let cases = self.case_count();
        if cases == 0 {
            0.0
        } else {
            self.coverage(activity) as f64 / cases as f64
        }
    }

    pub fn is_essential(&self, activity: &Activity) -> bool {
        self.case_count() > 0 && self.coverage_ratio(activity) >= ESSENTIAL_COVERAGE_RATIO
    }

    pub fn essential_activities(&self) -> Vec<&Activity> {
        self.all_activities
            .iter()
            .filter(|activity| self.is_essential(activity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(name: &str) -> Activity {
        Activity::new(name).unwrap()
    }

    #[test]
    fn missing_coverage_counts_as_zero() {
        let metadata = LogMetadata::default();
        assert_eq!(metadata.coverage(&activity("A")), 0);
        assert!(!metadata.is_essential(&activity("A")));
    }

    #[test]
    fn essential_threshold_is_inclusive() {
        let mut metadata = LogMetadata {
            all_activities: vec![activity("A"), activity("B")],
            all_case_ids: vec![
                CaseId::new("1").unwrap(),
                CaseId::new("2").unwrap(),
                CaseId::new("3").unwrap(),
                CaseId::new("4").unwrap(),
            ],
            ..LogMetadata::default()
        };
        metadata.activity_case_coverage.insert(activity("A"), 2);
        metadata.activity_case_coverage.insert(activity("B"), 1);

        assert!(metadata.is_essential(&activity("A")));
        assert!(!metadata.is_essential(&activity("B")));
        assert_eq!(metadata.essential_activities(), vec![&activity("A")]);
    }
}
