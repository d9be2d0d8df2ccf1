//! Alert filtering

use super::criteria::{matches_search, matches_text, within_range};
use crate::models::{Alert, AlertStatus, Severity};
use chrono::{DateTime, Utc};

/// Active constraints for an alert query. Every field is optional; an
/// unset field places no constraint. The "all" sentinel of the dashboard
/// UI maps to `None` at the query boundary, before this type is built.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub severity: Option<Severity>,
    pub status: Option<AlertStatus>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl AlertFilter {
    /// True when every active constraint holds for the alert.
    pub fn matches(&self, alert: &Alert) -> bool {
        self.severity.map_or(true, |s| alert.severity == Some(s))
            && self.status.map_or(true, |s| alert.status == Some(s))
            && matches_text(self.category.as_deref(), alert.category.as_deref())
            && matches_text(self.location.as_deref(), alert.location.as_deref())
            && matches_search(
                self.search.as_deref(),
                &[
                    alert.title.as_str(),
                    alert.description.as_str(),
                    alert.location.as_deref().unwrap_or(""),
                ],
            )
            && within_range(self.start, self.end, alert.timestamp)
    }
}

/// Apply the filter and return the survivors sorted most-recent first.
/// The sort is stable; alerts without a timestamp sort last.
pub fn filter_alerts(alerts: &[Alert], filter: &AlertFilter) -> Vec<Alert> {
    let mut kept: Vec<Alert> = alerts
        .iter()
        .filter(|a| filter.matches(a))
        .cloned()
        .collect();
    kept.sort_by_key(|a| std::cmp::Reverse(a.timestamp.map(|t| t.timestamp_millis()).unwrap_or(i64::MIN)));
    kept
}
