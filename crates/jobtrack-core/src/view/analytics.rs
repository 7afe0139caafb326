//! Aggregate figures over the full authoritative set.

use crate::job::{JobRecord, JobStatus};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Length of the recent-activity window.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Dashboard statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analytics {
    /// Number of records.
    pub total: usize,
    /// One entry per known status, in [`JobStatus::KNOWN`] order, zero-filled.
    pub by_status: Vec<(JobStatus, usize)>,
    /// Records whose status is absent or unrecognised.
    pub other_status: usize,
    /// Records applied to within the last [`RECENT_WINDOW_DAYS`] days.
    pub recent: usize,
}

impl Analytics {
    /// Count for one status; unrecognised values report `other_status`.
    pub fn count(&self, status: &JobStatus) -> usize {
        self.by_status
            .iter()
            .find(|(known, _)| known == status)
            .map_or(self.other_status, |(_, count)| *count)
    }
}

/// Computes statistics over `records`.
///
/// Always pass the full set, not a filtered view. `today` is the current
/// date; a record counts as recent when its applied date lies in
/// `[today - 30 days, today]`. Unparseable dates are skipped.
pub fn compute_analytics(records: &[JobRecord], today: NaiveDate) -> Analytics {
    let mut by_status: Vec<(JobStatus, usize)> =
        JobStatus::KNOWN.iter().cloned().map(|status| (status, 0)).collect();
    let mut other_status = 0;

    for record in records {
        let slot = record
            .status
            .as_ref()
            .and_then(|status| by_status.iter_mut().find(|(known, _)| known == status));
        match slot {
            Some((_, count)) => *count += 1,
            None => other_status += 1,
        }
    }

    let window_start = today - Duration::days(RECENT_WINDOW_DAYS);
    let recent = records
        .iter()
        .filter_map(JobRecord::applied_on)
        .filter(|applied| *applied >= window_start && *applied <= today)
        .count();

    Analytics {
        total: records.len(),
        by_status,
        other_status,
        recent,
    }
}
