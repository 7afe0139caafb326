//! The list pipeline: search, status filter, sort.

use super::state::{SortKey, SortOrder, ViewState};
use crate::job::JobRecord;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Produces the visible, ordered subset of `records` for `view`.
///
/// The result borrows from `records`; no record is copied.
pub fn derive_view<'a>(records: &'a [JobRecord], view: &ViewState) -> Vec<&'a JobRecord> {
    let needle = view.search_term.to_lowercase();

    let mut visible: Vec<&JobRecord> = records
        .iter()
        .filter(|record| matches_search(record, &needle))
        .filter(|record| matches_status(record, view))
        .collect();

    visible.sort_by(|a, b| compare_records(a, b, view.sort_key, view.sort_order));
    visible
}

/// Case-insensitive substring match on company, position or resume.
///
/// `needle` must already be lowercased; an empty needle matches everything.
pub fn matches_search(record: &JobRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        Some(record.company.as_str()),
        Some(record.position.as_str()),
        record.resume_used.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Exact status match; no filter matches everything.
pub fn matches_status(record: &JobRecord, view: &ViewState) -> bool {
    match &view.status_filter {
        None => true,
        Some(status) => record.status.as_ref() == Some(status),
    }
}

/// Comparator for `key`, inverted for descending order.
///
/// Undated (or unparseable) records sort as the oldest. Text keys compare
/// case-insensitively.
pub fn compare_records(a: &JobRecord, b: &JobRecord, key: SortKey, order: SortOrder) -> Ordering {
    let ordering = match key {
        SortKey::DateApplied => date_sort_key(a).cmp(&date_sort_key(b)),
        SortKey::Company => cmp_text(&a.company, &b.company),
        SortKey::Position => cmp_text(&a.position, &b.position),
        SortKey::Status => cmp_text(status_text(a), status_text(b)),
    };

    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

fn date_sort_key(record: &JobRecord) -> NaiveDate {
    record.applied_on().unwrap_or(NaiveDate::MIN)
}

fn status_text(record: &JobRecord) -> &str {
    record.status.as_ref().map_or("", |status| status.as_str())
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
