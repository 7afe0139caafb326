//! Timeline projection: records grouped by the month they were applied to.
//!
//! Records without a parseable applied date cannot be placed on the timeline
//! and are left out of every group, including the "all months" selection.
//! The plain list view still shows them.

use crate::job::JobRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sortable year-month token, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Long month and year, e.g. "March 2024".
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|first| first.format("%B %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid month '{}', expected YYYY-MM", raw);
        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

/// Records applied to within one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup<'a> {
    pub key: MonthKey,
    pub label: String,
    pub records: Vec<&'a JobRecord>,
}

impl MonthGroup<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Which part of the timeline is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthSelection {
    #[default]
    All,
    Month(MonthKey),
}

impl FromStr for MonthSelection {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(MonthSelection::All);
        }
        raw.parse().map(MonthSelection::Month)
    }
}

/// Month groups, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline<'a> {
    pub groups: Vec<MonthGroup<'a>>,
}

impl<'a> Timeline<'a> {
    /// The month keys in display order.
    pub fn months(&self) -> Vec<MonthKey> {
        self.groups.iter().map(|group| group.key).collect()
    }

    pub fn group(&self, key: MonthKey) -> Option<&MonthGroup<'a>> {
        self.groups.iter().find(|group| group.key == key)
    }

    /// Records shown for `selection`. An unknown month shows nothing.
    pub fn select(&self, selection: MonthSelection) -> Vec<&'a JobRecord> {
        match selection {
            MonthSelection::All => self
                .groups
                .iter()
                .flat_map(|group| group.records.iter().copied())
                .collect(),
            MonthSelection::Month(key) => self
                .group(key)
                .map(|group| group.records.clone())
                .unwrap_or_default(),
        }
    }
}

/// Groups `records` by applied month.
///
/// Accepts the full set or an already-filtered view. Within a group, records
/// keep their input order.
pub fn project_timeline<'a, I>(records: I) -> Timeline<'a>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut by_month: BTreeMap<MonthKey, Vec<&'a JobRecord>> = BTreeMap::new();
    for record in records {
        match record.applied_on() {
            Some(date) => by_month.entry(MonthKey::of(date)).or_default().push(record),
            None => tracing::trace!(
                "[Timeline] Skipping record {} without a usable applied date",
                record.id
            ),
        }
    }

    let groups = by_month
        .into_iter()
        .rev()
        .map(|(key, records)| MonthGroup {
            key,
            label: key.label(),
            records,
        })
        .collect();

    Timeline { groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(id: i64, date: Option<&str>) -> JobRecord {
        let mut record = JobRecord::new(id, format!("Company {}", id), "Engineer");
        record.date_applied = date.map(str::to_string);
        record
    }

    #[test]
    fn test_twelve_records_over_four_months() {
        let dates = [
            "2024-01-03", "2024-01-20", "2024-01-31",
            "2024-02-01", "2024-02-14", "2024-02-29",
            "2024-03-05", "2024-03-06", "2024-03-30",
            "2023-12-01", "2023-12-15", "2023-12-31",
        ];
        let mut records: Vec<JobRecord> = dates
            .iter()
            .enumerate()
            .map(|(i, date)| dated(i as i64, Some(date)))
            .collect();
        records.push(dated(100, None));
        records.push(dated(101, Some("whenever")));

        let timeline = project_timeline(&records);

        assert_eq!(timeline.groups.len(), 4);
        let keys: Vec<String> = timeline.months().iter().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["2024-03", "2024-02", "2024-01", "2023-12"]);

        for group in &timeline.groups {
            assert_eq!(group.len(), 3);
            for record in &group.records {
                assert_eq!(MonthKey::of(record.applied_on().unwrap()), group.key);
            }
        }

        let all = timeline.select(MonthSelection::All);
        assert_eq!(all.len(), 12);
        assert!(all.iter().all(|record| record.id.as_str() != "100" && record.id.as_str() != "101"));
    }

    #[test]
    fn test_labels_and_selection() {
        let records = vec![dated(1, Some("2024-03-05")), dated(2, Some("2024-02-01"))];
        let timeline = project_timeline(&records);

        assert_eq!(timeline.groups[0].label, "March 2024");
        let march: MonthSelection = "2024-03".parse().unwrap();
        assert_eq!(timeline.select(march).len(), 1);

        let empty: MonthSelection = "1999-01".parse().unwrap();
        assert!(timeline.select(empty).is_empty());
        assert_eq!("ALL".parse::<MonthSelection>().unwrap(), MonthSelection::All);
    }

    #[test]
    fn test_month_key_parsing() {
        assert_eq!(
            "2024-03".parse::<MonthKey>().unwrap(),
            MonthKey { year: 2024, month: 3 }
        );
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("March".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_projection_accepts_filtered_view() {
        let records = vec![dated(1, Some("2024-03-05")), dated(2, Some("2024-02-01"))];
        let filtered: Vec<&JobRecord> = records.iter().filter(|r| r.id.as_str() == "2").collect();
        let timeline = project_timeline(filtered);
        assert_eq!(timeline.months(), vec![MonthKey { year: 2024, month: 2 }]);
    }
}
