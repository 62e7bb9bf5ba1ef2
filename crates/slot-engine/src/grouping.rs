//! Bucket intervals by the local calendar date they start on.
//!
//! The date key is the join point between recurring-rule intervals and
//! override intervals: an override replaces everything the rules produced
//! for the same key.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::interval::Interval;

/// Intervals keyed by local calendar date (`Display` gives `YYYY-MM-DD`).
///
/// Within a date, intervals keep the order they were added in; nothing is
/// merged or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateGroups {
    groups: BTreeMap<NaiveDate, Vec<Interval>>,
}

impl DateGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interval under its start date as seen in `tz`.
    pub fn insert(&mut self, interval: Interval, tz: &Tz) {
        let key = interval.start.with_timezone(tz).date_naive();
        self.groups.entry(key).or_default().push(interval);
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&[Interval]> {
        self.groups.get(date).map(Vec::as_slice)
    }

    /// Dates present, ascending.
    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.groups.keys()
    }

    /// Iterate `(date, intervals)` pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &[Interval])> {
        self.groups.iter().map(|(date, list)| (date, list.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Replace every interval stored under `date` with `intervals`.
    ///
    /// Returns whatever was stored there before.
    pub fn replace_date(&mut self, date: NaiveDate, intervals: Vec<Interval>) -> Option<Vec<Interval>> {
        self.groups.insert(date, intervals)
    }

    /// Flatten into one list, dates ascending.
    pub fn into_intervals(self) -> Vec<Interval> {
        self.groups.into_values().flatten().collect()
    }
}

/// Group intervals by the local date (in `tz`) of their start instant.
pub fn group_by_local_date(intervals: &[Interval], tz: &Tz) -> DateGroups {
    let mut groups = DateGroups::new();
    for interval in intervals {
        groups.insert(*interval, tz);
    }
    groups
}
