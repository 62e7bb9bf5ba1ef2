//! Core value types: absolute intervals, wall-clock times of day, and query windows.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};

/// A half-open span of absolute time, `[start, end)`.
///
/// Nothing guarantees `start < end`. Zero-length and inverted intervals are
/// legal values and are treated as empty by the intersection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// True when the interval covers no time at all (`start >= end`).
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length in whole minutes. Negative for inverted intervals.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Adjacent intervals (one ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The common part of two intervals, or `None` unless it has strictly
    /// positive length.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Interval { start, end })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// An hour/minute pair with no date or zone attached, e.g. "09:00".
///
/// Rules and overrides store these; they are only given meaning once projected
/// onto a calendar date in the organizer's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// Build a time of day, rejecting hours above 23 and minutes above 59.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(SlotError::InvalidTimeOfDay(format!(
                "{:02}:{:02}",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Extract the wall-clock components of a stored reference timestamp.
    ///
    /// Schedule stores keep times of day as full timestamps anchored in UTC;
    /// only the UTC hour and minute carry meaning, the date part is discarded.
    pub fn from_reference(reference: DateTime<Utc>) -> Self {
        Self {
            hour: reference.hour(),
            minute: reference.minute(),
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// The same wall-clock time as a `NaiveTime`, seconds zeroed.
    pub fn to_naive_time(self) -> NaiveTime {
        // hour/minute are range-checked on construction
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    /// Parse `"HH:MM"` or `"HH:MM:SS"`. Seconds are accepted and ignored.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTimeOfDay(s.to_string());
        let mut parts = s.trim().split(':');

        let hour = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let minute = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        if let Some(seconds) = parts.next() {
            seconds
                .parse::<u32>()
                .ok()
                .filter(|s| *s < 60)
                .ok_or_else(invalid)?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Reads `"HH:MM[:SS]"`, or a stored reference timestamp such as
/// `"1970-01-01T09:00:00.000Z"` whose UTC wall clock is kept.
impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<TimeOfDay>()
            .or_else(|err| {
                DateTime::parse_from_rfc3339(raw.trim())
                    .map(|stored| Self::from_reference(stored.with_timezone(&Utc)))
                    .map_err(|_| err)
            })
            .map_err(serde::de::Error::custom)
    }
}

/// The caller-requested query range. `date_from` is inclusive, `date_to` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundWindow {
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
}

impl BoundWindow {
    pub const fn new(date_from: DateTime<Utc>, date_to: DateTime<Utc>) -> Self {
        Self { date_from, date_to }
    }

    /// The window as a single bounding interval, used to clip availability.
    pub fn as_interval(&self) -> Interval {
        Interval::new(self.date_from, self.date_to)
    }
}

/// Parse an IANA timezone identifier such as `"America/Los_Angeles"`.
pub fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))
}
