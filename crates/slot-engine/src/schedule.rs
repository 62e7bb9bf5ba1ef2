//! A person's availability configuration: recurring working hours plus
//! one-off date overrides.
//!
//! In JSON the two shapes are distinguished the same way the schedule store
//! emits them: an item with a `date` is an override, an item with `days` is a
//! recurring rule.

use chrono::{NaiveDate, Weekday};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::TimeOfDay;

/// "Every {days}, free from `start_time` to `end_time`."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(rename = "days", alias = "days_of_week", alias = "daysOfWeek", with = "weekday_list")]
    pub days_of_week: Vec<Weekday>,
    #[serde(alias = "startTime")]
    pub start_time: TimeOfDay,
    #[serde(alias = "endTime")]
    pub end_time: TimeOfDay,
}

impl WorkingHours {
    pub fn new(days_of_week: Vec<Weekday>, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            days_of_week,
            start_time,
            end_time,
        }
    }

    pub fn applies_on(&self, weekday: Weekday) -> bool {
        self.days_of_week.contains(&weekday)
    }
}

/// Replaces whatever the recurring rules produce for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOverride {
    #[serde(with = "override_date")]
    pub date: NaiveDate,
    #[serde(alias = "startTime")]
    pub start_time: TimeOfDay,
    #[serde(alias = "endTime")]
    pub end_time: TimeOfDay,
}

impl DateOverride {
    pub fn new(date: NaiveDate, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            date,
            start_time,
            end_time,
        }
    }
}

/// One entry of a person's availability list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AvailabilityItem {
    DateOverride(DateOverride),
    WorkingHours(WorkingHours),
}

impl<'de> Deserialize<'de> for AvailabilityItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_override = match &value {
            serde_json::Value::Object(fields) => fields.contains_key("date"),
            other => {
                return Err(de::Error::custom(format!(
                    "availability item must be an object, got {}",
                    other
                )))
            }
        };
        let item = if is_override {
            serde_json::from_value(value).map(AvailabilityItem::DateOverride)
        } else {
            serde_json::from_value(value).map(AvailabilityItem::WorkingHours)
        };
        item.map_err(de::Error::custom)
    }
}

impl From<WorkingHours> for AvailabilityItem {
    fn from(rule: WorkingHours) -> Self {
        AvailabilityItem::WorkingHours(rule)
    }
}

impl From<DateOverride> for AvailabilityItem {
    fn from(date_override: DateOverride) -> Self {
        AvailabilityItem::DateOverride(date_override)
    }
}

/// Parse a weekday from either a day number (0 = Sunday … 6 = Saturday) or a
/// name such as `"Mon"` or `"monday"`.
pub fn parse_weekday(raw: &str) -> Result<Weekday> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u8>() {
        return weekday_from_sunday_index(n)
            .ok_or_else(|| SlotError::InvalidWeekday(raw.to_string()));
    }
    trimmed
        .parse::<Weekday>()
        .map_err(|_| SlotError::InvalidWeekday(raw.to_string()))
}

fn weekday_from_sunday_index(n: u8) -> Option<Weekday> {
    match n {
        0 => Some(Weekday::Sun),
        1..=6 => Weekday::try_from(n - 1).ok(),
        _ => None,
    }
}

/// Serde adapter: override dates are written as `YYYY-MM-DD` and read from
/// that or from a stored timestamp, keeping its UTC date.
mod override_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::{self, Deserializer};
    use serde::ser::Serializer;
    use serde::Deserialize;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(date)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.trim();
        trimmed
            .parse::<NaiveDate>()
            .or_else(|_| {
                DateTime::parse_from_rfc3339(trimmed)
                    .map(|stored| stored.with_timezone(&Utc).date_naive())
            })
            .map_err(|_| de::Error::custom(format!("Invalid override date: {}", raw)))
    }
}

/// Serde adapter: weekdays are written as Sunday-based day numbers and read
/// from numbers or names.
mod weekday_list {
    use chrono::Weekday;
    use serde::de::{self, Deserializer};
    use serde::ser::{SerializeSeq, Serializer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDay {
        Number(u8),
        Name(String),
    }

    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(days.len()))?;
        for day in days {
            seq.serialize_element(&day.num_days_from_sunday())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Weekday>, D::Error> {
        let raw = Vec::<RawDay>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|day| match day {
                RawDay::Number(n) => super::weekday_from_sunday_index(n)
                    .ok_or_else(|| de::Error::custom(format!("Invalid weekday: {}", n))),
                RawDay::Name(name) => super::parse_weekday(&name).map_err(de::Error::custom),
            })
            .collect()
    }
}
