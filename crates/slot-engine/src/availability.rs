//! Build one person's availability from working hours and date overrides, and
//! combine several people into mutual availability.
//!
//! Override precedence is whole-date replacement: once a date has any
//! override, nothing the recurring rules produced for that date survives.

use chrono_tz::Tz;

use crate::dst::DstPolicy;
use crate::expander::{expand_working_hours_with_policy, resolve_override};
use crate::grouping::group_by_local_date;
use crate::interval::{BoundWindow, Interval};
use crate::intersect::intersect;
use crate::schedule::AvailabilityItem;

/// One person's schedule: the organizer timezone plus their rules and overrides.
#[derive(Debug, Clone)]
pub struct Participant {
    pub time_zone: Tz,
    pub availability: Vec<AvailabilityItem>,
}

impl Participant {
    pub fn new(time_zone: Tz, availability: Vec<AvailabilityItem>) -> Self {
        Self {
            time_zone,
            availability,
        }
    }
}

/// Compute one person's free intervals within `window`.
///
/// Recurring rules are expanded and overrides resolved, both in `tz`. The two
/// lists are grouped by local date, each override date replaces the rule
/// intervals for that date, and the result is clipped to the window.
///
/// Callers must not rely on the order of the returned intervals.
pub fn build_date_ranges(
    availability: &[AvailabilityItem],
    tz: &Tz,
    window: &BoundWindow,
) -> Vec<Interval> {
    build_date_ranges_with_policy(availability, tz, window, DstPolicy::default())
}

/// Compute one person's free intervals, with an explicit DST gap policy for
/// recurring rules.
pub fn build_date_ranges_with_policy(
    availability: &[AvailabilityItem],
    tz: &Tz,
    window: &BoundWindow,
    policy: DstPolicy,
) -> Vec<Interval> {
    let mut recurring = Vec::new();
    let mut overrides = Vec::new();

    for item in availability {
        match item {
            AvailabilityItem::WorkingHours(rule) => {
                recurring.extend(expand_working_hours_with_policy(rule, tz, window, policy));
            }
            AvailabilityItem::DateOverride(date_override) => {
                overrides.push(resolve_override(date_override, tz));
            }
        }
    }

    let mut by_date = group_by_local_date(&recurring, tz);
    let override_groups = group_by_local_date(&overrides, tz);

    for (date, intervals) in override_groups.iter() {
        if let Some(replaced) = by_date.replace_date(*date, intervals.to_vec()) {
            tracing::trace!(%date, replaced = replaced.len(), "override replaced working hours");
        }
    }

    let flattened = by_date.into_intervals();
    let clipped = intersect(&[flattened, vec![window.as_interval()]]);

    tracing::debug!(
        timezone = %tz.name(),
        rule_ranges = recurring.len(),
        override_ranges = overrides.len(),
        ranges = clipped.len(),
        "built date ranges"
    );

    clipped
}

/// Intervals during which every participant is free within `window`.
///
/// Each participant is built independently in their own timezone; the lists
/// are then intersected. No participants means no mutual availability.
pub fn mutual_availability(participants: &[Participant], window: &BoundWindow) -> Vec<Interval> {
    mutual_availability_with_policy(participants, window, DstPolicy::default())
}

/// [`mutual_availability`] with an explicit DST gap policy.
pub fn mutual_availability_with_policy(
    participants: &[Participant],
    window: &BoundWindow,
    policy: DstPolicy,
) -> Vec<Interval> {
    let per_participant: Vec<Vec<Interval>> = participants
        .iter()
        .map(|p| build_date_ranges_with_policy(&p.availability, &p.time_zone, window, policy))
        .collect();

    let common = intersect(&per_participant);

    tracing::debug!(
        participants = participants.len(),
        ranges = common.len(),
        "computed mutual availability"
    );

    common
}

/// The earliest interval lasting at least `min_duration_minutes`.
pub fn find_first_slot(intervals: &[Interval], min_duration_minutes: i64) -> Option<Interval> {
    intervals
        .iter()
        .filter(|i| i.duration_minutes() >= min_duration_minutes && !i.is_empty())
        .min_by_key(|i| i.start)
        .copied()
}
