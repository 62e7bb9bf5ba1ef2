//! Working-hours expansion -- converts recurring weekly rules and date
//! overrides into concrete intervals.
//!
//! Times of day are projected onto calendar dates in the organizer's
//! timezone, so "09:00 every Monday" in `Europe/Berlin` lands on 08:00Z in
//! winter and 07:00Z in summer.

use chrono::{Datelike, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::dst::{localize, localize_shift_forward, DstPolicy};
use crate::interval::{BoundWindow, Interval};
use crate::schedule::{DateOverride, WorkingHours};

/// Expand a recurring working-hours rule into one interval per matching day
/// of the window.
///
/// Walks local calendar days starting at `window.date_from` (as seen in `tz`)
/// while the day cursor is still before `window.date_to`. Days whose weekday is
/// in the rule produce `[date @ start_time, date @ end_time)`, seconds zeroed.
///
/// The rule is not validated: a rule whose start is not before its end still
/// produces (empty) intervals, which intersection later discards.
pub fn expand_working_hours(rule: &WorkingHours, tz: &Tz, window: &BoundWindow) -> Vec<Interval> {
    expand_working_hours_with_policy(rule, tz, window, DstPolicy::default())
}

/// Expand a recurring working-hours rule, with an explicit DST gap policy.
///
/// Identical to [`expand_working_hours`] but lets the caller choose what
/// happens to rule times that do not exist on a spring-forward date.
pub fn expand_working_hours_with_policy(
    rule: &WorkingHours,
    tz: &Tz,
    window: &BoundWindow,
    policy: DstPolicy,
) -> Vec<Interval> {
    let mut intervals = Vec::new();

    if rule.days_of_week.is_empty() {
        return intervals;
    }

    let local_from = window.date_from.with_timezone(tz);
    let cursor_time = local_from.time();
    let mut date = local_from.date_naive();

    loop {
        // The cursor keeps the wall-clock time of `date_from` on every day.
        let cursor = localize_shift_forward(tz, date.and_time(cursor_time));
        if cursor >= window.date_to {
            break;
        }

        if rule.applies_on(date.weekday()) {
            let start = rule.start_time.to_naive_time();
            let end = rule.end_time.to_naive_time();
            if let Some(interval) = project(tz, date, start, end, policy) {
                intervals.push(interval);
            }
        }

        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    tracing::trace!(
        days = ?rule.days_of_week,
        start = %rule.start_time,
        end = %rule.end_time,
        count = intervals.len(),
        "expanded working hours"
    );

    intervals
}

/// Resolve a date override into exactly one interval on its date.
///
/// Zero-length and inverted overrides are returned as-is: "no availability
/// on this date" is an empty interval, never a missing one.
pub fn resolve_override(date_override: &DateOverride, tz: &Tz) -> Interval {
    let date = date_override.date;
    Interval::new(
        localize_shift_forward(tz, date.and_time(date_override.start_time.to_naive_time())),
        localize_shift_forward(tz, date.and_time(date_override.end_time.to_naive_time())),
    )
}

/// Project a pair of wall-clock times onto `date` in `tz`.
fn project(
    tz: &Tz,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    policy: DstPolicy,
) -> Option<Interval> {
    let start = localize(tz, date.and_time(start), policy)?;
    let end = localize(tz, date.and_time(end), policy)?;
    Some(Interval::new(start, end))
}
