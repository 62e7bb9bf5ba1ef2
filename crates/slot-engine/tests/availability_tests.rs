//! Tests for per-person availability building, date grouping, and mutual
//! availability across participants.

use chrono::{DateTime, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use slot_engine::{
    build_date_ranges, find_first_slot, group_by_local_date, intersect, mutual_availability,
    subtract, AvailabilityItem, BoundWindow, DateOverride, Interval, Participant, TimeOfDay,
    WorkingHours,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn interval(start: DateTime<Utc>, end: DateTime<Utc>) -> Interval {
    Interval::new(start, end)
}

fn time(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn working_hours(days: &[Weekday], start: &str, end: &str) -> AvailabilityItem {
    WorkingHours::new(days.to_vec(), time(start), time(end)).into()
}

fn date_override(y: i32, m: u32, d: u32, start: &str, end: &str) -> AvailabilityItem {
    DateOverride::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), time(start), time(end)).into()
}

fn first_week_of_2024() -> BoundWindow {
    BoundWindow::new(utc(2024, 1, 1, 0, 0), utc(2024, 1, 8, 0, 0))
}

fn sorted(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort();
    intervals
}

fn mon_wed_fri() -> AvailabilityItem {
    working_hours(&[Weekday::Mon, Weekday::Wed, Weekday::Fri], "09:00", "17:00")
}

// ── Date grouping ───────────────────────────────────────────────────────────

#[test]
fn grouping_keys_on_local_start_date() {
    let ranges = vec![
        interval(utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 10, 0)),
        interval(utc(2024, 1, 1, 23, 30), utc(2024, 1, 2, 0, 30)),
        interval(utc(2024, 1, 1, 14, 0), utc(2024, 1, 1, 15, 0)),
    ];

    let groups = group_by_local_date(&ranges, &Tz::UTC);

    let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(jan1.to_string(), "2024-01-01");
    // Insertion order is kept; nothing is merged.
    assert_eq!(groups.get(&jan1).unwrap(), ranges.as_slice());
}

#[test]
fn grouping_uses_the_given_timezone() {
    // 23:30Z on Jan 1 is already Jan 2 in Berlin.
    let berlin: Tz = "Europe/Berlin".parse().unwrap();
    let ranges = vec![
        interval(utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 10, 0)),
        interval(utc(2024, 1, 1, 23, 30), utc(2024, 1, 2, 0, 30)),
    ];

    let groups = group_by_local_date(&ranges, &berlin);

    let dates: Vec<String> = groups.dates().map(|d| d.to_string()).collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);
}

#[test]
fn replace_date_drops_previous_entries() {
    let ranges = vec![
        interval(utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 12, 0)),
        interval(utc(2024, 1, 1, 13, 0), utc(2024, 1, 1, 17, 0)),
    ];
    let mut groups = group_by_local_date(&ranges, &Tz::UTC);
    let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let replacement = vec![interval(utc(2024, 1, 1, 10, 0), utc(2024, 1, 1, 11, 0))];

    let previous = groups.replace_date(jan1, replacement.clone());

    assert_eq!(previous, Some(ranges));
    assert_eq!(groups.into_intervals(), replacement);
}

// ── Single-person availability ──────────────────────────────────────────────

#[test]
fn working_hours_only_builds_each_matching_day() {
    let result = sorted(build_date_ranges(&[mon_wed_fri()], &Tz::UTC, &first_week_of_2024()));

    assert_eq!(
        result,
        vec![
            interval(utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 17, 0)),
            interval(utc(2024, 1, 3, 9, 0), utc(2024, 1, 3, 17, 0)),
            interval(utc(2024, 1, 5, 9, 0), utc(2024, 1, 5, 17, 0)),
        ]
    );
}

#[test]
fn override_replaces_working_hours_for_its_date() {
    let availability = vec![mon_wed_fri(), date_override(2024, 1, 1, "10:00", "12:00")];

    let result = sorted(build_date_ranges(&availability, &Tz::UTC, &first_week_of_2024()));

    // Monday comes only from the override; 09:00-17:00 is gone, not merged.
    assert_eq!(
        result,
        vec![
            interval(utc(2024, 1, 1, 10, 0), utc(2024, 1, 1, 12, 0)),
            interval(utc(2024, 1, 3, 9, 0), utc(2024, 1, 3, 17, 0)),
            interval(utc(2024, 1, 5, 9, 0), utc(2024, 1, 5, 17, 0)),
        ]
    );
}

#[test]
fn override_order_in_input_does_not_matter() {
    let a = vec![date_override(2024, 1, 3, "08:00", "09:00"), mon_wed_fri()];
    let b = vec![mon_wed_fri(), date_override(2024, 1, 3, "08:00", "09:00")];

    let ra = sorted(build_date_ranges(&a, &Tz::UTC, &first_week_of_2024()));
    let rb = sorted(build_date_ranges(&b, &Tz::UTC, &first_week_of_2024()));

    assert_eq!(ra, rb);
    assert!(ra.contains(&interval(utc(2024, 1, 3, 8, 0), utc(2024, 1, 3, 9, 0))));
    assert!(!ra.iter().any(|i| i.start == utc(2024, 1, 3, 9, 0)));
}

#[test]
fn multiple_overrides_on_one_date_are_all_kept() {
    let availability = vec![
        mon_wed_fri(),
        date_override(2024, 1, 1, "08:00", "09:00"),
        date_override(2024, 1, 1, "18:00", "19:00"),
    ];

    let result = sorted(build_date_ranges(&availability, &Tz::UTC, &first_week_of_2024()));

    assert_eq!(result.len(), 4);
    assert_eq!(result[0], interval(utc(2024, 1, 1, 8, 0), utc(2024, 1, 1, 9, 0)));
    assert_eq!(result[1], interval(utc(2024, 1, 1, 18, 0), utc(2024, 1, 1, 19, 0)));
}

#[test]
fn zero_length_override_blocks_the_whole_date() {
    let availability = vec![mon_wed_fri(), date_override(2024, 1, 3, "00:00", "00:00")];

    let result = sorted(build_date_ranges(&availability, &Tz::UTC, &first_week_of_2024()));

    assert_eq!(result.len(), 2);
    let wednesday = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
    assert!(result.iter().all(|i| i.start.date_naive() != wednesday));
}

#[test]
fn override_on_a_non_working_day_adds_availability() {
    // 2024-01-06 is a Saturday.
    let availability = vec![mon_wed_fri(), date_override(2024, 1, 6, "10:00", "14:00")];

    let result = sorted(build_date_ranges(&availability, &Tz::UTC, &first_week_of_2024()));

    assert_eq!(result.len(), 4);
    assert_eq!(result[3], interval(utc(2024, 1, 6, 10, 0), utc(2024, 1, 6, 14, 0)));
}

#[test]
fn results_are_clipped_to_the_window() {
    let window = BoundWindow::new(utc(2024, 1, 1, 12, 0), utc(2024, 1, 3, 14, 0));

    let result = sorted(build_date_ranges(&[mon_wed_fri()], &Tz::UTC, &window));

    assert_eq!(
        result,
        vec![
            interval(utc(2024, 1, 1, 12, 0), utc(2024, 1, 1, 17, 0)),
            interval(utc(2024, 1, 3, 9, 0), utc(2024, 1, 3, 14, 0)),
        ]
    );
}

#[test]
fn day_cursor_keeps_the_window_start_wall_clock() {
    // The day cursor for Wednesday is 12:00, which is already past the
    // window end, so Wednesday's working hours are never expanded.
    let window = BoundWindow::new(utc(2024, 1, 1, 12, 0), utc(2024, 1, 3, 10, 0));

    let result = build_date_ranges(&[mon_wed_fri()], &Tz::UTC, &window);

    assert_eq!(result, vec![interval(utc(2024, 1, 1, 12, 0), utc(2024, 1, 1, 17, 0))]);
}

#[test]
fn overrides_outside_the_window_are_dropped() {
    let availability = vec![date_override(2024, 2, 1, "09:00", "17:00")];

    let result = build_date_ranges(&availability, &Tz::UTC, &first_week_of_2024());

    assert!(result.is_empty());
}

#[test]
fn empty_availability_builds_nothing() {
    assert!(build_date_ranges(&[], &Tz::UTC, &first_week_of_2024()).is_empty());
}

#[test]
fn override_precedence_in_non_utc_timezone() {
    // Berlin (UTC+1): the Monday rule 09:00-17:00 is 08:00Z-16:00Z and the
    // override 10:00-12:00 is 09:00Z-11:00Z.
    let berlin: Tz = "Europe/Berlin".parse().unwrap();
    let availability = vec![
        working_hours(&[Weekday::Mon], "09:00", "17:00"),
        date_override(2024, 1, 1, "10:00", "12:00"),
    ];
    let window = BoundWindow::new(utc(2023, 12, 31, 23, 0), utc(2024, 1, 7, 23, 0));

    let result = build_date_ranges(&availability, &berlin, &window);

    assert_eq!(result, vec![interval(utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 11, 0))]);
}

// ── Mutual availability ─────────────────────────────────────────────────────

#[test]
fn two_participants_share_only_their_overlap() {
    let a = Participant::new(Tz::UTC, vec![working_hours(&[Weekday::Mon], "09:00", "17:00")]);
    let b = Participant::new(Tz::UTC, vec![working_hours(&[Weekday::Mon], "13:00", "18:00")]);

    let result = mutual_availability(&[a, b], &first_week_of_2024());

    assert_eq!(result, vec![interval(utc(2024, 1, 1, 13, 0), utc(2024, 1, 1, 17, 0))]);
}

#[test]
fn participants_in_different_timezones() {
    // London 09:00-17:00 = 09:00Z-17:00Z; New York 09:00-17:00 EST = 14:00Z-22:00Z.
    let london = Participant::new(
        "Europe/London".parse().unwrap(),
        vec![working_hours(&[Weekday::Tue], "09:00", "17:00")],
    );
    let new_york = Participant::new(
        "America/New_York".parse().unwrap(),
        vec![working_hours(&[Weekday::Tue], "09:00", "17:00")],
    );

    let result = mutual_availability(&[london, new_york], &first_week_of_2024());

    assert_eq!(result, vec![interval(utc(2024, 1, 2, 14, 0), utc(2024, 1, 2, 17, 0))]);
}

#[test]
fn no_participants_means_no_availability() {
    assert!(mutual_availability(&[], &first_week_of_2024()).is_empty());
}

#[test]
fn participant_with_nothing_blocks_everyone() {
    let a = Participant::new(Tz::UTC, vec![mon_wed_fri()]);
    let b = Participant::new(Tz::UTC, vec![]);

    assert!(mutual_availability(&[a, b], &first_week_of_2024()).is_empty());
}

#[test]
fn full_pipeline_with_busy_time_removed() {
    let a = Participant::new(Tz::UTC, vec![mon_wed_fri()]);
    let b = Participant::new(
        Tz::UTC,
        vec![working_hours(&[Weekday::Mon, Weekday::Wed], "12:00", "18:00")],
    );
    let busy = vec![
        interval(utc(2024, 1, 1, 14, 0), utc(2024, 1, 1, 15, 0)),
        interval(utc(2024, 1, 3, 12, 0), utc(2024, 1, 3, 17, 0)),
    ];

    let free = mutual_availability(&[a, b], &first_week_of_2024());
    let slots = sorted(subtract(&free, &busy));

    assert_eq!(
        slots,
        vec![
            interval(utc(2024, 1, 1, 12, 0), utc(2024, 1, 1, 14, 0)),
            interval(utc(2024, 1, 1, 15, 0), utc(2024, 1, 1, 17, 0)),
        ]
    );
}

#[test]
fn mutual_availability_matches_manual_intersection() {
    let a = Participant::new(Tz::UTC, vec![mon_wed_fri()]);
    let b = Participant::new(Tz::UTC, vec![working_hours(&[Weekday::Wed], "16:00", "20:00")]);
    let window = first_week_of_2024();

    let manual = intersect(&[
        build_date_ranges(&a.availability, &a.time_zone, &window),
        build_date_ranges(&b.availability, &b.time_zone, &window),
    ]);

    assert_eq!(mutual_availability(&[a, b], &window), manual);
}

// ── First slot ──────────────────────────────────────────────────────────────

#[test]
fn first_slot_skips_short_intervals() {
    let intervals = vec![
        interval(utc(2024, 1, 1, 15, 0), utc(2024, 1, 1, 17, 0)),
        interval(utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 9, 30)),
        interval(utc(2024, 1, 1, 11, 0), utc(2024, 1, 1, 12, 0)),
    ];

    let slot = find_first_slot(&intervals, 60);

    assert_eq!(slot, Some(interval(utc(2024, 1, 1, 11, 0), utc(2024, 1, 1, 12, 0))));
    assert_eq!(find_first_slot(&intervals, 180), None);
}

// ── Documents ───────────────────────────────────────────────────────────────

#[test]
fn document_evaluates_to_sorted_free_slots() {
    use slot_engine::document::AvailabilityDocument;
    use slot_engine::DstPolicy;

    let json = r#"{
        "window": {"date_from": "2024-01-01T00:00:00Z", "date_to": "2024-01-08T00:00:00Z"},
        "participants": [
            {"time_zone": "UTC", "availability": [
                {"days": [1, 3, 5], "start_time": "09:00", "end_time": "17:00"},
                {"date": "2024-01-01", "start_time": "10:00", "end_time": "12:00"}
            ]}
        ],
        "busy": [{"start": "2024-01-03T12:00:00Z", "end": "2024-01-03T13:00:00Z"}]
    }"#;

    let document = AvailabilityDocument::from_json(json).unwrap();
    let slots = document.evaluate(DstPolicy::ShiftForward).unwrap();

    assert_eq!(
        slots,
        vec![
            interval(utc(2024, 1, 1, 10, 0), utc(2024, 1, 1, 12, 0)),
            interval(utc(2024, 1, 3, 9, 0), utc(2024, 1, 3, 12, 0)),
            interval(utc(2024, 1, 3, 13, 0), utc(2024, 1, 3, 17, 0)),
            interval(utc(2024, 1, 5, 9, 0), utc(2024, 1, 5, 17, 0)),
        ]
    );
}

#[test]
fn document_with_unknown_timezone_fails_to_evaluate() {
    use slot_engine::document::AvailabilityDocument;
    use slot_engine::{DstPolicy, SlotError};

    let json = r#"{
        "window": {"date_from": "2024-01-01T00:00:00Z", "date_to": "2024-01-08T00:00:00Z"},
        "participants": [{"time_zone": "Not/AZone", "availability": []}]
    }"#;

    let document = AvailabilityDocument::from_json(json).unwrap();

    assert!(matches!(
        document.evaluate(DstPolicy::default()),
        Err(SlotError::InvalidTimezone(tz)) if tz.as_str() == "Not/AZone"
    ));
}
