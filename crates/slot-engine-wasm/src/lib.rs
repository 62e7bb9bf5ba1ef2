//! WASM bindings for slot-engine.
//!
//! Exposes availability building, mutual availability, intersection, and
//! subtraction to JavaScript via `wasm-bindgen`. All complex types are passed
//! as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::document::AvailabilityDocument;
use slot_engine::{AvailabilityItem, BoundWindow, DstPolicy, Interval};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct IntervalDto {
    start: String,
    end: String,
}

impl From<&Interval> for IntervalDto {
    fn from(i: &Interval) -> Self {
        Self {
            start: i.start.to_rfc3339(),
            end: i.end.to_rfc3339(),
        }
    }
}

/// Input format for intervals passed from JavaScript.
#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-02-17T14:00:00+00:00")
/// and naive local time (e.g., "2026-02-17T14:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn to_intervals(inputs: Vec<IntervalInput>) -> Result<Vec<Interval>, String> {
    inputs
        .into_iter()
        .map(|input| {
            let start = parse_datetime(&input.start)?;
            let end = parse_datetime(&input.end)?;
            Ok(Interval::new(start, end))
        })
        .collect()
}

/// Convert a JSON array of `{start, end}` objects into `Vec<Interval>`.
fn parse_intervals_json(json: &str) -> Result<Vec<Interval>, String> {
    let inputs: Vec<IntervalInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid intervals JSON: {}", e))?;
    to_intervals(inputs)
}

fn intervals_to_json(intervals: &[Interval]) -> Result<String, String> {
    let dtos: Vec<IntervalDto> = intervals.iter().map(IntervalDto::from).collect();
    serde_json::to_string(&dtos).map_err(|e| format!("Serialization error: {}", e))
}

fn build_date_ranges_impl(
    availability_json: &str,
    time_zone: &str,
    date_from: &str,
    date_to: &str,
) -> Result<String, String> {
    let availability: Vec<AvailabilityItem> = serde_json::from_str(availability_json)
        .map_err(|e| format!("Invalid availability JSON: {}", e))?;
    let tz = slot_engine::parse_timezone(time_zone).map_err(|e| e.to_string())?;
    let window = BoundWindow::new(parse_datetime(date_from)?, parse_datetime(date_to)?);

    let mut ranges = slot_engine::build_date_ranges(&availability, &tz, &window);
    ranges.sort();
    intervals_to_json(&ranges)
}

fn intersect_impl(sets_json: &str) -> Result<String, String> {
    let raw: Vec<Vec<IntervalInput>> =
        serde_json::from_str(sets_json).map_err(|e| format!("Invalid sets JSON: {}", e))?;
    let sets = raw
        .into_iter()
        .map(to_intervals)
        .collect::<Result<Vec<_>, _>>()?;

    intervals_to_json(&slot_engine::intersect(&sets))
}

fn subtract_impl(source_json: &str, excluded_json: &str) -> Result<String, String> {
    let source = parse_intervals_json(source_json)?;
    let excluded = parse_intervals_json(excluded_json)?;

    intervals_to_json(&slot_engine::subtract(&source, &excluded))
}

fn mutual_availability_impl(document_json: &str) -> Result<String, String> {
    let document = AvailabilityDocument::from_json(document_json).map_err(|e| e.to_string())?;
    let slots = document
        .evaluate(DstPolicy::default())
        .map_err(|e| e.to_string())?;
    intervals_to_json(&slots)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Build one person's availability within `[dateFrom, dateTo)`.
///
/// `availability_json` is a JSON array mixing working-hours rules
/// (`{days, start_time, end_time}`) and date overrides
/// (`{date, start_time, end_time}`). Returns a JSON array of `{start, end}`
/// objects sorted by start.
#[wasm_bindgen(js_name = "buildDateRanges")]
pub fn build_date_ranges(
    availability_json: &str,
    time_zone: &str,
    date_from: &str,
    date_to: &str,
) -> Result<String, JsValue> {
    build_date_ranges_impl(availability_json, time_zone, date_from, date_to)
        .map_err(|e| JsValue::from_str(&e))
}

/// Intersect a JSON array of interval arrays (one array per participant).
#[wasm_bindgen(js_name = "intersect")]
pub fn intersect(sets_json: &str) -> Result<String, JsValue> {
    intersect_impl(sets_json).map_err(|e| JsValue::from_str(&e))
}

/// Remove busy intervals from free intervals. Both arguments are JSON arrays
/// of `{start, end}` objects; the busy list may be in any order.
#[wasm_bindgen(js_name = "subtract")]
pub fn subtract(source_json: &str, excluded_json: &str) -> Result<String, JsValue> {
    subtract_impl(source_json, excluded_json).map_err(|e| JsValue::from_str(&e))
}

/// Evaluate a full availability document (window, participants, busy time).
#[wasm_bindgen(js_name = "mutualAvailability")]
pub fn mutual_availability(document_json: &str) -> Result<String, JsValue> {
    mutual_availability_impl(document_json).map_err(|e| JsValue::from_str(&e))
}
