//! Remove busy time from free intervals.
//!
//! Each source interval is walked with a cursor; every busy interval that
//! overlaps it cuts a gap, and whatever remains between busy blocks is kept.
//! Adjacent busy blocks (one ends exactly when the source starts or ends) do
//! not cut anything.

use crate::interval::Interval;

/// Subtract the union of `excluded` from every interval in `source`.
///
/// `excluded` may be in any order and may overlap itself; a sorted copy is
/// walked. Non-empty source intervals with no overlapping busy time pass
/// through unchanged; empty ones produce nothing.
pub fn subtract(source: &[Interval], excluded: &[Interval]) -> Vec<Interval> {
    let mut sorted = excluded.to_vec();
    sorted.sort_by_key(|i| (i.start, i.end));
    subtract_presorted(source, &sorted)
}

/// Subtract `excluded` from `source`, trusting the caller's ordering.
///
/// `excluded` must be sorted by start. Busy intervals are applied in the order
/// given; an unsorted list can leave free time where there should be none.
pub fn subtract_presorted(source: &[Interval], excluded: &[Interval]) -> Vec<Interval> {
    let mut result = Vec::new();

    for src in source {
        let mut cursor = src.start;

        let overlapping = excluded
            .iter()
            .filter(|ex| ex.start < src.end && ex.end > src.start);

        for ex in overlapping {
            if ex.start > cursor {
                result.push(Interval::new(cursor, ex.start));
            }
            cursor = cursor.max(ex.end);
        }

        // Trailing free time after the last busy block.
        if src.end > cursor {
            result.push(Interval::new(cursor, src.end));
        }
    }

    result
}
