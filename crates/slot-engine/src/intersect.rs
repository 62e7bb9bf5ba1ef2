//! Reduce N independent interval sets to the intervals common to all of them.
//!
//! "Free in set 1 AND free in set 2 AND ..." -- the building block for
//! mutual availability across participants and for clipping to a window.

use crate::interval::Interval;

/// Intersect every input set, left to right.
///
/// The first set seeds the running accumulator. Each following set is
/// compared pairwise against every accumulated interval; a pair contributes
/// `[max(starts), min(ends))` only when that span has strictly positive
/// length. Zero-length and inverted overlaps are dropped.
///
/// An empty set anywhere (or an accumulator that empties out) yields an empty
/// result. With a single set, its non-empty intervals are returned as-is.
///
/// This is a full cross product per step, O(product of set sizes). Interval
/// counts per query are bounded by days-in-window times rules, so it stays
/// small.
pub fn intersect(sets: &[Vec<Interval>]) -> Vec<Interval> {
    let Some((first, rest)) = sets.split_first() else {
        return Vec::new();
    };

    let mut common: Vec<Interval> = first.iter().filter(|i| !i.is_empty()).copied().collect();

    for set in rest {
        if common.is_empty() {
            break;
        }
        common = intersect_pair(&common, set);
    }

    common
}

/// Pairwise intersection of two interval lists.
fn intersect_pair(common: &[Interval], other: &[Interval]) -> Vec<Interval> {
    let mut out = Vec::new();
    for a in common {
        for b in other {
            if let Some(overlap) = a.intersection(b) {
                out.push(overlap);
            }
        }
    }
    out
}
