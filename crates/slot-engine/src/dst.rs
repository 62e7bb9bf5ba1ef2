//! DST transition policies for projecting wall-clock times onto instants.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Policy for wall-clock times that fall into a DST gap (e.g. 2:30 AM during
/// spring forward). Times inside a fall-back fold always resolve to the
/// earlier of the two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DstPolicy {
    /// Drop intervals whose start or end falls in the gap.
    Skip,
    /// Read the missing time with the offset in effect before the gap, so
    /// 02:30 in a 02:00→03:00 gap becomes 03:30.
    #[default]
    ShiftForward,
}

/// Resolve a local wall-clock time in `tz` to an absolute instant.
///
/// Returns `None` only when the time is inside a DST gap and the policy is
/// [`DstPolicy::Skip`].
pub fn localize(tz: &Tz, local: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Utc>> {
    match policy {
        DstPolicy::ShiftForward => Some(localize_shift_forward(tz, local)),
        DstPolicy::Skip => match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            LocalResult::None => {
                tracing::trace!(%local, timezone = %tz.name(), "skipping wall-clock time in DST gap");
                None
            }
        },
    }
}

/// Resolve a local wall-clock time in `tz`, moving times inside a DST gap
/// forward by the length of the gap. Never fails.
pub fn localize_shift_forward(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Gaps never last a full day, so the offset a day earlier is the
            // one in effect just before the transition.
            let before = tz
                .offset_from_utc_datetime(&(local - Duration::days(1)))
                .fix();
            let shifted =
                (local - Duration::seconds(i64::from(before.local_minus_utc()))).and_utc();
            tracing::trace!(%local, %shifted, timezone = %tz.name(), "shifted wall-clock time past DST gap");
            shifted
        }
    }
}
