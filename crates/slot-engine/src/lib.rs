//! # slot-engine
//!
//! Deterministic availability computation for meeting booking.
//!
//! Given a person's recurring weekly working hours, per-date overrides, and a
//! query window, the engine produces the exact intervals during which that
//! person is free. Several people's availability intersect into mutual
//! availability, and busy time subtracts out of free time. All timezone
//! arithmetic goes through `chrono-tz`.
//!
//! The engine is pure and synchronous: no I/O, no shared state, and no
//! failure modes in the algorithms themselves. An absence of availability is
//! an empty `Vec`.
//!
//! ## Modules
//!
//! - [`interval`] — `Interval`, `TimeOfDay`, `BoundWindow`
//! - [`schedule`] — working-hours rules and date overrides
//! - [`expander`] — rules and overrides → concrete intervals
//! - [`dst`] — DST gap policies
//! - [`grouping`] — bucket intervals by local calendar date
//! - [`availability`] — per-person availability and mutual availability
//! - [`intersect`] — N-way interval-set intersection
//! - [`subtract`] — remove busy intervals from free ones
//! - [`document`] — JSON documents for the CLI and WASM bindings
//! - [`error`] — Error types

pub mod availability;
pub mod document;
pub mod dst;
pub mod error;
pub mod expander;
pub mod grouping;
pub mod intersect;
pub mod interval;
pub mod schedule;
pub mod subtract;

pub use availability::{
    build_date_ranges, build_date_ranges_with_policy, find_first_slot, mutual_availability,
    mutual_availability_with_policy, Participant,
};
pub use dst::DstPolicy;
pub use error::SlotError;
pub use expander::{expand_working_hours, expand_working_hours_with_policy, resolve_override};
pub use grouping::{group_by_local_date, DateGroups};
pub use intersect::intersect;
pub use interval::{parse_timezone, BoundWindow, Interval, TimeOfDay};
pub use schedule::{AvailabilityItem, DateOverride, WorkingHours};
pub use subtract::{subtract, subtract_presorted};
