//! Fixed-offset localization of stored UTC timestamps.
//!
//! The booking backend stores appointment times in UTC and renders them at
//! a fixed +3 hour offset year-round. That is deliberately not DST aware:
//! in winter the Asia/Jerusalem zone sits at +2 while this stays at +3.
//! Changing it would shift every stored winter appointment by an hour, so
//! the engine reproduces the fixed offset exactly.

use chrono::{DateTime, Timelike, Utc};

use crate::time::TimeOfDay;

/// Hours added to stored UTC timestamps to get salon wall-clock time.
pub const SALON_UTC_OFFSET_HOURS: i64 = 3;

/// Wall-clock reading of `utc` at a fixed hour offset.
///
/// Only the wall-clock time survives; the date is dropped because slot math
/// runs within a single day. Offsets that push past midnight wrap, and
/// extreme offsets saturate the minute arithmetic instead of overflowing.
pub fn localize(utc: DateTime<Utc>, offset_hours: i64) -> TimeOfDay {
    let minutes = (i64::from(utc.hour()) * 60 + i64::from(utc.minute()))
        .saturating_add(offset_hours.saturating_mul(60));
    TimeOfDay::from_minutes_since_midnight(minutes)
}

/// Wall-clock reading at the salon, using [`SALON_UTC_OFFSET_HOURS`].
pub fn salon_wall_clock(utc: DateTime<Utc>) -> TimeOfDay {
    localize(utc, SALON_UTC_OFFSET_HOURS)
}
