//! Wall-clock value types: times of day, blocked intervals, and the
//! business window slots are generated within.
//!
//! Everything compares as minutes since midnight and carries no timezone —
//! callers localize stored UTC timestamps first (see [`crate::localtime`]).
//! [`TimeOfDay`] displays and serializes as zero-padded `"HH:mm"`, so
//! lexicographic order on the wire format equals temporal order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// A wall-clock time: hour 0-23, minute 0-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Construct a validated wall-clock time.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTime` when the hour exceeds 23 or the
    /// minute exceeds 59.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            return Err(SlotError::InvalidTime(format!(
                "hour {} out of range",
                hour
            )));
        }
        if minute > 59 {
            return Err(SlotError::InvalidTime(format!(
                "minute {} out of range",
                minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Build a time from minutes since midnight, wrapping into one day.
    ///
    /// Values past midnight wrap forward (1500 → 01:00) and negative values
    /// wrap backward (-60 → 23:00). The boundary localization relies on this
    /// wrap when a fixed offset pushes a stored timestamp past 24:00.
    pub fn from_minutes_since_midnight(minutes: i64) -> Self {
        let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (wrapped / 60) as u8,
            minute: (wrapped % 60) as u8,
        }
    }

    /// Hour component (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute component (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// This time as minutes since midnight — the ordering every comparison
    /// in the engine runs on.
    pub fn minutes_since_midnight(&self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| SlotError::ParseTime(s.to_string()))?;
        let hour: u8 = hour
            .parse()
            .map_err(|_| SlotError::ParseTime(s.to_string()))?;
        let minute: u8 = minute
            .parse()
            .map_err(|_| SlotError::ParseTime(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A blocked span of the day — an existing appointment or an absence —
/// with half-open `[start, end)` semantics.
///
/// Production exports contain malformed records where `end <= start`; those
/// are *degenerate* and contribute no constraint rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Interval {
    /// True when the interval cannot block anything (`end <= start`).
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open overlap test against the span `[span_start, span_end)`,
    /// both ends in minutes since midnight.
    ///
    /// Touching endpoints do not overlap: a treatment may start exactly
    /// when a booking ends. Degenerate intervals never overlap.
    pub fn overlaps_span(&self, span_start: i64, span_end: i64) -> bool {
        if self.is_degenerate() {
            return false;
        }
        span_start < self.end.minutes_since_midnight()
            && span_end > self.start.minutes_since_midnight()
    }
}

/// The day's opening and closing times. Construction enforces
/// `opening < closing`, so downstream code never sees an empty day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessWindow {
    opening: TimeOfDay,
    closing: TimeOfDay,
}

impl BusinessWindow {
    /// # Errors
    /// Returns `SlotError::EmptyWindow` unless `opening < closing`.
    pub fn new(opening: TimeOfDay, closing: TimeOfDay) -> Result<Self> {
        if opening >= closing {
            return Err(SlotError::EmptyWindow { opening, closing });
        }
        Ok(Self { opening, closing })
    }

    /// Opening time.
    pub fn opening(&self) -> TimeOfDay {
        self.opening
    }

    /// Closing time.
    pub fn closing(&self) -> TimeOfDay {
        self.closing
    }
}
