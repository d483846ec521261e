//! Candidate generation and filtering for a single provider.
//!
//! Candidates step from the opening time in fixed increments, so the
//! opening minute is preserved (a 09:15 opening yields :15 slots). Each
//! candidate is checked against the business window, then bookings, then
//! absences; the first failing check decides the outcome.

use std::fmt;

use serde::Serialize;

use crate::time::{BusinessWindow, Interval, TimeOfDay};

/// Cadence between candidate starts when the caller does not override it.
pub const DEFAULT_STEP_MINUTES: i64 = 60;

/// Treatment length assumed when the upstream record carries no usable
/// duration (one hour, the business default).
pub const FALLBACK_DURATION_SECONDS: i64 = 3600;

/// A provider (groomer or station) and how long one treatment takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub id: String,
    pub duration_minutes: i64,
}

impl ProviderProfile {
    pub fn new(id: impl Into<String>, duration_minutes: i64) -> Self {
        Self {
            id: id.into(),
            duration_minutes,
        }
    }

    /// Build a profile from the upstream export, where durations arrive in
    /// seconds and are frequently missing or zeroed.
    ///
    /// Missing and non-positive values fall back to
    /// [`FALLBACK_DURATION_SECONDS`]; present values floor-divide to whole
    /// minutes, so a sub-minute duration becomes zero and the provider
    /// yields no slots.
    pub fn from_upstream_seconds(id: impl Into<String>, seconds: Option<i64>) -> Self {
        let seconds = match seconds {
            Some(s) if s > 0 => s,
            _ => FALLBACK_DURATION_SECONDS,
        };
        Self {
            id: id.into(),
            duration_minutes: seconds / 60,
        }
    }
}

/// A bookable opening: when it starts, who staffs it, how long it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub time: TimeOfDay,
    pub provider_id: String,
    pub duration_minutes: i64,
}

/// Why a candidate was kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcome {
    Accepted,
    RunsPastClosing,
    OverlapsBooking(Interval),
    OverlapsAbsence(Interval),
}

impl fmt::Display for CandidateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateOutcome::Accepted => write!(f, "available"),
            CandidateOutcome::RunsPastClosing => write!(f, "runs past closing"),
            CandidateOutcome::OverlapsBooking(iv) => {
                write!(f, "overlaps booking {}-{}", iv.start, iv.end)
            }
            CandidateOutcome::OverlapsAbsence(iv) => {
                write!(f, "overlaps absence {}-{}", iv.start, iv.end)
            }
        }
    }
}

/// One candidate's verdict, reported to the observer in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTrace {
    pub provider_id: String,
    pub candidate: TimeOfDay,
    pub outcome: CandidateOutcome,
}

/// Compute the bookable slots for one provider within the business window.
///
/// Candidates start at opening and advance by `step_minutes` while still
/// before closing. A candidate is kept when the full treatment fits before
/// closing (ending exactly at closing is fine) and overlaps no booking or
/// absence. Touching endpoints never conflict: a treatment may begin the
/// minute a booking ends.
pub fn compute_available_slots(
    window: BusinessWindow,
    provider: &ProviderProfile,
    booked: &[Interval],
    absences: &[Interval],
    step_minutes: i64,
) -> Vec<Slot> {
    compute_available_slots_traced(window, provider, booked, absences, step_minutes, |_| {})
}

/// Like [`compute_available_slots`], reporting every candidate's
/// [`CandidateTrace`] to `observe` as it is decided.
pub fn compute_available_slots_traced(
    window: BusinessWindow,
    provider: &ProviderProfile,
    booked: &[Interval],
    absences: &[Interval],
    step_minutes: i64,
    mut observe: impl FnMut(CandidateTrace),
) -> Vec<Slot> {
    let duration = provider.duration_minutes;
    // Non-positive durations exclude the provider; a non-positive step has
    // no cadence to walk. Both occur in real exports and are not errors.
    if duration <= 0 || step_minutes <= 0 {
        return Vec::new();
    }

    let opening = window.opening().minutes_since_midnight();
    let closing = window.closing().minutes_since_midnight();

    let mut slots = Vec::new();
    let mut start = opening;
    while start < closing {
        // A saturated end always fails the closing check, so extreme
        // durations reject like any other that does not fit.
        let end = start.saturating_add(duration);
        let candidate = TimeOfDay::from_minutes_since_midnight(start);
        // First failing check wins: window fit, then bookings, then absences.
        let outcome = if end > closing {
            CandidateOutcome::RunsPastClosing
        } else if let Some(hit) = booked.iter().find(|b| b.overlaps_span(start, end)) {
            CandidateOutcome::OverlapsBooking(*hit)
        } else if let Some(hit) = absences.iter().find(|a| a.overlaps_span(start, end)) {
            CandidateOutcome::OverlapsAbsence(*hit)
        } else {
            CandidateOutcome::Accepted
        };
        if outcome == CandidateOutcome::Accepted {
            slots.push(Slot {
                time: candidate,
                provider_id: provider.id.clone(),
                duration_minutes: duration,
            });
        }
        observe(CandidateTrace {
            provider_id: provider.id.clone(),
            candidate,
            outcome,
        });
        start = match start.checked_add(step_minutes) {
            Some(next) => next,
            // No further candidate is representable.
            None => break,
        };
    }
    slots
}
