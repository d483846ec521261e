//! Salon-wide availability: merge per-provider slots into one day view.
//!
//! The storefront shows each time once. When several providers can take the
//! same time, the one listed first in the input claims it, which lets the
//! caller express staffing priority by ordering the schedules.

use std::collections::BTreeMap;

use crate::slots::{
    compute_available_slots_traced, CandidateTrace, ProviderProfile, Slot,
};
use crate::time::{BusinessWindow, Interval, TimeOfDay};

/// One provider's day: who they are and when they are unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSchedule {
    pub provider: ProviderProfile,
    pub booked: Vec<Interval>,
    pub absences: Vec<Interval>,
}

impl ProviderSchedule {
    pub fn new(provider: ProviderProfile, booked: Vec<Interval>, absences: Vec<Interval>) -> Self {
        Self {
            provider,
            booked,
            absences,
        }
    }
}

/// Bookable slots for the whole day across every provider, de-duplicated
/// by time and sorted ascending.
pub fn day_slots(
    window: BusinessWindow,
    schedules: &[ProviderSchedule],
    step_minutes: i64,
) -> Vec<Slot> {
    day_slots_traced(window, schedules, step_minutes, |_| {})
}

/// Like [`day_slots`], reporting every provider's [`CandidateTrace`]s to
/// `observe` in schedule order.
pub fn day_slots_traced(
    window: BusinessWindow,
    schedules: &[ProviderSchedule],
    step_minutes: i64,
    mut observe: impl FnMut(CandidateTrace),
) -> Vec<Slot> {
    let mut merged: BTreeMap<TimeOfDay, Slot> = BTreeMap::new();
    for schedule in schedules {
        let slots = compute_available_slots_traced(
            window,
            &schedule.provider,
            &schedule.booked,
            &schedule.absences,
            step_minutes,
            &mut observe,
        );
        for slot in slots {
            merged.entry(slot.time).or_insert(slot);
        }
    }
    merged.into_values().collect()
}
