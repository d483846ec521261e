//! Property-based tests for slot computation using proptest.
//!
//! These check invariants that should hold for *any* window, duration,
//! cadence, and constraint set, not just the handpicked days in
//! `slot_tests.rs`.

use std::collections::BTreeSet;

use proptest::prelude::*;
use slot_engine::{
    compute_available_slots, compute_available_slots_traced, day_slots, BusinessWindow,
    CandidateOutcome, Interval, ProviderProfile, ProviderSchedule, TimeOfDay,
};

// ---------------------------------------------------------------------------
// Strategies — generate wall-clock inputs
// ---------------------------------------------------------------------------

fn arb_time() -> impl Strategy<Value = TimeOfDay> {
    (0u8..24, 0u8..60).prop_map(|(h, m)| TimeOfDay::new(h, m).unwrap())
}

/// Intervals are unconstrained on purpose: degenerate and inverted records
/// exist in real data and must be harmless.
fn arb_interval() -> impl Strategy<Value = Interval> {
    (arb_time(), arb_time()).prop_map(|(start, end)| Interval { start, end })
}

fn arb_intervals() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec(arb_interval(), 0..6)
}

fn arb_window() -> impl Strategy<Value = BusinessWindow> {
    (0i64..1439)
        .prop_flat_map(|opening| (Just(opening), opening + 1..1440))
        .prop_map(|(opening, closing)| {
            BusinessWindow::new(
                TimeOfDay::from_minutes_since_midnight(opening),
                TimeOfDay::from_minutes_since_midnight(closing),
            )
            .unwrap()
        })
}

fn arb_duration() -> impl Strategy<Value = i64> {
    1i64..=240
}

fn arb_step() -> impl Strategy<Value = i64> {
    1i64..=120
}

fn arb_schedules() -> impl Strategy<Value = Vec<ProviderSchedule>> {
    prop::collection::vec((1i64..=180, arb_intervals(), arb_intervals()), 1..4).prop_map(
        |entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (minutes, booked, absences))| {
                    ProviderSchedule::new(
                        ProviderProfile::new(format!("provider-{}", i), minutes),
                        booked,
                        absences,
                    )
                })
                .collect()
        },
    )
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Every slot fits inside the business window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_fit_inside_the_window(
        window in arb_window(),
        duration in arb_duration(),
        booked in arb_intervals(),
        absences in arb_intervals(),
        step in arb_step(),
    ) {
        let provider = ProviderProfile::new("p", duration);
        let slots = compute_available_slots(window, &provider, &booked, &absences, step);

        let opening = window.opening().minutes_since_midnight();
        let closing = window.closing().minutes_since_midnight();
        for slot in &slots {
            let start = slot.time.minutes_since_midnight();
            prop_assert!(start >= opening, "slot {} starts before opening", slot.time);
            prop_assert!(
                start + duration <= closing,
                "slot {} runs past closing",
                slot.time
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Every slot sits on the cadence anchored at opening
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_sit_on_the_step_grid(
        window in arb_window(),
        duration in arb_duration(),
        booked in arb_intervals(),
        absences in arb_intervals(),
        step in arb_step(),
    ) {
        let provider = ProviderProfile::new("p", duration);
        let slots = compute_available_slots(window, &provider, &booked, &absences, step);

        let opening = window.opening().minutes_since_midnight();
        for slot in &slots {
            let offset = slot.time.minutes_since_midnight() - opening;
            prop_assert_eq!(
                offset % step,
                0,
                "slot {} is off the {} minute grid",
                slot.time,
                step
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: No slot overlaps a booking or absence
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_never_overlap_constraints(
        window in arb_window(),
        duration in arb_duration(),
        booked in arb_intervals(),
        absences in arb_intervals(),
        step in arb_step(),
    ) {
        let provider = ProviderProfile::new("p", duration);
        let slots = compute_available_slots(window, &provider, &booked, &absences, step);

        for slot in &slots {
            let s = slot.time.minutes_since_midnight();
            let e = s + duration;
            for ivl in booked.iter().chain(absences.iter()) {
                let bs = ivl.start.minutes_since_midnight();
                let be = ivl.end.minutes_since_midnight();
                if be <= bs {
                    // Degenerate records block nothing.
                    continue;
                }
                prop_assert!(
                    !(s < be && e > bs),
                    "slot {} (ends {}) overlaps {}-{}",
                    slot.time,
                    e,
                    ivl.start,
                    ivl.end
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Output is strictly ascending
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_are_strictly_ascending(
        window in arb_window(),
        duration in arb_duration(),
        booked in arb_intervals(),
        absences in arb_intervals(),
        step in arb_step(),
    ) {
        let provider = ProviderProfile::new("p", duration);
        let slots = compute_available_slots(window, &provider, &booked, &absences, step);

        for pair in slots.windows(2) {
            prop_assert!(
                pair[0].time < pair[1].time,
                "{} does not precede {}",
                pair[0].time,
                pair[1].time
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: With no constraints the count has a closed form
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn unconstrained_count_is_closed_form(
        window in arb_window(),
        duration in arb_duration(),
        step in arb_step(),
    ) {
        let provider = ProviderProfile::new("p", duration);
        let slots = compute_available_slots(window, &provider, &[], &[], step);

        let opening = window.opening().minutes_since_midnight();
        let closing = window.closing().minutes_since_midnight();
        // Starts are opening + k*step with start + duration <= closing.
        let expected = if closing - opening >= duration {
            ((closing - duration - opening) / step + 1) as usize
        } else {
            0
        };
        prop_assert_eq!(slots.len(), expected);
    }
}

// ---------------------------------------------------------------------------
// Property 6: Adding a constraint never adds a slot
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn adding_a_constraint_never_adds_slots(
        window in arb_window(),
        duration in arb_duration(),
        booked in arb_intervals(),
        extra in arb_interval(),
        step in arb_step(),
    ) {
        let provider = ProviderProfile::new("p", duration);
        let base = compute_available_slots(window, &provider, &booked, &[], step);

        let mut tightened = booked.clone();
        tightened.push(extra);
        let constrained = compute_available_slots(window, &provider, &tightened, &[], step);

        for slot in &constrained {
            prop_assert!(
                base.contains(slot),
                "slot {} appeared after adding a booking",
                slot.time
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 7: The trace agrees with the slot list
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn trace_agrees_with_the_slot_list(
        window in arb_window(),
        duration in arb_duration(),
        booked in arb_intervals(),
        absences in arb_intervals(),
        step in arb_step(),
    ) {
        let provider = ProviderProfile::new("p", duration);

        let mut traces = Vec::new();
        let slots = compute_available_slots_traced(
            window,
            &provider,
            &booked,
            &absences,
            step,
            |tr| traces.push(tr),
        );
        let plain = compute_available_slots(window, &provider, &booked, &absences, step);
        prop_assert_eq!(&slots, &plain);

        let accepted: Vec<TimeOfDay> = traces
            .iter()
            .filter(|tr| tr.outcome == CandidateOutcome::Accepted)
            .map(|tr| tr.candidate)
            .collect();
        let slot_times: Vec<TimeOfDay> = slots.iter().map(|s| s.time).collect();
        prop_assert_eq!(accepted, slot_times);
    }
}

// ---------------------------------------------------------------------------
// Property 8: Identical inputs give identical output
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn repeat_runs_are_identical(
        window in arb_window(),
        duration in arb_duration(),
        booked in arb_intervals(),
        absences in arb_intervals(),
        step in arb_step(),
    ) {
        let provider = ProviderProfile::new("p", duration);
        let first = compute_available_slots(window, &provider, &booked, &absences, step);
        let second = compute_available_slots(window, &provider, &booked, &absences, step);
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Property 9: The merged day is the sorted union of provider times
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merge_is_the_sorted_union_of_provider_times(
        window in arb_window(),
        schedules in arb_schedules(),
        step in arb_step(),
    ) {
        let merged = day_slots(window, &schedules, step);

        // Strictly ascending, so each time appears exactly once.
        for pair in merged.windows(2) {
            prop_assert!(pair[0].time < pair[1].time);
        }

        let mut union = BTreeSet::new();
        for schedule in &schedules {
            let slots = compute_available_slots(
                window,
                &schedule.provider,
                &schedule.booked,
                &schedule.absences,
                step,
            );
            for slot in slots {
                union.insert(slot.time);
            }
        }
        let merged_times: BTreeSet<TimeOfDay> = merged.iter().map(|s| s.time).collect();
        prop_assert_eq!(merged_times, union);
    }
}
