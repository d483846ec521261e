//! WASM bindings for slot-engine.
//!
//! Exposes day-level availability, per-provider slot computation, and
//! candidate tracing to the browser booking wizard via `wasm-bindgen`. All
//! complex types are passed as JSON strings; times cross the boundary as
//! wall-clock `"HH:mm"` strings that the caller has already localized.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/booking-widget/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::{Deserialize, Serialize};
use slot_engine::{
    BusinessWindow, CandidateOutcome, CandidateTrace, Interval, ProviderProfile,
    ProviderSchedule, TimeOfDay, DEFAULT_STEP_MINUTES,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for blocked intervals passed from JavaScript.
#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
}

/// Input format for one provider's day passed from JavaScript.
#[derive(Deserialize)]
struct ScheduleInput {
    provider_id: String,
    duration_minutes: i64,
    #[serde(default)]
    booked: Vec<IntervalInput>,
    #[serde(default)]
    absences: Vec<IntervalInput>,
}

#[derive(Serialize)]
struct TraceDto {
    candidate: String,
    accepted: bool,
    reason: String,
}

impl From<&CandidateTrace> for TraceDto {
    fn from(tr: &CandidateTrace) -> Self {
        Self {
            candidate: tr.candidate.to_string(),
            accepted: tr.outcome == CandidateOutcome::Accepted,
            reason: tr.outcome.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers: parse wall-clock strings and JSON inputs
// ---------------------------------------------------------------------------

fn parse_time(s: &str) -> Result<TimeOfDay, JsValue> {
    s.parse()
        .map_err(|e: slot_engine::SlotError| JsValue::from_str(&e.to_string()))
}

fn parse_window(opening: &str, closing: &str) -> Result<BusinessWindow, JsValue> {
    BusinessWindow::new(parse_time(opening)?, parse_time(closing)?)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn convert_intervals(inputs: Vec<IntervalInput>) -> Result<Vec<Interval>, JsValue> {
    inputs
        .into_iter()
        .map(|input| {
            Ok(Interval {
                start: parse_time(&input.start)?,
                end: parse_time(&input.end)?,
            })
        })
        .collect()
}

/// Convert a JSON array of `{start, end}` objects into `Vec<Interval>`.
fn parse_intervals_json(json: &str) -> Result<Vec<Interval>, JsValue> {
    let inputs: Vec<IntervalInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid intervals JSON: {}", e)))?;
    convert_intervals(inputs)
}

/// Convert a JSON array of provider schedule objects into
/// `Vec<ProviderSchedule>`.
fn parse_schedules_json(json: &str) -> Result<Vec<ProviderSchedule>, JsValue> {
    let inputs: Vec<ScheduleInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid schedules JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            Ok(ProviderSchedule::new(
                ProviderProfile::new(input.provider_id, input.duration_minutes),
                convert_intervals(input.booked)?,
                convert_intervals(input.absences)?,
            ))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the bookable slots for one provider.
///
/// Returns a JSON string containing an array of
/// `{time, provider_id, duration_minutes}` objects sorted ascending.
///
/// # Arguments
/// - `provider_id` -- Identifier echoed into each slot
/// - `duration_minutes` -- Treatment length in minutes
/// - `opening` / `closing` -- Business window as `"HH:mm"`
/// - `booked_json` / `absences_json` -- JSON arrays of `{start, end}` objects
/// - `step_minutes` -- Optional cadence between candidates (default 60)
#[wasm_bindgen(js_name = "computeAvailableSlots")]
pub fn compute_available_slots(
    provider_id: &str,
    duration_minutes: u32,
    opening: &str,
    closing: &str,
    booked_json: &str,
    absences_json: &str,
    step_minutes: Option<u32>,
) -> Result<String, JsValue> {
    let window = parse_window(opening, closing)?;
    let provider = ProviderProfile::new(provider_id, i64::from(duration_minutes));
    let booked = parse_intervals_json(booked_json)?;
    let absences = parse_intervals_json(absences_json)?;
    let step = step_minutes.map_or(DEFAULT_STEP_MINUTES, i64::from);

    let slots = slot_engine::compute_available_slots(window, &provider, &booked, &absences, step);

    serde_json::to_string(&slots)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Compute the merged salon-wide slots for one day.
///
/// `schedules_json` must be a JSON array of
/// `{provider_id, duration_minutes, booked, absences}` objects. Each time
/// appears once; the first schedule in the array that can take it claims it.
#[wasm_bindgen(js_name = "computeDaySlots")]
pub fn compute_day_slots(
    schedules_json: &str,
    opening: &str,
    closing: &str,
    step_minutes: Option<u32>,
) -> Result<String, JsValue> {
    let window = parse_window(opening, closing)?;
    let schedules = parse_schedules_json(schedules_json)?;
    let step = step_minutes.map_or(DEFAULT_STEP_MINUTES, i64::from);

    let slots = slot_engine::day_slots(window, &schedules, step);

    serde_json::to_string(&slots)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Explain every candidate for one provider instead of returning only the
/// survivors.
///
/// Returns a JSON string containing an array of
/// `{candidate, accepted, reason}` objects in generation order, e.g.
/// `{"candidate":"10:00","accepted":false,"reason":"overlaps booking 10:00-11:00"}`.
#[wasm_bindgen(js_name = "traceAvailableSlots")]
pub fn trace_available_slots(
    provider_id: &str,
    duration_minutes: u32,
    opening: &str,
    closing: &str,
    booked_json: &str,
    absences_json: &str,
    step_minutes: Option<u32>,
) -> Result<String, JsValue> {
    let window = parse_window(opening, closing)?;
    let provider = ProviderProfile::new(provider_id, i64::from(duration_minutes));
    let booked = parse_intervals_json(booked_json)?;
    let absences = parse_intervals_json(absences_json)?;
    let step = step_minutes.map_or(DEFAULT_STEP_MINUTES, i64::from);

    let mut traces: Vec<TraceDto> = Vec::new();
    slot_engine::compute_available_slots_traced(window, &provider, &booked, &absences, step, |tr| {
        traces.push(TraceDto::from(&tr))
    });

    serde_json::to_string(&traces)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
