//! # slot-engine
//!
//! Appointment slot availability for a grooming salon's booking day.
//!
//! Given the day's business window, each provider's treatment length, and
//! the intervals already taken by bookings and absences, the engine
//! produces the list of times a customer can still book. Times are plain
//! wall-clock values; stored UTC timestamps are localized first with
//! [`localtime`]'s fixed-offset helpers.
//!
//! Candidates step hourly (or at a caller-chosen cadence) from opening,
//! keep the opening minute, must finish by closing, and treat intervals as
//! half-open so touching appointments never conflict. Per-provider results
//! merge into one salon-wide list where the first provider to offer a time
//! keeps it.
//!
//! ## Quick start
//!
//! ```
//! use slot_engine::{
//!     compute_available_slots, BusinessWindow, Interval, ProviderProfile,
//!     DEFAULT_STEP_MINUTES,
//! };
//!
//! # fn main() -> slot_engine::Result<()> {
//! let window = BusinessWindow::new("09:00".parse()?, "17:00".parse()?)?;
//! let provider = ProviderProfile::new("groomer-1", 60);
//! let booked = [Interval {
//!     start: "10:00".parse()?,
//!     end: "11:00".parse()?,
//! }];
//!
//! let slots = compute_available_slots(window, &provider, &booked, &[], DEFAULT_STEP_MINUTES);
//! let times: Vec<String> = slots.iter().map(|s| s.time.to_string()).collect();
//! assert_eq!(
//!     times,
//!     ["09:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00"]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`time`] — Wall-clock value types: `TimeOfDay`, `Interval`, `BusinessWindow`
//! - [`slots`] — Per-provider candidate generation and filtering
//! - [`schedule`] — Merge provider availability into the salon-wide day view
//! - [`localtime`] — Fixed-offset localization of stored UTC timestamps
//! - [`error`] — Error types

pub mod error;
pub mod localtime;
pub mod schedule;
pub mod slots;
pub mod time;

pub use error::{Result, SlotError};
pub use localtime::{localize, salon_wall_clock, SALON_UTC_OFFSET_HOURS};
pub use schedule::{day_slots, day_slots_traced, ProviderSchedule};
pub use slots::{
    compute_available_slots, compute_available_slots_traced, CandidateOutcome, CandidateTrace,
    ProviderProfile, Slot, DEFAULT_STEP_MINUTES, FALLBACK_DURATION_SECONDS,
};
pub use time::{BusinessWindow, Interval, TimeOfDay};
