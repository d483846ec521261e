//! Error types for slot-engine operations.

use thiserror::Error;

use crate::time::TimeOfDay;

/// Errors that can occur while constructing the engine's value types.
///
/// The slot computation itself is total: malformed intervals and unusable
/// provider durations are tolerated as data conditions, never raised here.
#[derive(Error, Debug)]
pub enum SlotError {
    /// Hour or minute outside the 0-23 / 0-59 wall-clock range.
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    /// Text that does not have the `HH:mm` shape.
    #[error("Invalid time string '{0}': expected HH:mm")]
    ParseTime(String),

    /// A business window whose opening is not strictly before its closing.
    #[error("Empty business window: opening {opening} is not before closing {closing}")]
    EmptyWindow {
        opening: TimeOfDay,
        closing: TimeOfDay,
    },
}

/// Convenience alias used throughout slot-engine.
pub type Result<T> = std::result::Result<T, SlotError>;
