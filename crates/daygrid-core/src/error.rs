//! Core error types for daygrid-core.
//!
//! Every error here is a non-retryable validation failure raised at the
//! point of detection. A failed operation never poisons the calendar; the
//! caller may keep using it.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Errors that can occur in calendar operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// Operation referenced an event id absent from the registry.
    #[error("Event '{0}' not found")]
    EventNotFound(String),

    /// Reminder index out of range for the event's reminder list.
    #[error("Reminder index {index} out of bounds (length: {len})")]
    ReminderNotFound { index: usize, len: usize },

    /// Requested time range overlaps a slot already booked.
    #[error("Slot {slot} on {date} is already booked")]
    SlotNotAvailable { date: NaiveDate, slot: NaiveTime },

    /// Event creation requested for a date before the current date.
    #[error("Date {date} is lower than today ({today})")]
    DateLowerThanToday { date: NaiveDate, today: NaiveDate },

    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },
}

/// Result type alias for CalendarError
pub type Result<T, E = CalendarError> = std::result::Result<T, E>;
