//! Event and reminder records.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CalendarError, Result};

/// Delivery channel of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Email,
    System,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::System => "system",
        }
    }
}

impl Default for ReminderKind {
    fn default() -> Self {
        ReminderKind::Email
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timestamped notification record attached to an event.
///
/// Reminders are plain data; delivering them is the embedder's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub at: NaiveDateTime,
    pub kind: ReminderKind,
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reminder on {} of type {}", self.at, self.kind)
    }
}

/// A titled activity occupying a contiguous slot range on one date.
///
/// The id is generated once at creation and stays stable for the event's
/// lifetime, including across [`crate::Calendar::update_event`]. Reminders
/// keep insertion order; that order is the only order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_at: NaiveTime,
    pub end_at: NaiveTime,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl Event {
    pub fn new(
        id: String,
        title: String,
        description: String,
        date: NaiveDate,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> Self {
        Self {
            id,
            title,
            description,
            date,
            start_at,
            end_at,
            reminders: Vec::new(),
        }
    }

    /// Get event duration in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_at - self.start_at).num_minutes()
    }

    /// Append a reminder. No uniqueness check; duplicates are allowed.
    pub fn add_reminder(&mut self, at: NaiveDateTime, kind: ReminderKind) {
        self.reminders.push(Reminder { at, kind });
    }

    /// Remove the reminder at the given 0-based position.
    ///
    /// Later reminders shift down by one; callers must not reuse stale
    /// indices across deletions.
    pub fn delete_reminder(&mut self, index: usize) -> Result<()> {
        if index >= self.reminders.len() {
            return Err(CalendarError::ReminderNotFound {
                index,
                len: self.reminders.len(),
            });
        }
        self.reminders.remove(index);
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Event title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "Time: {} - {}", self.start_at, self.end_at)
    }
}
