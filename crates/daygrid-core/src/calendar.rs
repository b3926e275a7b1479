//! Calendar registry.
//!
//! [`Calendar`] owns every [`Event`] (keyed by id) and every [`Day`]
//! (keyed by date) and orchestrates creation, update, and deletion across
//! both maps. Invariant: the event ids referenced by day slots and the
//! keys of the event registry correspond exactly; an event's booked slots
//! are the contiguous range `[start_at, end_at)` in the day of its date.
//!
//! The registry is a caller-driven, synchronous state machine: no internal
//! threads, no I/O, and every operation completes in at most one pass over
//! a day's 96 slots.

use std::collections::{BTreeMap, HashMap};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use log::info;

use crate::day::{canonical_slots, Day};
use crate::error::{CalendarError, Result};
use crate::event::{Event, Reminder, ReminderKind};
use crate::id::{IdSource, UuidSource};

/// Top-level, process-scoped calendar. All state lives in memory.
pub struct Calendar {
    events: HashMap<String, Event>,
    days: BTreeMap<NaiveDate, Day>,
    ids: Box<dyn IdSource + Send>,
}

impl Calendar {
    /// Create an empty calendar with UUID-based event ids.
    pub fn new() -> Self {
        Self::with_id_source(UuidSource)
    }

    /// Create an empty calendar with a custom id source.
    pub fn with_id_source(ids: impl IdSource + Send + 'static) -> Self {
        Self {
            events: HashMap::new(),
            days: BTreeMap::new(),
            ids: Box::new(ids),
        }
    }

    /// Create an event and book its slots, returning the generated id.
    ///
    /// Rejects ranges where `end_at` is not after `start_at` and dates
    /// strictly before today (time-of-day plays no part in the comparison).
    /// The date's day record is created lazily and persists even when a
    /// later `SlotNotAvailable` aborts the booking.
    pub fn add_event(
        &mut self,
        title: &str,
        description: &str,
        date: NaiveDate,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> Result<String> {
        if start_at >= end_at {
            return Err(CalendarError::InvalidTimeRange {
                start: start_at,
                end: end_at,
            });
        }

        let today = Local::now().date_naive();
        if date < today {
            return Err(CalendarError::DateLowerThanToday { date, today });
        }

        let id = self.ids.next_id();
        let day = self.days.entry(date).or_insert_with(|| Day::new(date));
        day.add_event(&id, start_at, end_at)?;

        let event = Event::new(
            id.clone(),
            title.to_string(),
            description.to_string(),
            date,
            start_at,
            end_at,
        );
        info!(
            "created event {id} on {date} ({start_at}-{end_at}, {} min)",
            event.duration_minutes()
        );
        self.events.insert(id.clone(), event);
        Ok(id)
    }

    /// Replace an event's data and rebook its slots, keeping its id.
    ///
    /// The old event is destroyed before the new range is booked; when the
    /// new slots collide, the id is gone entirely. Not atomic, but the
    /// registry and the day slots stay consistent in every outcome. Unlike
    /// creation, no today-check applies.
    pub fn update_event(
        &mut self,
        event_id: &str,
        title: &str,
        description: &str,
        date: NaiveDate,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> Result<()> {
        if !self.events.contains_key(event_id) {
            return Err(CalendarError::EventNotFound(event_id.to_string()));
        }
        if start_at >= end_at {
            return Err(CalendarError::InvalidTimeRange {
                start: start_at,
                end: end_at,
            });
        }

        self.delete_event(event_id)?;

        let day = self.days.entry(date).or_insert_with(|| Day::new(date));
        day.add_event(event_id, start_at, end_at)?;

        let event = Event::new(
            event_id.to_string(),
            title.to_string(),
            description.to_string(),
            date,
            start_at,
            end_at,
        );
        self.events.insert(event_id.to_string(), event);
        info!("updated event {event_id}, now on {date} ({start_at}-{end_at})");
        Ok(())
    }

    /// Remove an event from the registry and clear its booked slots.
    pub fn delete_event(&mut self, event_id: &str) -> Result<()> {
        if self.events.remove(event_id).is_none() {
            return Err(CalendarError::EventNotFound(event_id.to_string()));
        }

        // An event's slots live in exactly one day; stop at the first hit.
        for day in self.days.values_mut() {
            if day.contains_event(event_id) {
                day.delete_event(event_id)?;
                break;
            }
        }
        info!("deleted event {event_id}");
        Ok(())
    }

    /// Free slots of a date, ascending.
    ///
    /// A date without a day record is implicitly fully free and yields all
    /// 96 canonical slots.
    pub fn find_available_slots(&self, date: NaiveDate) -> Vec<NaiveTime> {
        match self.days.get(&date) {
            Some(day) => day.available_slots(),
            None => canonical_slots().collect(),
        }
    }

    /// Events whose date lies in the inclusive range, grouped by date.
    ///
    /// Same-date events accumulate; each date's list is sorted by start
    /// time (then id) so the output is deterministic.
    pub fn find_events(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> BTreeMap<NaiveDate, Vec<Event>> {
        let mut found: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();
        for event in self.events.values() {
            if start_date <= event.date && event.date <= end_date {
                found.entry(event.date).or_default().push(event.clone());
            }
        }
        for events in found.values_mut() {
            events.sort_by(|a, b| (a.start_at, &a.id).cmp(&(b.start_at, &b.id)));
        }
        found
    }

    /// Attach a reminder to an event.
    pub fn add_reminder(
        &mut self,
        event_id: &str,
        at: NaiveDateTime,
        kind: ReminderKind,
    ) -> Result<()> {
        let event = self
            .events
            .get_mut(event_id)
            .ok_or_else(|| CalendarError::EventNotFound(event_id.to_string()))?;
        event.add_reminder(at, kind);
        Ok(())
    }

    /// Remove an event's reminder by its current 0-based index.
    pub fn delete_reminder(&mut self, event_id: &str, index: usize) -> Result<()> {
        let event = self
            .events
            .get_mut(event_id)
            .ok_or_else(|| CalendarError::EventNotFound(event_id.to_string()))?;
        event.delete_reminder(index)
    }

    /// An event's reminders in insertion order.
    pub fn list_reminders(&self, event_id: &str) -> Result<&[Reminder]> {
        self.events
            .get(event_id)
            .map(|event| event.reminders.as_slice())
            .ok_or_else(|| CalendarError::EventNotFound(event_id.to_string()))
    }

    /// Look up an event by id.
    pub fn event(&self, event_id: &str) -> Option<&Event> {
        self.events.get(event_id)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}
