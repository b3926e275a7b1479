//! Per-date slot occupancy.
//!
//! A [`Day`] maps every 15-minute slot of one calendar date to the id of
//! the event occupying it, or to nothing. Days are created lazily by the
//! calendar the first time an event touches their date and are never
//! garbage-collected afterwards, even when emptied.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// Booking granularity in minutes.
pub const SLOT_MINUTES: u32 = 15;

/// Number of slots per day (24h at 15-minute granularity).
pub const SLOTS_PER_DAY: usize = 96;

/// Iterate the canonical slot times of any day, ascending from 00:00 to 23:45.
pub fn canonical_slots() -> impl Iterator<Item = NaiveTime> {
    (0..24).flat_map(|hour| {
        (0..60).step_by(SLOT_MINUTES as usize).map(move |minute| {
            NaiveTime::from_hms_opt(hour, minute, 0).expect("slot grid times are valid")
        })
    })
}

/// Slot occupancy map for one calendar date.
///
/// Invariant: a slot holds at most one event id at any time, and the slots
/// holding a given id form the contiguous range `[start_at, end_at)` of the
/// event booked on this date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Day {
    date: NaiveDate,
    slots: BTreeMap<NaiveTime, Option<String>>,
}

impl Day {
    /// Create a day with all 96 slots unoccupied.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            slots: canonical_slots().map(|slot| (slot, None)).collect(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Book every slot in `[start_at, end_at)` for `event_id`.
    ///
    /// Validates the whole range before writing anything, so a failed
    /// booking leaves the day untouched. A degenerate range (`end_at` not
    /// after `start_at`) books zero slots and succeeds.
    pub fn add_event(
        &mut self,
        event_id: &str,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> Result<()> {
        if start_at >= end_at {
            return Ok(());
        }

        if let Some((slot, _)) = self
            .slots
            .range(start_at..end_at)
            .find(|(_, occupant)| occupant.is_some())
        {
            return Err(CalendarError::SlotNotAvailable {
                date: self.date,
                slot: *slot,
            });
        }

        let mut booked = 0;
        for (_, occupant) in self.slots.range_mut(start_at..end_at) {
            *occupant = Some(event_id.to_string());
            booked += 1;
        }
        debug!(
            "booked {booked} slots on {} for event {event_id} ({start_at}-{end_at})",
            self.date
        );
        Ok(())
    }

    /// Clear every slot currently booked for `event_id`.
    ///
    /// Fails with `EventNotFound` when the id occupies no slot of this day.
    pub fn delete_event(&mut self, event_id: &str) -> Result<()> {
        let mut cleared = 0;
        for occupant in self.slots.values_mut() {
            if occupant.as_deref() == Some(event_id) {
                *occupant = None;
                cleared += 1;
            }
        }
        if cleared == 0 {
            return Err(CalendarError::EventNotFound(event_id.to_string()));
        }
        debug!("cleared {cleared} slots on {} for event {event_id}", self.date);
        Ok(())
    }

    /// Move `event_id` to a new slot range within this day.
    ///
    /// The old slots are cleared first; if the new range then collides with
    /// another event, the event is left unbooked. Known behavior, not a
    /// transaction.
    pub fn update_event(
        &mut self,
        event_id: &str,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> Result<()> {
        self.delete_event(event_id)?;
        self.add_event(event_id, start_at, end_at)
    }

    /// Unoccupied slots, ascending.
    pub fn available_slots(&self) -> Vec<NaiveTime> {
        self.slots
            .iter()
            .filter(|(_, occupant)| occupant.is_none())
            .map(|(slot, _)| *slot)
            .collect()
    }

    /// Whether any slot of this day is booked for `event_id`.
    pub fn contains_event(&self, event_id: &str) -> bool {
        self.slots
            .values()
            .any(|occupant| occupant.as_deref() == Some(event_id))
    }

    /// Occupant of a single slot, if any.
    pub fn occupant(&self, slot: NaiveTime) -> Option<&str> {
        self.slots.get(&slot).and_then(|occupant| occupant.as_deref())
    }
}
