//! End-to-end booking flows against the public API.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use daygrid_core::{Calendar, CalendarError, ReminderKind, SLOTS_PER_DAY};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 6, day).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn stamp(hour: u32) -> NaiveDateTime {
    date(1).and_hms_opt(hour, 0, 0).unwrap()
}

#[test]
fn booking_conflict_and_release_flow() {
    let mut cal = Calendar::new();

    // A free day exposes the full canonical grid.
    let free = cal.find_available_slots(date(1));
    assert_eq!(free.len(), SLOTS_PER_DAY);

    let a = cal
        .add_event("Planning", "Sprint planning", date(1), at(9, 0), at(10, 0))
        .unwrap();

    // An overlapping booking on the same date must be rejected.
    let err = cal
        .add_event("Review", "Design review", date(1), at(9, 30), at(10, 30))
        .unwrap_err();
    assert!(matches!(err, CalendarError::SlotNotAvailable { .. }));

    // Deleting the blocker frees its whole range again.
    cal.delete_event(&a).unwrap();
    let free = cal.find_available_slots(date(1));
    assert!(free.contains(&at(9, 0)));
    assert!(free.contains(&at(9, 45)));
    assert_eq!(free.len(), SLOTS_PER_DAY);

    // The previously rejected booking now fits.
    cal.add_event("Review", "Design review", date(1), at(9, 30), at(10, 30))
        .unwrap();
    assert_eq!(cal.find_available_slots(date(1)).len(), SLOTS_PER_DAY - 4);
}

#[test]
fn rescheduling_flow_across_dates() {
    let mut cal = Calendar::new();

    let id = cal
        .add_event("Workshop", "", date(10), at(13, 0), at(15, 0))
        .unwrap();
    cal.add_reminder(&id, stamp(12), ReminderKind::System).unwrap();

    cal.update_event(&id, "Workshop", "moved", date(11), at(9, 0), at(11, 0))
        .unwrap();

    // The old date is fully free again, the new one carries the booking.
    assert_eq!(cal.find_available_slots(date(10)).len(), SLOTS_PER_DAY);
    let free = cal.find_available_slots(date(11));
    assert_eq!(free.len(), SLOTS_PER_DAY - 8);
    assert!(!free.contains(&at(9, 0)));
    assert!(!free.contains(&at(10, 45)));

    // Rebuilding the event dropped its reminders along with the old record.
    assert!(cal.list_reminders(&id).unwrap().is_empty());

    let by_date = cal.find_events(date(10), date(11));
    assert_eq!(by_date.len(), 1);
    assert_eq!(by_date[&date(11)][0].description, "moved");
}

#[test]
fn reminder_lifecycle_flow() {
    let mut cal = Calendar::new();
    let id = cal
        .add_event("Release", "Ship it", date(20), at(16, 0), at(17, 0))
        .unwrap();

    cal.add_reminder(&id, stamp(9), ReminderKind::default()).unwrap();
    cal.add_reminder(&id, stamp(15), ReminderKind::System).unwrap();
    cal.add_reminder(&id, stamp(15), ReminderKind::System).unwrap(); // duplicates allowed

    let reminders = cal.list_reminders(&id).unwrap();
    assert_eq!(reminders.len(), 3);
    assert_eq!(reminders.last().unwrap().at, stamp(15));
    assert_eq!(reminders.last().unwrap().kind, ReminderKind::System);

    cal.delete_reminder(&id, 1).unwrap();
    let reminders = cal.list_reminders(&id).unwrap();
    assert_eq!(reminders.len(), 2);
    assert_eq!(reminders[0].at, stamp(9));
    assert_eq!(reminders[1].at, stamp(15));

    let err = cal.delete_reminder(&id, 2).unwrap_err();
    assert!(matches!(err, CalendarError::ReminderNotFound { .. }));

    // Deleting the event takes its reminders with it.
    cal.delete_event(&id).unwrap();
    assert!(matches!(
        cal.list_reminders(&id).unwrap_err(),
        CalendarError::EventNotFound(_)
    ));
}
