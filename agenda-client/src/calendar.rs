//! Date and slot helpers for the booking date/time step

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde::Serialize;
use shared::models::{Availability, WorkingHours};

pub use shared::models::{TimeSlot, generate_slots};

/// Slot granularity used by the backend
pub const SLOT_STEP_MINUTES: i64 = 30;

/// One selectable day in the date picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateOption {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub is_open: bool,
}

/// The next `days` days starting at `today`, flagged open or closed by working hours
///
/// A weekday missing from `working_hours` counts as closed.
pub fn date_options(
    today: NaiveDate,
    days: u32,
    working_hours: &[WorkingHours],
) -> Vec<DateOption> {
    today
        .iter_days()
        .take(days as usize)
        .map(|date| {
            let weekday = date.weekday();
            let is_open = working_hours
                .iter()
                .any(|h| h.weekday == weekday && h.is_open());
            DateOption {
                date,
                weekday,
                is_open,
            }
        })
        .collect()
}

/// Slots of a day sorted by time, duplicates removed
pub fn slots_from_availability(availability: &Availability) -> Vec<TimeSlot> {
    let mut slots = availability.slots.clone();
    slots.sort_by_key(|s| s.time);
    slots.dedup_by_key(|s| s.time);
    slots
}

/// Start times that can still be booked
pub fn available_times(availability: &Availability) -> Vec<NaiveTime> {
    slots_from_availability(availability)
        .into_iter()
        .filter(|s| s.available)
        .map(|s| s.time)
        .collect()
}

/// Appointment window for a slot; wall-clock times are taken as UTC
pub fn slot_window(
    date: NaiveDate,
    time: NaiveTime,
    duration_minutes: u32,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(time).and_utc();
    (start, start + Duration::minutes(i64::from(duration_minutes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_date_options_follow_working_hours() {
        // 2026-03-06 is a Friday
        let today = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
        let hours = vec![
            WorkingHours::open(Weekday::Fri, t(9, 0), t(18, 0)),
            WorkingHours::open(Weekday::Sat, t(9, 0), t(14, 0)),
            WorkingHours::closed(Weekday::Sun),
        ];
        let options = date_options(today, 4, &hours);
        let flags: Vec<(Weekday, bool)> = options.iter().map(|o| (o.weekday, o.is_open)).collect();
        assert_eq!(
            flags,
            vec![
                (Weekday::Fri, true),
                (Weekday::Sat, true),
                (Weekday::Sun, false),
                (Weekday::Mon, false),
            ]
        );
    }

    #[test]
    fn test_availability_helpers() {
        let availability = Availability {
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            slots: vec![
                TimeSlot { time: t(11, 30), available: true },
                TimeSlot { time: t(9, 0), available: false },
                TimeSlot { time: t(14, 0), available: true },
                TimeSlot { time: t(11, 30), available: true },
            ],
        };
        let slots = slots_from_availability(&availability);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].time, t(9, 0));
        assert_eq!(available_times(&availability), vec![t(11, 30), t(14, 0)]);
    }

    #[test]
    fn test_slot_window() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let (start, end) = slot_window(date, t(9, 0), 180);
        assert_eq!(start.to_rfc3339(), "2026-03-09T09:00:00+00:00");
        assert_eq!(end - start, Duration::minutes(180));
    }
}
