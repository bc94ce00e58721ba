//! Schedule Block and availability slots

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Period in which a professional is unavailable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub id: String,
    pub professional_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ScheduleBlock {
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }
}

/// Create schedule block payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleBlockCreate {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub reason: Option<String>,
}

/// One bookable start time of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: NaiveTime,
    pub available: bool,
}

/// `GET /professionals/{id}/availability/` query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
}

/// Availability of one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

/// Start times from `opens` every `step`, for a service lasting `duration`.
///
/// A slot is emitted only when the whole service fits before `closes`; it is
/// unavailable when `[start, start + duration)` intersects a `busy` interval.
pub fn generate_slots(
    opens: NaiveTime,
    closes: NaiveTime,
    step: Duration,
    duration: Duration,
    busy: &[(NaiveTime, NaiveTime)],
) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    if step <= Duration::zero() {
        return slots;
    }
    let mut start = opens;
    loop {
        let (end, end_wrapped) = start.overflowing_add_signed(duration);
        if end_wrapped != 0 || end > closes || start >= closes {
            break;
        }
        let available = !busy.iter().any(|(b_start, b_end)| start < *b_end && *b_start < end);
        slots.push(TimeSlot {
            time: start,
            available,
        });
        let (next, wrapped) = start.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        start = next;
    }
    slots
}
