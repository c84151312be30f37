//! Slot availability calculation

use std::collections::HashSet;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// All slot start times from `open` up to and including `close`
pub fn generate_slots(open: NaiveTime, close: NaiveTime, duration: Duration) -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    if duration <= Duration::zero() {
        return slots;
    }

    let mut current = open;
    while current <= close {
        slots.push(current);
        let (next, wrapped) = current.overflowing_add_signed(duration);
        if wrapped != 0 {
            break;
        }
        current = next;
    }

    slots
}

/// Slots of `date` that are neither booked nor already started at `now`
pub fn available_slots(
    slots: &[NaiveTime],
    booked: &HashSet<NaiveTime>,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    if date < now.date() {
        return Vec::new();
    }

    slots
        .iter()
        .copied()
        .filter(|slot| !booked.contains(slot))
        .filter(|slot| date > now.date() || *slot > now.time())
        .collect()
}
