// Copyright (c) 2025 - Cowboy AI, Inc.
//! Availability Engine
//!
//! Pure functions answering "how much of this room is left" for a room, a
//! day and an hour range. Only approved reservations consume capacity, and
//! each one consumes the whole room for every hour it covers: a room hosts
//! one session per hour, there is no seat-level sharing.
//!
//! Nothing here fails. Unknown rooms, empty reservation lists and ranges
//! outside operating hours all degrade to "fully available".

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::BookingPolicy;
use crate::domain::{Reservation, TimeSlot};

/// Occupancy of a single hour
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourAvailability {
    /// Seats left, never below zero
    pub available: u32,
    /// Room capacity
    pub total: u32,
    /// Approved reservations covering this hour
    pub reservations: Vec<Reservation>,
}

impl HourAvailability {
    fn empty(capacity: u32) -> Self {
        Self {
            available: capacity,
            total: capacity,
            reservations: Vec::new(),
        }
    }

    pub fn is_free(&self) -> bool {
        self.available == self.total
    }
}

/// Per-hour occupancy of one room for one day, keyed by start hour
pub type DayAvailability = BTreeMap<TimeSlot, HourAvailability>;

/// Approved reservations for a room on a date
pub fn approved_reservations<'a>(
    reservations: &'a [Reservation],
    room: &'a str,
    date: NaiveDate,
) -> impl Iterator<Item = &'a Reservation> + 'a {
    reservations
        .iter()
        .filter(move |r| r.status.consumes_capacity() && r.is_for(room, date))
}

/// Seats left in `room` across `[start, start + duration)` on `date`
///
/// The worst hour in the range is the binding constraint. The result is
/// always within `[0, policy.room_capacity]`.
pub fn check_availability(
    reservations: &[Reservation],
    room: &str,
    date: NaiveDate,
    start: TimeSlot,
    duration: u32,
    policy: &BookingPolicy,
) -> u32 {
    let requested_start = start.hour();
    let requested_end = requested_start.saturating_add(duration);

    // Only hours some approved reservation touches can be occupied, so count
    // those instead of walking the whole requested range.
    let mut occupants_per_hour: BTreeMap<u32, u32> = BTreeMap::new();
    for reservation in approved_reservations(reservations, room, date) {
        let hours = reservation.occupied_hours();
        let overlap_start = hours.start.max(requested_start);
        let overlap_end = hours.end.min(requested_end).min(TimeSlot::MAX_HOUR + 1);
        for hour in overlap_start..overlap_end {
            *occupants_per_hour.entry(hour).or_insert(0) += 1;
        }
    }

    let max_occupied = occupants_per_hour
        .values()
        .map(|occupants| occupants.saturating_mul(policy.room_capacity))
        .max()
        .unwrap_or(0);

    let available = policy.room_capacity.saturating_sub(max_occupied);
    debug!(
        room,
        %date,
        %start,
        duration,
        available,
        "checked availability"
    );
    available
}

/// Hour-by-hour occupancy of `room` on `date`
///
/// Every operating hour `[opening, closing)` is present. The closing hour
/// itself is never a key. Reservation hours outside operating hours are
/// ignored.
pub fn day_availability(
    reservations: &[Reservation],
    room: &str,
    date: NaiveDate,
    policy: &BookingPolicy,
) -> DayAvailability {
    let mut day: DayAvailability = policy
        .operating_hours()
        .filter_map(|hour| TimeSlot::new(hour).ok())
        .map(|slot| (slot, HourAvailability::empty(policy.room_capacity)))
        .collect();

    for reservation in approved_reservations(reservations, room, date) {
        for hour in reservation.occupied_hours() {
            let Ok(slot) = TimeSlot::new(hour) else {
                break;
            };
            if let Some(entry) = day.get_mut(&slot) {
                entry.available = entry.available.saturating_sub(policy.room_capacity);
                entry.reservations.push(reservation.clone());
            }
        }
    }

    day
}

/// Start slots a booking of `duration` hours can use without running past
/// closing time
pub fn available_start_slots(duration: u32, policy: &BookingPolicy) -> Vec<TimeSlot> {
    policy
        .time_slots()
        .into_iter()
        .filter(|slot| slot.hour().saturating_add(duration) <= policy.closing_hour)
        .collect()
}
