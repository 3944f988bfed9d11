// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Availability Engine

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use super::strategies;
use lab_reservations::availability::{check_availability, day_availability};
use lab_reservations::domain::{
    Reservation, ReservationId, ReservationRequest, ReservationStatus, TimeSlot,
};
use lab_reservations::BookingPolicy;

fn approved_on(room: &str, date: NaiveDate, start: u32, duration: u32) -> Reservation {
    Reservation {
        status: ReservationStatus::Approved,
        ..Reservation::from_request(
            ReservationRequest {
                student_name: "Ana".to_string(),
                student_last_name: "Quispe".to_string(),
                student_email: "ana@cibertec.edu.pe".to_string(),
                lab_room: room.to_string(),
                date,
                start_time: TimeSlot::new(start).unwrap(),
                duration,
            },
            ReservationId::new(),
            Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap(),
        )
    }
}

proptest! {
    /// Availability never leaves [0, capacity]
    #[test]
    fn prop_availability_within_bounds(
        reservations in strategies::reservations(),
        room in strategies::room_id(),
        date in strategies::date(),
        start in strategies::slot(),
        duration in 0u32..=30,
    ) {
        let policy = BookingPolicy::default();
        let available = check_availability(&reservations, &room, date, start, duration, &policy);
        prop_assert!(available <= policy.room_capacity);
    }

    /// Only approved reservations change availability
    #[test]
    fn prop_non_approved_never_consume(
        reservations in strategies::reservations(),
        room in strategies::room_id(),
        date in strategies::date(),
        start in strategies::slot(),
        duration in 1u32..=4,
    ) {
        let policy = BookingPolicy::default();
        let approved_only: Vec<Reservation> = reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Approved)
            .cloned()
            .collect();

        prop_assert_eq!(
            check_availability(&reservations, &room, date, start, duration, &policy),
            check_availability(&approved_only, &room, date, start, duration, &policy)
        );
    }

    /// One approved reservation empties exactly the hours it covers
    #[test]
    fn prop_single_approval_blocks_covered_hours(
        start in 7u32..19,
        duration in 1u32..=4,
    ) {
        let policy = BookingPolicy::default();
        let date = strategies::dates()[0];
        let reservation = approved_on("be-206", date, start, duration);
        let day = day_availability(&[reservation], "be-206", date, &policy);

        for (slot, hour) in &day {
            let covered = (start..start + duration).contains(&slot.hour());
            let expected = if covered { 0 } else { policy.room_capacity };
            prop_assert_eq!(hour.available, expected, "hour {}", slot);
            prop_assert_eq!(hour.total, policy.room_capacity);
            prop_assert_eq!(hour.reservations.len(), usize::from(covered));
        }
    }

    /// Hours no approved reservation touches are fully available
    #[test]
    fn prop_untouched_hours_are_free(
        reservations in strategies::reservations(),
        room in strategies::room_id(),
        date in strategies::date(),
    ) {
        let policy = BookingPolicy::default();
        let day = day_availability(&reservations, &room, date, &policy);

        prop_assert_eq!(day.len(), policy.operating_hours().count());
        for (slot, hour) in &day {
            if hour.reservations.is_empty() {
                prop_assert_eq!(hour.available, policy.room_capacity);
                prop_assert_eq!(hour.total, policy.room_capacity);
            }
            prop_assert!(slot.hour() < policy.closing_hour);
        }
    }

    /// Other rooms and other days never affect a room-day
    #[test]
    fn prop_other_room_days_are_ignored(
        start in 7u32..19,
        duration in 1u32..=4,
        checked_hour in 7u32..19,
    ) {
        let policy = BookingPolicy::default();
        let [date, other_date] = strategies::dates();
        let reservations = vec![
            approved_on("be-304", date, start, duration),
            approved_on("be-206", other_date, start, duration),
        ];

        let available = check_availability(
            &reservations,
            "be-206",
            date,
            TimeSlot::new(checked_hour).unwrap(),
            1,
            &policy,
        );
        prop_assert_eq!(available, policy.room_capacity);
    }
}
