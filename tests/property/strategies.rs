// Copyright (c) 2025 - Cowboy AI, Inc.
//! Shared proptest strategies

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use lab_reservations::domain::{
    Reservation, ReservationId, ReservationRequest, ReservationStatus, TimeSlot, LAB_ROOMS,
};

pub const EMAILS: [&str; 3] = [
    "ana@cibertec.edu.pe",
    "luis@cibertec.edu.pe",
    "rosa@cibertec.edu.pe",
];

pub fn dates() -> [NaiveDate; 2] {
    [
        NaiveDate::from_ymd_opt(2030, 6, 10).unwrap(),
        NaiveDate::from_ymd_opt(2030, 6, 11).unwrap(),
    ]
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
}

pub fn room_id() -> impl Strategy<Value = String> {
    prop::sample::select(LAB_ROOMS.iter().map(|room| room.id).collect::<Vec<_>>())
        .prop_map(str::to_string)
}

pub fn date() -> impl Strategy<Value = NaiveDate> {
    prop::sample::select(dates().to_vec())
}

pub fn email() -> impl Strategy<Value = String> {
    prop::sample::select(EMAILS.to_vec()).prop_map(str::to_string)
}

pub fn slot() -> impl Strategy<Value = TimeSlot> {
    (0u32..=TimeSlot::MAX_HOUR).prop_map(|hour| TimeSlot::new(hour).unwrap())
}

pub fn status() -> impl Strategy<Value = ReservationStatus> {
    prop_oneof![
        Just(ReservationStatus::Pending),
        Just(ReservationStatus::Approved),
        Just(ReservationStatus::Rejected),
    ]
}

pub fn request() -> impl Strategy<Value = ReservationRequest> {
    (email(), room_id(), date(), slot(), 0u32..=30).prop_map(
        |(student_email, lab_room, date, start_time, duration)| ReservationRequest {
            student_name: "Estudiante".to_string(),
            student_last_name: "Prueba".to_string(),
            student_email,
            lab_room,
            date,
            start_time,
            duration,
        },
    )
}

pub fn reservation() -> impl Strategy<Value = Reservation> {
    (request(), status()).prop_map(|(request, status)| Reservation {
        status,
        ..Reservation::from_request(
            request,
            ReservationId::new(),
            Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap(),
        )
    })
}

pub fn reservations() -> impl Strategy<Value = Vec<Reservation>> {
    prop::collection::vec(reservation(), 0..24)
}
