// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for lab-reservations
//!
//! Deterministic reservation data. All ids and timestamps are fixed
//! constants so tests are reproducible.
//!
//! Dates sit well inside the future relative to [`FIXED_TIMESTAMP`] so the
//! local-date conversion of the submit timestamp never lands on them.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use lab_reservations::domain::{
    Reservation, ReservationId, ReservationRequest, ReservationStatus, TimeSlot,
};
use lab_reservations::{NotificationConfig, ServiceConfig};

pub const RESERVATION_ID_1: &str = "01934f4a-0001-7000-8000-000000000001";
pub const RESERVATION_ID_2: &str = "01934f4a-0002-7000-8000-000000000002";
pub const RESERVATION_ID_3: &str = "01934f4a-0003-7000-8000-000000000003";

// Saturday 2030-06-01T12:00:00Z
pub const FIXED_TIMESTAMP: &str = "2030-06-01T12:00:00Z";

pub const STUDENT_EMAIL: &str = "ana.quispe@cibertec.edu.pe";
pub const ROOM: &str = "be-206";

pub fn parse_id(s: &str) -> ReservationId {
    ReservationId::from_uuid(Uuid::parse_str(s).expect("Invalid UUID in test fixture"))
}

pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// Monday 2030-06-10
pub fn booking_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 10).expect("Invalid date in test fixture")
}

/// Before [`FIXED_TIMESTAMP`] in every time zone
pub fn past_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 5, 20).expect("Invalid date in test fixture")
}

pub fn slot(hour: u32) -> TimeSlot {
    TimeSlot::new(hour).expect("Invalid hour in test fixture")
}

/// A complete, valid request for [`ROOM`] on [`booking_date`]
pub fn request(start: u32, duration: u32) -> ReservationRequest {
    ReservationRequest {
        student_name: "Ana".to_string(),
        student_last_name: "Quispe".to_string(),
        student_email: STUDENT_EMAIL.to_string(),
        lab_room: ROOM.to_string(),
        date: booking_date(),
        start_time: slot(start),
        duration,
    }
}

pub fn request_from(email: &str, start: u32, duration: u32) -> ReservationRequest {
    ReservationRequest {
        student_email: email.to_string(),
        ..request(start, duration)
    }
}

/// Stored reservation with a fixed id and creation time
pub fn reservation(
    id: &str,
    request: ReservationRequest,
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        status,
        ..Reservation::from_request(request, parse_id(id), fixed_timestamp())
    }
}

pub fn approved(id: &str, start: u32, duration: u32) -> Reservation {
    reservation(
        id,
        request_from("otro@cibertec.edu.pe", start, duration),
        ReservationStatus::Approved,
    )
}

/// Default configuration without simulated email latency
pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        notification: NotificationConfig { send_delay_ms: 0 },
        ..ServiceConfig::default()
    }
}
