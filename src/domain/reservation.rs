// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reservation Entity and Booking Request

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use uuid::Uuid;

use super::TimeSlot;

/// Opaque reservation identifier, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Generate a fresh time-ordered identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReservationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Review status of a reservation
///
/// Only [`ReservationStatus::Approved`] consumes room capacity. Pending and
/// approved reservations both count towards duplicate and quota checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Awaiting administrator review
    #[default]
    Pending,

    /// Accepted by an administrator
    Approved,

    /// Declined by an administrator
    Rejected,
}

impl ReservationStatus {
    /// Whether the reservation occupies its room for availability purposes
    pub fn consumes_capacity(&self) -> bool {
        matches!(self, ReservationStatus::Approved)
    }

    /// Whether the reservation still counts against the user (not rejected)
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Approved)
    }

    /// Badge text shown to users
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pendiente",
            ReservationStatus::Approved => "Aprobada",
            ReservationStatus::Rejected => "Rechazada",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Rejected => "rejected",
        };
        f.write_str(raw)
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "approved" => Ok(ReservationStatus::Approved),
            "rejected" => Ok(ReservationStatus::Rejected),
            other => Err(format!("unknown reservation status: {other}")),
        }
    }
}

/// A booking request that has not been assigned an id, status or timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub student_name: String,
    pub student_last_name: String,
    pub student_email: String,
    pub lab_room: String,
    pub date: NaiveDate,
    pub start_time: TimeSlot,
    /// Whole hours
    pub duration: u32,
}

impl ReservationRequest {
    /// Hours occupied by this request, `[start, start + duration)`
    pub fn occupied_hours(&self) -> Range<u32> {
        hour_range(self.start_time, self.duration)
    }
}

/// A stored reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub student_name: String,
    pub student_last_name: String,
    pub student_email: String,
    pub lab_room: String,
    pub date: NaiveDate,
    pub start_time: TimeSlot,
    pub duration: u32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Materialize a request as a new pending reservation
    pub fn from_request(
        request: ReservationRequest,
        id: ReservationId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            student_name: request.student_name,
            student_last_name: request.student_last_name,
            student_email: request.student_email,
            lab_room: request.lab_room,
            date: request.date,
            start_time: request.start_time,
            duration: request.duration,
            status: ReservationStatus::Pending,
            created_at,
        }
    }

    /// Hours occupied by this reservation, `[start, start + duration)`
    pub fn occupied_hours(&self) -> Range<u32> {
        hour_range(self.start_time, self.duration)
    }

    /// Exclusive end hour
    pub fn end_hour(&self) -> u32 {
        self.occupied_hours().end
    }

    /// Case-insensitive identity match on the student email
    pub fn belongs_to(&self, email: &str) -> bool {
        self.student_email.to_lowercase() == email.to_lowercase()
    }

    /// Whether this reservation is for the given room and day
    pub fn is_for(&self, room: &str, date: NaiveDate) -> bool {
        self.lab_room == room && self.date == date
    }

    /// Full student name as shown in notifications
    pub fn student_full_name(&self) -> String {
        format!("{} {}", self.student_name, self.student_last_name)
    }
}

fn hour_range(start: TimeSlot, duration: u32) -> Range<u32> {
    let start = start.hour();
    start..start.saturating_add(duration)
}

/// Partial update applied by the store's `patch`
///
/// With `expected_status` set the store refuses the patch unless the stored
/// reservation is still in that status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<ReservationStatus>,
}

impl ReservationPatch {
    pub fn status(status: ReservationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Only apply while the reservation is still `current`
    pub fn expecting(mut self, current: ReservationStatus) -> Self {
        self.expected_status = Some(current);
        self
    }

    /// Apply the present fields, leaving the rest untouched
    pub fn apply_to(&self, reservation: &mut Reservation) {
        if let Some(status) = self.status {
            reservation.status = status;
        }
    }
}
