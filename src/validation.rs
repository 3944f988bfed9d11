// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reservation Validator
//!
//! Business-rule checks for a booking request. Each rule is a small pure
//! function returning [`RuleResult`]; [`validate_reservation`] runs all of
//! them, never short-circuiting, and collects every violation.
//!
//! # Rule Order
//!
//! 1. Date not in the past
//! 2. Start at or after opening
//! 3. End at or before closing
//! 4. Duration within bounds
//! 5. Email format
//! 6. First name present
//! 7. Last name present
//! 8. Room selected
//! 9. Capacity left
//! 10. No duplicate request
//! 11. Daily quota
//!
//! Order only affects the order of messages in the report.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::availability::check_availability;
use crate::config::BookingPolicy;
use crate::domain::{is_valid_email, Reservation, ReservationRequest};

/// Result of a single rule check
pub type RuleResult = Result<(), RuleViolation>;

/// A violated booking rule
///
/// The `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("No se pueden hacer reservas para fechas pasadas")]
    DateInPast,

    #[error("El horario de inicio debe ser desde las {}", clock(.opening_hour))]
    StartsBeforeOpening { opening_hour: u32 },

    #[error("Las reservas no pueden terminar después de las {}", clock(.closing_hour))]
    EndsAfterClosing { closing_hour: u32 },

    #[error("La duración debe ser entre {min} y {max} horas")]
    DurationOutOfBounds { min: u32, max: u32 },

    #[error("El formato del correo electrónico no es válido")]
    InvalidEmail,

    #[error("El nombre es requerido")]
    MissingName,

    #[error("El apellido es requerido")]
    MissingLastName,

    #[error("Debe seleccionar un laboratorio")]
    MissingLabRoom,

    #[error("No hay espacios disponibles en el horario seleccionado")]
    NoCapacity,

    #[error("Ya tienes una reserva para este laboratorio en el mismo horario")]
    DuplicateReservation,

    #[error("Solo puedes hacer máximo {max} reservas por día")]
    DailyQuotaExceeded { max: usize },
}

/// `7` → `"7:00 AM"`, `19` → `"7:00 PM"`
fn clock(hour: &u32) -> String {
    let hour = *hour;
    let suffix = if hour % 24 < 12 { "AM" } else { "PM" };
    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{twelve}:00 {suffix}")
}

/// Outcome of validating a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<RuleViolation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// User-facing messages, in rule order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, violation: &RuleViolation) -> bool {
        self.errors.contains(violation)
    }

    fn record(&mut self, result: RuleResult) {
        if let Err(violation) = result {
            self.errors.push(violation);
        }
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.messages())?;
        state.end()
    }
}

/// Reservations can be made for today or later
pub fn validate_not_in_past(date: NaiveDate, today: NaiveDate) -> RuleResult {
    if date < today {
        return Err(RuleViolation::DateInPast);
    }
    Ok(())
}

pub fn validate_opening_bound(request: &ReservationRequest, policy: &BookingPolicy) -> RuleResult {
    if request.start_time.hour() < policy.opening_hour {
        return Err(RuleViolation::StartsBeforeOpening {
            opening_hour: policy.opening_hour,
        });
    }
    Ok(())
}

pub fn validate_closing_bound(request: &ReservationRequest, policy: &BookingPolicy) -> RuleResult {
    if request.occupied_hours().end > policy.closing_hour {
        return Err(RuleViolation::EndsAfterClosing {
            closing_hour: policy.closing_hour,
        });
    }
    Ok(())
}

pub fn validate_duration(duration: u32, policy: &BookingPolicy) -> RuleResult {
    if !(policy.min_duration_hours..=policy.max_duration_hours).contains(&duration) {
        return Err(RuleViolation::DurationOutOfBounds {
            min: policy.min_duration_hours,
            max: policy.max_duration_hours,
        });
    }
    Ok(())
}

pub fn validate_email(email: &str) -> RuleResult {
    if !is_valid_email(email) {
        return Err(RuleViolation::InvalidEmail);
    }
    Ok(())
}

/// Required text fields must contain something besides whitespace
pub fn validate_required_fields(request: &ReservationRequest) -> [RuleResult; 3] {
    [
        if request.student_name.trim().is_empty() {
            Err(RuleViolation::MissingName)
        } else {
            Ok(())
        },
        if request.student_last_name.trim().is_empty() {
            Err(RuleViolation::MissingLastName)
        } else {
            Ok(())
        },
        // Any non-empty id passes; unknown rooms fall through to "fully
        // available" in the capacity check.
        if request.lab_room.is_empty() {
            Err(RuleViolation::MissingLabRoom)
        } else {
            Ok(())
        },
    ]
}

pub fn validate_capacity(
    request: &ReservationRequest,
    existing: &[Reservation],
    policy: &BookingPolicy,
) -> RuleResult {
    let available = check_availability(
        existing,
        &request.lab_room,
        request.date,
        request.start_time,
        request.duration,
        policy,
    );
    if available == 0 {
        return Err(RuleViolation::NoCapacity);
    }
    Ok(())
}

/// Same student, room, day and start time as an active reservation
pub fn validate_not_duplicate(request: &ReservationRequest, existing: &[Reservation]) -> RuleResult {
    let duplicate = existing.iter().any(|r| {
        r.status.is_active()
            && r.belongs_to(&request.student_email)
            && r.is_for(&request.lab_room, request.date)
            && r.start_time == request.start_time
    });
    if duplicate {
        return Err(RuleViolation::DuplicateReservation);
    }
    Ok(())
}

/// Active reservations for the same student and day must stay under quota
pub fn validate_daily_quota(
    request: &ReservationRequest,
    existing: &[Reservation],
    policy: &BookingPolicy,
) -> RuleResult {
    let held = existing
        .iter()
        .filter(|r| {
            r.status.is_active() && r.belongs_to(&request.student_email) && r.date == request.date
        })
        .count();
    if held >= policy.max_daily_reservations {
        return Err(RuleViolation::DailyQuotaExceeded {
            max: policy.max_daily_reservations,
        });
    }
    Ok(())
}

/// Run every booking rule against `request`
///
/// `existing` is the full reservation collection as the caller last saw it;
/// `today` is the caller's local calendar date.
pub fn validate_reservation(
    request: &ReservationRequest,
    existing: &[Reservation],
    today: NaiveDate,
    policy: &BookingPolicy,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.record(validate_not_in_past(request.date, today));
    report.record(validate_opening_bound(request, policy));
    report.record(validate_closing_bound(request, policy));
    report.record(validate_duration(request.duration, policy));
    report.record(validate_email(&request.student_email));
    for result in validate_required_fields(request) {
        report.record(result);
    }
    report.record(validate_capacity(request, existing, policy));
    report.record(validate_not_duplicate(request, existing));
    report.record(validate_daily_quota(request, existing, policy));

    debug!(
        room = %request.lab_room,
        date = %request.date,
        violations = report.errors.len(),
        "validated reservation request"
    );
    report
}
