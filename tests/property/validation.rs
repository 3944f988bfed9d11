// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Reservation Validator

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use super::strategies;
use lab_reservations::domain::{Reservation, ReservationId, ReservationStatus};
use lab_reservations::validation::{validate_reservation, RuleViolation};
use lab_reservations::BookingPolicy;

fn stored(request: lab_reservations::ReservationRequest, status: ReservationStatus) -> Reservation {
    Reservation {
        status,
        ..Reservation::from_request(
            request,
            ReservationId::new(),
            Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap(),
        )
    }
}

proptest! {
    /// More existing reservations never clear a reported violation
    #[test]
    fn prop_more_reservations_keep_violations(
        request in strategies::request(),
        existing in strategies::reservations(),
        extra in strategies::reservations(),
    ) {
        let policy = BookingPolicy::default();
        let before = validate_reservation(&request, &existing, strategies::today(), &policy);

        let mut grown = existing.clone();
        grown.extend(extra);
        let after = validate_reservation(&request, &grown, strategies::today(), &policy);

        for violation in &before.errors {
            prop_assert!(after.contains(violation), "lost {:?}", violation);
        }
    }

    /// Breaking another field only adds messages
    #[test]
    fn prop_invalid_email_only_adds(
        request in strategies::request(),
        existing in strategies::reservations(),
    ) {
        let policy = BookingPolicy::default();
        let before = validate_reservation(&request, &existing, strategies::today(), &policy);

        let mut broken = request.clone();
        broken.student_email = "sin-arroba".to_string();
        let after = validate_reservation(&broken, &existing, strategies::today(), &policy);

        prop_assert!(after.contains(&RuleViolation::InvalidEmail));
        for violation in &before.errors {
            // Rules keyed on the email may stop matching once it changes
            if matches!(
                violation,
                RuleViolation::DuplicateReservation | RuleViolation::DailyQuotaExceeded { .. }
            ) {
                continue;
            }
            prop_assert!(after.contains(violation), "lost {:?}", violation);
        }
    }

    /// Two active reservations on a day exhaust the quota
    #[test]
    fn prop_third_active_reservation_is_over_quota(
        request in strategies::request(),
        first in strategies::request(),
        second in strategies::request(),
        first_approved in any::<bool>(),
        second_approved in any::<bool>(),
    ) {
        let policy = BookingPolicy::default();
        let active = |approved: bool| {
            if approved { ReservationStatus::Approved } else { ReservationStatus::Pending }
        };
        let same_student_day = |mut other: lab_reservations::ReservationRequest| {
            other.student_email = request.student_email.to_uppercase();
            other.date = request.date;
            other
        };
        let existing = vec![
            stored(same_student_day(first), active(first_approved)),
            stored(same_student_day(second), active(second_approved)),
        ];

        let report = validate_reservation(&request, &existing, strategies::today(), &policy);
        let quota_violation = RuleViolation::DailyQuotaExceeded {
            max: policy.max_daily_reservations,
        };
        prop_assert!(report.contains(&quota_violation));
    }

    /// Rejected reservations count toward neither quota nor duplicates
    #[test]
    fn prop_rejected_reservations_are_inert(
        request in strategies::request(),
        copies in 1usize..5,
    ) {
        let policy = BookingPolicy::default();
        let existing: Vec<Reservation> = (0..copies)
            .map(|_| stored(request.clone(), ReservationStatus::Rejected))
            .collect();

        let report = validate_reservation(&request, &existing, strategies::today(), &policy);
        prop_assert!(!report.contains(&RuleViolation::DuplicateReservation));
        let quota_violation = RuleViolation::DailyQuotaExceeded {
            max: policy.max_daily_reservations,
        };
        prop_assert!(!report.contains(&quota_violation));
        prop_assert!(!report.contains(&RuleViolation::NoCapacity));
    }

    /// The same request twice while the first is pending is a duplicate
    #[test]
    fn prop_pending_copy_is_duplicate(request in strategies::request()) {
        let policy = BookingPolicy::default();
        let existing = vec![stored(request.clone(), ReservationStatus::Pending)];

        let report = validate_reservation(&request, &existing, strategies::today(), &policy);
        prop_assert!(report.contains(&RuleViolation::DuplicateReservation));
    }
}
