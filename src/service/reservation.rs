// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reservation Service
//!
//! Application service for students submitting reservation requests and
//! administrators reviewing them. The availability engine and the validator
//! stay pure; this layer feeds them store snapshots and persists the result.
//!
//! # Submit
//!
//! ```text
//! snapshot → validate_reservation → append(expected_version)
//!    ↑                                   │ conflict
//!    └───────────────────────────────────┘ (up to submit_attempts)
//! ```
//!
//! # Review
//!
//! ```text
//! admin? → load → StateMachine::transition → patch(status, expecting loaded status) → email
//!            ↑                                            │ status changed
//!            └────────────────────────────────────────────┘
//! ```
//!
//! A decision is only written over the status it was checked against, so
//! two administrators cannot approve and reject the same reservation. A
//! failed email never rolls back the status change.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::{CredentialCheck, StaticPasswordCheck};
use crate::availability::{self, DayAvailability};
use crate::config::ServiceConfig;
use crate::domain::{
    Reservation, ReservationId, ReservationPatch, ReservationRequest, ReservationStatus, TimeSlot,
};
use crate::errors::ReservationError;
use crate::notification::{
    approval_email, rejection_email, EmailTransport, NotificationStatus, SentEmail,
    SimulatedTransport,
};
use crate::state_machine::{ReviewDecision, StateMachine, TransitionError};
use crate::store::{EmailLog, ReservationStore, SessionStore};
use crate::validation::{validate_reservation, ValidationReport};

/// Service layer result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service layer errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Store, transport, or configuration failure
    #[error(transparent)]
    Store(#[from] ReservationError),

    /// Review decision not allowed from the current status
    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    /// Administrator session required
    #[error("Administrator login required")]
    Unauthorized,

    /// Request broke one or more booking rules
    #[error("Reservation request rejected: {}", .0.messages().join("; "))]
    Rejected(ValidationReport),

    /// Reservation does not exist
    #[error("Reservation not found: {0}")]
    NotFound(ReservationId),
}

/// Student request to book a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReservationCommand {
    pub request: ReservationRequest,
    /// When the request was made; its local date is "today" for validation
    pub timestamp: DateTime<Utc>,
}

impl SubmitReservationCommand {
    pub fn new(request: ReservationRequest, timestamp: DateTime<Utc>) -> Self {
        Self { request, timestamp }
    }

    /// Request made right now
    pub fn now(request: ReservationRequest) -> Self {
        Self::new(request, Utc::now())
    }

    fn today(&self) -> NaiveDate {
        self.timestamp.with_timezone(&Local).date_naive()
    }
}

/// Result of an approve or reject
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    pub reservation: Reservation,
    pub notification: NotificationStatus,
    /// Non-empty when the decision repeated the current status
    pub warnings: Vec<String>,
}

/// Reservation counts for one Sunday-to-Saturday week
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl WeeklyStats {
    /// Count reservations dated in the week containing `today`
    pub fn for_week(reservations: &[Reservation], today: NaiveDate) -> Self {
        let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
        let week_end = week_start + Duration::days(6);

        let mut stats = WeeklyStats {
            week_start,
            week_end,
            ..Default::default()
        };
        for reservation in reservations
            .iter()
            .filter(|r| (week_start..=week_end).contains(&r.date))
        {
            stats.total += 1;
            match reservation.status {
                ReservationStatus::Pending => stats.pending += 1,
                ReservationStatus::Approved => stats.approved += 1,
                ReservationStatus::Rejected => stats.rejected += 1,
            }
        }
        stats
    }
}

/// Reservation service trait
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Validate and persist a new pending reservation
    ///
    /// # Returns
    /// - The stored reservation
    /// - `ServiceError::Rejected` with every violated rule otherwise
    async fn submit(&self, command: SubmitReservationCommand) -> ServiceResult<Reservation>;

    /// Validate without persisting
    async fn validate(
        &self,
        request: &ReservationRequest,
        today: NaiveDate,
    ) -> ServiceResult<ValidationReport>;

    /// Seats left in `room` over `[start, start + duration)` on `date`
    async fn check_availability(
        &self,
        room: &str,
        date: NaiveDate,
        start: TimeSlot,
        duration: u32,
    ) -> ServiceResult<u32>;

    /// Hour-by-hour occupancy of `room` on `date`
    async fn day_availability(&self, room: &str, date: NaiveDate)
        -> ServiceResult<DayAvailability>;

    /// Start slots usable for a booking of `duration` hours
    fn available_start_slots(&self, duration: u32) -> Vec<TimeSlot>;

    /// All reservations, newest first
    async fn reservations(&self) -> ServiceResult<Vec<Reservation>>;

    /// Reservations with `status`
    ///
    /// Pending come oldest first (review queue), approved by reservation
    /// date newest first, rejected newest first.
    async fn reservations_with_status(
        &self,
        status: ReservationStatus,
    ) -> ServiceResult<Vec<Reservation>>;

    /// A student's reservations, newest first; email match ignores case
    async fn reservations_for_email(&self, email: &str) -> ServiceResult<Vec<Reservation>>;

    async fn get_reservation(&self, id: ReservationId) -> ServiceResult<Reservation>;

    /// Approve and notify (admin only)
    async fn approve(&self, id: ReservationId) -> ServiceResult<ReviewOutcome>;

    /// Reject and notify (admin only)
    async fn reject(&self, id: ReservationId) -> ServiceResult<ReviewOutcome>;

    async fn weekly_stats(&self, today: NaiveDate) -> ServiceResult<WeeklyStats>;

    /// Sent-email log, newest first (admin only)
    async fn sent_emails(&self) -> ServiceResult<Vec<SentEmail>>;

    async fn login(&self, password: &str) -> ServiceResult<()>;

    async fn logout(&self) -> ServiceResult<()>;

    async fn is_admin_logged_in(&self) -> ServiceResult<bool>;
}

/// Reservation service over a single store that also holds the admin
/// session and the email log
pub struct StoreBackedReservationService<S, T, C = StaticPasswordCheck> {
    store: Arc<S>,
    transport: T,
    credentials: C,
    config: ServiceConfig,
}

impl<S, T, C> StoreBackedReservationService<S, T, C>
where
    S: ReservationStore + SessionStore + EmailLog,
    T: EmailTransport,
    C: CredentialCheck,
{
    pub fn new(store: Arc<S>, transport: T, credentials: C, config: ServiceConfig) -> Self {
        Self {
            store,
            transport,
            credentials,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn require_admin(&self) -> ServiceResult<()> {
        if self.store.is_admin_logged_in().await? {
            Ok(())
        } else {
            Err(ServiceError::Unauthorized)
        }
    }

    async fn review(
        &self,
        id: ReservationId,
        decision: ReviewDecision,
    ) -> ServiceResult<ReviewOutcome> {
        self.require_admin().await?;

        let attempts = self.config.submit_attempts.max(1);
        let mut attempt = 1;
        let (reservation, output) = loop {
            let current = self.get_reservation(id).await?;
            let (next, output) = current.status.transition(&decision)?;
            let patch = ReservationPatch::status(next).expecting(current.status);

            match self.store.patch(id, patch).await {
                Ok(reservation) => break (reservation, output),
                Err(e @ ReservationError::StatusChanged { .. }) if attempt < attempts => {
                    warn!(
                        %id,
                        %decision,
                        attempt,
                        error = %e,
                        "status changed during review, re-checking"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };
        for warning in &output.warnings {
            warn!(%id, %decision, "{warning}");
        }
        info!(%id, %decision, status = %reservation.status, "reservation reviewed");

        let template = match decision {
            ReviewDecision::Approve => approval_email(&reservation),
            ReviewDecision::Reject => rejection_email(&reservation),
        };
        let notification = match self.transport.send(template).await {
            Ok(()) => {
                info!(%id, to = %reservation.student_email, "review email sent");
                NotificationStatus::Sent
            }
            Err(e) => {
                warn!(%id, error = %e, "review email failed");
                NotificationStatus::Failed(e.to_string())
            }
        };

        Ok(ReviewOutcome {
            reservation,
            notification,
            warnings: output.warnings,
        })
    }
}

impl<S> StoreBackedReservationService<S, SimulatedTransport<S>, StaticPasswordCheck>
where
    S: ReservationStore + SessionStore + EmailLog,
{
    /// Service with the simulated transport and the configured shared
    /// password
    pub fn simulated(store: Arc<S>, config: ServiceConfig) -> Self {
        let transport = SimulatedTransport::new(store.clone(), &config.notification);
        let credentials = StaticPasswordCheck::new(config.admin_password.clone());
        Self::new(store, transport, credentials, config)
    }
}

#[async_trait]
impl<S, T, C> ReservationService for StoreBackedReservationService<S, T, C>
where
    S: ReservationStore + SessionStore + EmailLog,
    T: EmailTransport,
    C: CredentialCheck,
{
    async fn submit(&self, command: SubmitReservationCommand) -> ServiceResult<Reservation> {
        let today = command.today();
        let attempts = self.config.submit_attempts.max(1);
        let mut conflict = None;

        for attempt in 1..=attempts {
            let snapshot = self.store.snapshot().await?;
            let report = validate_reservation(
                &command.request,
                &snapshot.reservations,
                today,
                &self.config.policy,
            );
            if !report.is_valid() {
                info!(
                    email = %command.request.student_email,
                    violations = report.errors.len(),
                    "reservation request rejected"
                );
                return Err(ServiceError::Rejected(report));
            }

            let reservation = Reservation::from_request(
                command.request.clone(),
                ReservationId::new(),
                command.timestamp,
            );
            match self
                .store
                .append(reservation.clone(), Some(snapshot.version))
                .await
            {
                Ok(version) => {
                    info!(
                        id = %reservation.id,
                        room = %reservation.lab_room,
                        date = %reservation.date,
                        start = %reservation.start_time,
                        version,
                        "reservation submitted"
                    );
                    return Ok(reservation);
                }
                Err(e @ ReservationError::ConcurrencyConflict { .. }) => {
                    warn!(attempt, attempts, error = %e, "store changed during submit, retrying");
                    conflict = Some(e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(conflict
            .map(ServiceError::from)
            .unwrap_or_else(|| ReservationError::Store("submit made no attempts".into()).into()))
    }

    async fn validate(
        &self,
        request: &ReservationRequest,
        today: NaiveDate,
    ) -> ServiceResult<ValidationReport> {
        let existing = self.store.list().await?;
        Ok(validate_reservation(
            request,
            &existing,
            today,
            &self.config.policy,
        ))
    }

    async fn check_availability(
        &self,
        room: &str,
        date: NaiveDate,
        start: TimeSlot,
        duration: u32,
    ) -> ServiceResult<u32> {
        let existing = self.store.list().await?;
        Ok(availability::check_availability(
            &existing,
            room,
            date,
            start,
            duration,
            &self.config.policy,
        ))
    }

    async fn day_availability(
        &self,
        room: &str,
        date: NaiveDate,
    ) -> ServiceResult<DayAvailability> {
        let existing = self.store.list().await?;
        Ok(availability::day_availability(
            &existing,
            room,
            date,
            &self.config.policy,
        ))
    }

    fn available_start_slots(&self, duration: u32) -> Vec<TimeSlot> {
        availability::available_start_slots(duration, &self.config.policy)
    }

    async fn reservations(&self) -> ServiceResult<Vec<Reservation>> {
        let mut all = self.store.list().await?;
        all.sort_by_key(|r| Reverse(r.created_at));
        Ok(all)
    }

    async fn reservations_with_status(
        &self,
        status: ReservationStatus,
    ) -> ServiceResult<Vec<Reservation>> {
        let mut matching: Vec<Reservation> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|r| r.status == status)
            .collect();

        match status {
            ReservationStatus::Pending => matching.sort_by_key(|r| r.created_at),
            ReservationStatus::Approved => {
                matching.sort_by_key(|r| Reverse((r.date, r.start_time)))
            }
            ReservationStatus::Rejected => matching.sort_by_key(|r| Reverse(r.created_at)),
        }
        Ok(matching)
    }

    async fn reservations_for_email(&self, email: &str) -> ServiceResult<Vec<Reservation>> {
        let mut mine: Vec<Reservation> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|r| r.belongs_to(email))
            .collect();
        mine.sort_by_key(|r| Reverse(r.created_at));
        debug!(count = mine.len(), "looked up reservations by email");
        Ok(mine)
    }

    async fn get_reservation(&self, id: ReservationId) -> ServiceResult<Reservation> {
        self.store.get(id).await?.ok_or(ServiceError::NotFound(id))
    }

    async fn approve(&self, id: ReservationId) -> ServiceResult<ReviewOutcome> {
        self.review(id, ReviewDecision::Approve).await
    }

    async fn reject(&self, id: ReservationId) -> ServiceResult<ReviewOutcome> {
        self.review(id, ReviewDecision::Reject).await
    }

    async fn weekly_stats(&self, today: NaiveDate) -> ServiceResult<WeeklyStats> {
        let all = self.store.list().await?;
        Ok(WeeklyStats::for_week(&all, today))
    }

    async fn sent_emails(&self) -> ServiceResult<Vec<SentEmail>> {
        self.require_admin().await?;
        let mut emails = self.store.sent_emails().await?;
        emails.sort_by_key(|e| Reverse(e.sent_at));
        Ok(emails)
    }

    async fn login(&self, password: &str) -> ServiceResult<()> {
        if !self.credentials.verify(password) {
            warn!("administrator login failed");
            return Err(ServiceError::Unauthorized);
        }
        self.store.set_admin_session(true).await?;
        info!("administrator logged in");
        Ok(())
    }

    async fn logout(&self) -> ServiceResult<()> {
        self.store.clear_admin_session().await?;
        info!("administrator logged out");
        Ok(())
    }

    async fn is_admin_logged_in(&self) -> ServiceResult<bool> {
        Ok(self.store.is_admin_logged_in().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn dated(date: NaiveDate, status: ReservationStatus) -> Reservation {
        Reservation {
            id: ReservationId::new(),
            student_name: "Ana".to_string(),
            student_last_name: "Quispe".to_string(),
            student_email: "ana@cibertec.edu.pe".to_string(),
            lab_room: "be-206".to_string(),
            date,
            start_time: TimeSlot::new(9).unwrap(),
            duration: 1,
            status,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_weekly_stats_sunday_to_saturday() {
        // 2025-06-08 is a Sunday, 2025-06-14 a Saturday
        let reservations = vec![
            dated(day(7), ReservationStatus::Approved),
            dated(day(8), ReservationStatus::Pending),
            dated(day(10), ReservationStatus::Approved),
            dated(day(14), ReservationStatus::Rejected),
            dated(day(15), ReservationStatus::Pending),
        ];

        let stats = WeeklyStats::for_week(&reservations, day(11));

        assert_eq!(
            stats,
            WeeklyStats {
                week_start: day(8),
                week_end: day(14),
                total: 3,
                pending: 1,
                approved: 1,
                rejected: 1,
            }
        );
    }

    #[test]
    fn test_weekly_stats_on_sunday() {
        let stats = WeeklyStats::for_week(&[dated(day(8), ReservationStatus::Pending)], day(8));
        assert_eq!(stats.week_start, day(8));
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn test_rejected_error_lists_messages() {
        let mut report = ValidationReport::default();
        report
            .errors
            .push(crate::validation::RuleViolation::InvalidEmail);
        let message = ServiceError::Rejected(report).to_string();
        assert!(message.contains("correo"), "{message}");
    }
}
